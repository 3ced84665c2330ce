use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::core::error::GatewayError;

/// Body of every failed REST call: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Any REST failure. Always rendered as 500 with an [`ErrorBody`].
#[derive(Debug)]
pub struct ApiError(pub String);

impl ApiError {
    pub fn message(msg: impl Into<String>) -> Self {
        ApiError(msg.into())
    }
}

impl From<GatewayError> for ApiError {
    fn from(e: GatewayError) -> Self {
        ApiError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error(StatusCode::INTERNAL_SERVER_ERROR, self.0)
    }
}

pub fn error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}
