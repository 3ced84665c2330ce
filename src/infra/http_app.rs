use axum::{
    middleware,
    routing::{any_service, get, post},
    Router,
};
use std::sync::Arc;

use crate::api::mcp;
use crate::infra::http::cors;
use crate::infra::runtime::mcp_transport::{make_streamable_http_service, LocalSessionManager};
use crate::tools::dispatcher::Dispatcher;

/// `/health`, the REST tool surface under `/mcp/tools`, and streamable MCP at `/mcp`.
pub fn build_app(dispatcher: Arc<Dispatcher>) -> Router {
    let session_mgr = Arc::new(LocalSessionManager::default());
    let mcp_service = make_streamable_http_service(dispatcher.clone(), session_mgr);

    Router::new()
        .route("/health", get(mcp::health))
        .route("/mcp/tools", get(mcp::list_tools))
        .route("/mcp/tools/:tool_name", post(mcp::call_tool))
        .route_service("/mcp", any_service(mcp_service))
        .with_state(dispatcher)
        .layer(middleware::from_fn(cors::answer_options))
        .layer(cors::layer())
}
