use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value as J;

use crate::core::content::ToolResult;
use crate::core::tool::ToolDescriptor;
use crate::infra::http::json::ApiError;
use crate::tools::dispatcher::Dispatcher;

#[derive(Serialize)]
pub struct ToolsList {
    pub tools: Vec<ToolDescriptor>,
}

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub timestamp: String,
}

// GET /mcp/tools
pub async fn list_tools(State(dispatcher): State<Arc<Dispatcher>>) -> Json<ToolsList> {
    Json(ToolsList {
        tools: dispatcher.list_tools(),
    })
}

/// An absent or blank body means "no arguments".
fn parse_arguments(body: &[u8]) -> Result<J, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(J::Object(Default::default()));
    }
    serde_json::from_slice(body).map_err(|e| ApiError::message(format!("Invalid JSON body: {e}")))
}

// POST /mcp/tools/:tool_name
pub async fn call_tool(
    State(dispatcher): State<Arc<Dispatcher>>,
    Path(tool_name): Path<String>,
    body: Bytes,
) -> Result<Json<ToolResult>, ApiError> {
    tracing::debug!(tool = %tool_name, "HTTP tool call");
    let args = parse_arguments(&body)?;
    let out = dispatcher.call_tool(&tool_name, &args).await?;
    Ok(Json(out))
}

// GET /health
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::testing::{FakeConnector, RecordingCalendar};
    use crate::domain::{Event, EventTime};
    use axum::body::{to_bytes, Body};
    use axum::routing::{get, post};
    use axum::Router;
    use hyper::Request;
    use serde_json::json;
    use tower::ServiceExt;

    const BODY_LIMIT: usize = 1024 * 1024;

    fn router_with(calendar: RecordingCalendar) -> Router {
        let dispatcher = Arc::new(Dispatcher::new(Arc::new(FakeConnector::new(calendar))));
        Router::new()
            .route("/mcp/tools", get(super::list_tools))
            .route("/mcp/tools/:tool_name", post(super::call_tool))
            .route("/health", get(super::health))
            .with_state(dispatcher)
    }

    async fn body_json(resp: axum::response::Response) -> J {
        let bytes = to_bytes(resp.into_body(), BODY_LIMIT).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    #[tokio::test]
    async fn http_tools_list_returns_three_tools() {
        let app = router_with(RecordingCalendar::default());
        let req = Request::builder().uri("/mcp/tools").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert!(resp.status().is_success());
        let v = body_json(resp).await;
        assert_eq!(v["tools"].as_array().unwrap().len(), 3);
        assert_eq!(v["tools"][0]["name"], "list_events");
        assert!(v["tools"][2]["inputSchema"]["properties"]["attendees"].is_object());
    }

    #[tokio::test]
    async fn http_list_events_returns_content_envelope() {
        let app = router_with(RecordingCalendar::with_events(vec![Event {
            summary: Some("Dentist".into()),
            start: EventTime::at("2024-05-01T08:00:00Z"),
            end: EventTime::at("2024-05-01T09:00:00Z"),
            ..Default::default()
        }]));
        let resp = app
            .oneshot(post_json(
                "/mcp/tools/list_events",
                r#"{"timeMin":"2024-05-01T00:00:00Z","timeMax":"2024-05-02T00:00:00Z"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let v = body_json(resp).await;
        assert_eq!(v["content"][0]["type"], "text");
        assert_eq!(
            v["content"][0]["text"],
            "Found 1 events:\n\n• Dentist (2024-05-01T08:00:00Z - 2024-05-01T09:00:00Z)"
        );
    }

    #[tokio::test]
    async fn http_today_accepts_empty_body() {
        let app = router_with(RecordingCalendar::default());
        let req = Request::builder()
            .method("POST")
            .uri("/mcp/tools/get_today_events")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), 200);
        let v = body_json(resp).await;
        assert_eq!(v["content"][0]["text"], "No events found for the specified time range.");
    }

    #[tokio::test]
    async fn http_unknown_tool_returns_500_with_error() {
        let app = router_with(RecordingCalendar::default());
        let resp = app
            .oneshot(post_json("/mcp/tools/nonexistent_tool", "{}"))
            .await
            .unwrap();
        assert_eq!(resp.status(), 500);
        let v = body_json(resp).await;
        assert_eq!(v["error"], "Unknown tool: nonexistent_tool");
    }

    #[tokio::test]
    async fn http_provider_failure_returns_500_with_prefixed_message() {
        let app = router_with(RecordingCalendar::failing("Not Found"));
        let resp = app
            .oneshot(post_json(
                "/mcp/tools/create_event",
                &json!({
                    "summary": "x",
                    "startTime": "2024-05-01T09:00:00Z",
                    "endTime": "2024-05-01T10:00:00Z"
                })
                .to_string(),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), 500);
        let v = body_json(resp).await;
        assert_eq!(v["error"], "Failed to create event: Not Found");
    }

    #[tokio::test]
    async fn http_malformed_json_returns_500() {
        let app = router_with(RecordingCalendar::default());
        let resp = app
            .oneshot(post_json("/mcp/tools/list_events", "{ not-json }"))
            .await
            .unwrap();
        assert_eq!(resp.status(), 500);
        let v = body_json(resp).await;
        assert!(v["error"].as_str().unwrap().starts_with("Invalid JSON body"));
    }

    #[tokio::test]
    async fn health_reports_ok_with_timestamp() {
        let app = router_with(RecordingCalendar::default());
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), 200);
        let v = body_json(resp).await;
        assert_eq!(v["status"], "ok");
        let ts = v["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
        assert!(ts.ends_with('Z'));
    }
}
