use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, JsonObject, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool as McpTool,
};
use rmcp::service::RequestContext;
use rmcp::RoleServer;

use crate::core::content::{ContentBlock, ToolResult};
use crate::core::error::GatewayError;
use crate::core::tool::ToolDescriptor;
use crate::infra::runtime::mcp_transport::ServerHandler;
use crate::tools::dispatcher::Dispatcher;

/// MCP handler exposing the registered calendar tools. Listing and calls both
/// go through the shared [`Dispatcher`], so MCP clients see the same names,
/// descriptions and input schemas as the REST surface.
#[derive(Clone)]
pub struct CalendarSvc {
    pub dispatcher: Arc<Dispatcher>,
}

fn to_mcp_tool(descriptor: ToolDescriptor) -> McpTool {
    let schema = match descriptor.input_schema {
        serde_json::Value::Object(map) => map,
        _ => JsonObject::new(),
    };
    McpTool::new(descriptor.name, descriptor.description, Arc::new(schema))
}

fn to_call_result(result: ToolResult) -> CallToolResult {
    CallToolResult::success(
        result
            .content
            .into_iter()
            .map(|block| match block {
                ContentBlock::Text { text } => Content::text(text),
            })
            .collect(),
    )
}

fn to_mcp_error(e: GatewayError) -> rmcp::ErrorData {
    match e {
        GatewayError::UnknownTool(_) | GatewayError::InvalidArguments { .. } => {
            rmcp::ErrorData::invalid_params(e.to_string(), None)
        }
        GatewayError::Configuration(_) | GatewayError::Provider { .. } => {
            rmcp::ErrorData::internal_error(e.to_string(), None)
        }
    }
}

impl CalendarSvc {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub fn tools(&self) -> Vec<McpTool> {
        self.dispatcher
            .list_tools()
            .into_iter()
            .map(to_mcp_tool)
            .collect()
    }

    /// Absent arguments reach the tool as `null`, which tools treat as `{}`.
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, rmcp::ErrorData> {
        let arguments = arguments
            .map(serde_json::Value::Object)
            .unwrap_or(serde_json::Value::Null);
        self.dispatcher
            .call_tool(name, &arguments)
            .await
            .map(to_call_result)
            .map_err(to_mcp_error)
    }
}

impl ServerHandler for CalendarSvc {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Google Calendar tools: list_events, get_today_events, create_event".into(),
            ),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::ErrorData> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::ErrorData> {
        tracing::debug!(tool = %request.name, "MCP tool call");
        self.dispatch(&request.name, request.arguments).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::testing::{FakeConnector, RecordingCalendar};
    use crate::tools::registry::build_registry;
    use serde_json::json;

    fn svc() -> CalendarSvc {
        let connector = Arc::new(FakeConnector::new(RecordingCalendar::default()));
        CalendarSvc::new(Arc::new(Dispatcher::new(connector)))
    }

    #[test]
    fn advertised_tools_carry_registry_schemas() {
        let advertised: Vec<serde_json::Value> = svc()
            .tools()
            .iter()
            .map(|t| serde_json::to_value(t).unwrap())
            .collect();
        let registry = build_registry().list();
        assert_eq!(advertised.len(), registry.len());
        for (mcp, reg) in advertised.iter().zip(&registry) {
            assert_eq!(mcp["name"], reg.name);
            assert_eq!(mcp["description"], reg.description);
            assert_eq!(mcp["inputSchema"], reg.input_schema);
        }
        assert_eq!(
            advertised[0]["inputSchema"]["required"],
            json!(["timeMin", "timeMax"])
        );
    }

    #[test]
    fn server_info_enables_tools() {
        assert!(svc().get_info().capabilities.tools.is_some());
    }

    #[tokio::test]
    async fn today_returns_text_content() {
        let res = svc()
            .dispatch("get_today_events", None)
            .await
            .expect("tool should succeed");
        let v = serde_json::to_value(&res).unwrap();
        assert_eq!(v["content"][0]["type"], "text");
        assert_eq!(
            v["content"][0]["text"],
            "No events found for the specified time range."
        );
    }

    #[tokio::test]
    async fn missing_arguments_are_invalid_params() {
        let err = svc()
            .dispatch("list_events", Some(JsonObject::new()))
            .await
            .unwrap_err();
        assert_eq!(err.code.0, -32602);
        assert!(err.message.contains("list_events"));
    }

    #[tokio::test]
    async fn unknown_tool_is_invalid_params() {
        let err = svc().dispatch("delete_event", None).await.unwrap_err();
        assert_eq!(err.code.0, -32602);
        assert_eq!(err.message, "Unknown tool: delete_event");
    }

    #[tokio::test]
    async fn provider_failure_is_internal_error() {
        let connector = Arc::new(FakeConnector::new(RecordingCalendar::failing("quota")));
        let svc = CalendarSvc::new(Arc::new(Dispatcher::new(connector)));
        let err = svc.dispatch("get_today_events", None).await.unwrap_err();
        assert_eq!(err.code.0, -32603);
        assert_eq!(err.message, "Failed to list events: quota");
    }

    #[tokio::test]
    async fn create_event_round_trips_through_dispatcher() {
        let obj = json!({
            "summary": "1:1",
            "startTime": "2024-05-01T09:00:00Z",
            "endTime": "2024-05-01T09:30:00Z"
        })
        .as_object()
        .unwrap()
        .clone();
        let res = svc().dispatch("create_event", Some(obj)).await.unwrap();
        let v = serde_json::to_value(&res).unwrap();
        assert!(v["content"][0]["text"]
            .as_str()
            .unwrap()
            .starts_with("Event created: 1:1"));
    }

    #[test]
    fn server_handler_trait_impl() {
        fn assert_server_handler<T: ServerHandler>(_handler: T) {}
        assert_server_handler(svc());
    }
}
