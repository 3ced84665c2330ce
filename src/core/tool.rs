use async_trait::async_trait;
use serde::Serialize;

use crate::core::content::ToolResult;
use crate::core::error::GatewayError;
use crate::domain::CalendarProvider;

/// Minimal metadata every tool must expose.
pub trait ToolSpec {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn input_schema(&self) -> serde_json::Value;

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name(),
            description: self.description(),
            input_schema: self.input_schema(),
        }
    }
}

/// A described tool plus its operation against the calendar provider.
#[async_trait]
pub trait Tool: ToolSpec + Send + Sync {
    async fn call(
        &self,
        calendar: &dyn CalendarProvider,
        arguments: &serde_json::Value,
    ) -> Result<ToolResult, GatewayError>;
}

/// Listing entry for a registered tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}
