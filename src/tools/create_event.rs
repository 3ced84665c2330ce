use async_trait::async_trait;
use serde_json::json;

use crate::core::content::ToolResult;
use crate::core::error::{GatewayError, ProviderOperation};
use crate::core::tool::{Tool, ToolSpec};
use crate::domain::input::CreateEventInput;
use crate::domain::CalendarProvider;

pub const NAME: &str = "create_event";

#[derive(Clone, Default)]
pub struct CreateEventTool;

impl ToolSpec for CreateEventTool {
    fn name(&self) -> &'static str {
        NAME
    }
    fn description(&self) -> &'static str {
        "Create a new calendar event"
    }
    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "summary": { "type": "string", "description": "Event title" },
                "description": { "type": "string", "description": "Event description" },
                "startTime": { "type": "string", "description": "Start time (ISO 8601)" },
                "endTime": { "type": "string", "description": "End time (ISO 8601)" },
                "attendees": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "List of attendee email addresses"
                }
            },
            "required": ["summary", "startTime", "endTime"]
        })
    }
}

#[async_trait]
impl Tool for CreateEventTool {
    async fn call(
        &self,
        calendar: &dyn CalendarProvider,
        arguments: &serde_json::Value,
    ) -> Result<ToolResult, GatewayError> {
        let input = CreateEventInput::from_arguments(NAME, arguments)?;
        tracing::debug!(
            summary = %input.event.summary,
            attendees = input.event.attendees.as_ref().map_or(0, Vec::len),
            "creating event"
        );
        let created = calendar
            .insert_event(&input.event)
            .await
            .map_err(|e| GatewayError::provider(ProviderOperation::CreateEvent, e))?;

        Ok(ToolResult::text(format!(
            "Event created: {}\nID: {}\nLink: {}",
            created.summary.as_deref().unwrap_or_default(),
            created.id.as_deref().unwrap_or_default(),
            created.html_link.as_deref().unwrap_or_default()
        )))
    }
}
