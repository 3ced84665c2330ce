use async_trait::async_trait;
use serde_json::json;

use crate::core::content::ToolResult;
use crate::core::error::{GatewayError, ProviderOperation};
use crate::core::tool::{Tool, ToolSpec};
use crate::domain::input::ListEventsInput;
use crate::domain::{CalendarProvider, Event, EventQuery};

pub const NAME: &str = "list_events";
pub const NO_EVENTS: &str = "No events found for the specified time range.";

#[derive(Clone, Default)]
pub struct ListEventsTool;

impl ToolSpec for ListEventsTool {
    fn name(&self) -> &'static str {
        NAME
    }
    fn description(&self) -> &'static str {
        "List calendar events for a specific date range"
    }
    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "timeMin": { "type": "string", "description": "Start time (ISO 8601 format)" },
                "timeMax": { "type": "string", "description": "End time (ISO 8601 format)" },
                "maxResults": {
                    "type": "number",
                    "description": "Maximum number of events to return (default: 10)",
                    "default": EventQuery::DEFAULT_MAX_RESULTS
                }
            },
            "required": ["timeMin", "timeMax"]
        })
    }
}

#[async_trait]
impl Tool for ListEventsTool {
    async fn call(
        &self,
        calendar: &dyn CalendarProvider,
        arguments: &serde_json::Value,
    ) -> Result<ToolResult, GatewayError> {
        let input = ListEventsInput::from_arguments(NAME, arguments)?;
        list_window(calendar, &input.query).await
    }
}

/// One provider round-trip for `query`, rendered as a text summary.
pub async fn list_window(
    calendar: &dyn CalendarProvider,
    query: &EventQuery,
) -> Result<ToolResult, GatewayError> {
    tracing::debug!(
        time_min = %query.time_min_param(),
        time_max = %query.time_max_param(),
        max_results = query.max_results,
        "listing events"
    );
    let events = calendar
        .list_events(query)
        .await
        .map_err(|e| GatewayError::provider(ProviderOperation::ListEvents, e))?;
    Ok(ToolResult::text(render_events(&events)))
}

pub fn render_events(events: &[Event]) -> String {
    if events.is_empty() {
        return NO_EVENTS.to_owned();
    }
    let lines = events
        .iter()
        .map(|ev| {
            format!(
                "• {} ({} - {})",
                ev.summary.as_deref().unwrap_or("(no title)"),
                ev.start.display(),
                ev.end.display()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("Found {} events:\n\n{}", events.len(), lines)
}
