use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::json;

use crate::core::content::ToolResult;
use crate::core::error::GatewayError;
use crate::core::tool::{Tool, ToolSpec};
use crate::domain::{CalendarProvider, EventQuery};
use crate::tools::list_events::list_window;

pub const NAME: &str = "get_today_events";

#[derive(Clone, Default)]
pub struct TodayEventsTool;

impl TodayEventsTool {
    /// The next 24 hours starting now. Not aligned to local midnight.
    pub fn window() -> EventQuery {
        let now = Utc::now();
        EventQuery {
            time_min: now,
            time_max: now + Duration::hours(24),
            max_results: EventQuery::DEFAULT_MAX_RESULTS,
        }
    }
}

impl ToolSpec for TodayEventsTool {
    fn name(&self) -> &'static str {
        NAME
    }
    fn description(&self) -> &'static str {
        "Get today's calendar events"
    }
    fn input_schema(&self) -> serde_json::Value {
        json!({ "type": "object", "properties": {} })
    }
}

#[async_trait]
impl Tool for TodayEventsTool {
    async fn call(
        &self,
        calendar: &dyn CalendarProvider,
        _arguments: &serde_json::Value,
    ) -> Result<ToolResult, GatewayError> {
        list_window(calendar, &Self::window()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::testing::RecordingCalendar;

    #[tokio::test]
    async fn queries_now_through_twenty_four_hours_later() {
        let cal = RecordingCalendar::default();
        let before = Utc::now();
        let out = TodayEventsTool.call(&cal, &serde_json::Value::Null).await.unwrap();
        let after = Utc::now();

        assert_eq!(out.as_text(), crate::tools::list_events::NO_EVENTS);
        let q = &cal.queries()[0];
        assert!(q.time_min >= before && q.time_min <= after);
        assert_eq!(q.time_max - q.time_min, Duration::hours(24));
        assert_eq!(q.max_results, 10);
        // yyyy-mm-ddThh:mm:ss.mmmZ
        let sent = q.time_min_param();
        assert_eq!(sent.len(), 24, "{sent}");
        assert!(sent.ends_with('Z'));
    }

    #[tokio::test]
    async fn ignores_any_arguments() {
        let cal = RecordingCalendar::default();
        let out = TodayEventsTool.call(&cal, &json!({ "maxResults": 1 })).await;
        assert!(out.is_ok());
        assert_eq!(cal.queries()[0].max_results, 10);
    }
}
