use std::sync::Arc;

use async_trait::async_trait;

use crate::core::error::GatewayError;

pub mod event;
pub mod input;
#[cfg(test)]
pub mod testing;

pub use event::{Attendee, Event, EventQuery, EventTime, NewEvent};

/// The external calendar the tools read from and append to.
///
/// Errors are the provider's own message; tools add the operation prefix.
#[async_trait]
pub trait CalendarProvider: Send + Sync {
    /// Events in `[time_min, time_max)`, recurring events expanded to single
    /// instances, ordered by start time, at most `max_results`.
    async fn list_events(&self, query: &EventQuery) -> Result<Vec<Event>, String>;

    /// Insert one event and return the provider's copy of it.
    async fn insert_event(&self, event: &NewEvent) -> Result<Event, String>;
}

/// Builds a ready provider. Called at most once per successful init.
#[async_trait]
pub trait CalendarConnector: Send + Sync {
    async fn connect(&self) -> Result<Arc<dyn CalendarProvider>, GatewayError>;
}
