//! In-memory calendar doubles for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{CalendarConnector, CalendarProvider, Event, EventQuery, NewEvent};
use crate::core::error::GatewayError;

/// Returns canned events and records every request it sees.
#[derive(Default)]
pub struct RecordingCalendar {
    pub events: Vec<Event>,
    pub failure: Option<String>,
    pub queries: Mutex<Vec<EventQuery>>,
    pub inserted: Mutex<Vec<NewEvent>>,
}

impl RecordingCalendar {
    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            events,
            ..Default::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_owned()),
            ..Default::default()
        }
    }

    pub fn queries(&self) -> Vec<EventQuery> {
        self.queries.lock().unwrap().clone()
    }

    pub fn inserted(&self) -> Vec<NewEvent> {
        self.inserted.lock().unwrap().clone()
    }
}

#[async_trait]
impl CalendarProvider for RecordingCalendar {
    async fn list_events(&self, query: &EventQuery) -> Result<Vec<Event>, String> {
        self.queries.lock().unwrap().push(query.clone());
        if let Some(msg) = &self.failure {
            return Err(msg.clone());
        }
        Ok(self.events.clone())
    }

    async fn insert_event(&self, event: &NewEvent) -> Result<Event, String> {
        self.inserted.lock().unwrap().push(event.clone());
        if let Some(msg) = &self.failure {
            return Err(msg.clone());
        }
        Ok(Event {
            id: Some("evt-1".into()),
            summary: Some(event.summary.clone()),
            description: event.description.clone(),
            start: event.start.clone(),
            end: event.end.clone(),
            attendees: event.attendees.clone().unwrap_or_default(),
            html_link: Some("https://calendar.example/evt-1".into()),
        })
    }
}

/// Hands out a shared calendar, failing the first `fail_first` attempts.
pub struct FakeConnector {
    pub calendar: Arc<RecordingCalendar>,
    pub fail_first: usize,
    pub attempts: AtomicUsize,
}

impl FakeConnector {
    pub fn new(calendar: RecordingCalendar) -> Self {
        Self {
            calendar: Arc::new(calendar),
            fail_first: 0,
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CalendarConnector for FakeConnector {
    async fn connect(&self) -> Result<Arc<dyn CalendarProvider>, GatewayError> {
        let n = self.attempts.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        if n < self.fail_first {
            return Err(GatewayError::Configuration("credentials not available".into()));
        }
        Ok(self.calendar.clone() as Arc<dyn CalendarProvider>)
    }
}
