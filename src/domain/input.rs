//! Typed tool inputs. Argument bags are parsed and checked here, before any
//! provider call is made.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::core::error::GatewayError;
use crate::domain::event::{Attendee, EventQuery, EventTime, NewEvent};

/// Provider-side page ceiling for `maxResults`.
pub const MAX_RESULTS_LIMIT: u32 = 2500;

fn parse_args<T: DeserializeOwned>(tool: &'static str, args: &Value) -> Result<T, GatewayError> {
    let args = match args {
        Value::Null => Value::Object(Default::default()),
        other => other.clone(),
    };
    serde_json::from_value(args).map_err(|e| GatewayError::invalid_args(tool, e))
}

fn parse_instant(
    tool: &'static str,
    field: &str,
    raw: &str,
) -> Result<DateTime<Utc>, GatewayError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            GatewayError::invalid_args(tool, format!("{field} is not an ISO 8601 timestamp ({e})"))
        })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListEventsArgs {
    time_min: String,
    time_max: String,
    /// Any JSON number; must be integral and in range.
    #[serde(default)]
    max_results: Option<f64>,
}

/// Validated `list_events` input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEventsInput {
    pub query: EventQuery,
}

impl ListEventsInput {
    pub fn from_arguments(tool: &'static str, args: &Value) -> Result<Self, GatewayError> {
        let raw: ListEventsArgs = parse_args(tool, args)?;
        let time_min = parse_instant(tool, "timeMin", &raw.time_min)?;
        let time_max = parse_instant(tool, "timeMax", &raw.time_max)?;
        if time_max < time_min {
            return Err(GatewayError::invalid_args(tool, "timeMax is earlier than timeMin"));
        }
        let max_results = match raw.max_results {
            None => EventQuery::DEFAULT_MAX_RESULTS,
            Some(n) if n.fract() == 0.0 && (1.0..=f64::from(MAX_RESULTS_LIMIT)).contains(&n) => {
                n as u32
            }
            Some(n) => {
                return Err(GatewayError::invalid_args(
                    tool,
                    format!("maxResults must be an integer in 1..={MAX_RESULTS_LIMIT}, got {n}"),
                ))
            }
        };
        Ok(Self {
            query: EventQuery {
                time_min,
                time_max,
                max_results,
            },
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateEventArgs {
    summary: String,
    #[serde(default)]
    description: Option<String>,
    start_time: String,
    end_time: String,
    #[serde(default)]
    attendees: Option<Vec<String>>,
}

/// Validated `create_event` input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEventInput {
    pub event: NewEvent,
}

impl CreateEventInput {
    pub fn from_arguments(tool: &'static str, args: &Value) -> Result<Self, GatewayError> {
        let raw: CreateEventArgs = parse_args(tool, args)?;
        if raw.summary.trim().is_empty() {
            return Err(GatewayError::invalid_args(tool, "summary must not be empty"));
        }
        let start = parse_instant(tool, "startTime", &raw.start_time)?;
        let end = parse_instant(tool, "endTime", &raw.end_time)?;
        if end < start {
            return Err(GatewayError::invalid_args(tool, "endTime is earlier than startTime"));
        }

        let attendees = match raw.attendees {
            None => None,
            Some(emails) => {
                let mut out = Vec::with_capacity(emails.len());
                for email in emails {
                    let email = email.trim();
                    if !email.contains('@') {
                        return Err(GatewayError::invalid_args(
                            tool,
                            format!("attendee '{email}' is not an email address"),
                        ));
                    }
                    out.push(Attendee { email: email.to_owned() });
                }
                Some(out)
            }
        };

        Ok(Self {
            event: NewEvent {
                summary: raw.summary,
                description: raw.description,
                start: EventTime::at(raw.start_time.trim()),
                end: EventTime::at(raw.end_time.trim()),
                attendees,
            },
        })
    }
}
