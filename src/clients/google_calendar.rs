use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;

use crate::clients::service_account::{AccessTokenSource, ServiceAccountKey, ServiceAccountTokens};
use crate::core::error::GatewayError;
use crate::domain::{CalendarConnector, CalendarProvider, Event, EventQuery, NewEvent};
use crate::infra::config::{Config, GoogleConfig, HttpConfig};
use crate::infra::http::headers::tag_outbound;
use crate::infra::logging::log_metric;
use crate::infra::runtime::limits::make_http_client;

/// Only the impersonated user's primary calendar is ever addressed.
pub const CALENDAR_ID: &str = "primary";

/// Google Calendar v3 REST client.
#[derive(Clone)]
pub struct GoogleCalendar {
    base: String,
    http: Client,
    tokens: Arc<dyn AccessTokenSource>,
}

impl GoogleCalendar {
    pub fn new(base: impl Into<String>, http: Client, tokens: Arc<dyn AccessTokenSource>) -> Self {
        Self {
            base: base.into(),
            http,
            tokens,
        }
    }

    fn events_url(&self) -> String {
        format!(
            "{}/calendars/{}/events",
            self.base.trim_end_matches('/'),
            CALENDAR_ID
        )
    }

    async fn list_page(&self, query: &EventQuery) -> Result<Vec<Event>, String> {
        let token = self.tokens.access_token().await?;
        let url = self.events_url();
        tracing::debug!(endpoint = %url, "google.events.list request");

        let (builder, rid) = tag_outbound(self.http.get(url), "events.list");
        let resp = builder
            .bearer_auth(token)
            .query(&[
                ("timeMin", query.time_min_param()),
                ("timeMax", query.time_max_param()),
                ("maxResults", query.max_results.to_string()),
                ("singleEvents", "true".to_string()),
                ("orderBy", "startTime".to_string()),
            ])
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let page: EventsPage = ensure_success(resp, &rid)
            .await?
            .json()
            .await
            .map_err(|e| e.to_string())?;
        Ok(page.items)
    }

    async fn insert(&self, event: &NewEvent) -> Result<Event, String> {
        let token = self.tokens.access_token().await?;
        let url = self.events_url();
        tracing::debug!(endpoint = %url, "google.events.insert request");

        let (builder, rid) = tag_outbound(self.http.post(url), "events.insert");
        let resp = builder
            .bearer_auth(token)
            .json(event)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        ensure_success(resp, &rid)
            .await?
            .json::<Event>()
            .await
            .map_err(|e| e.to_string())
    }
}

fn record(op: &str, start: Instant, failed: bool) {
    if failed {
        log_metric(op, "remote_error_total", 1.0);
    }
    log_metric(op, "remote_latency_ms", start.elapsed().as_millis() as f64);
}

#[async_trait]
impl CalendarProvider for GoogleCalendar {
    async fn list_events(&self, query: &EventQuery) -> Result<Vec<Event>, String> {
        let start = Instant::now();
        let res = self.list_page(query).await;
        record("google.events.list", start, res.is_err());
        res
    }

    async fn insert_event(&self, event: &NewEvent) -> Result<Event, String> {
        let start = Instant::now();
        let res = self.insert(event).await;
        record("google.events.insert", start, res.is_err());
        res
    }
}

#[derive(Deserialize)]
struct EventsPage {
    #[serde(default)]
    items: Vec<Event>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Pass 2xx through; otherwise the API's own error message.
async fn ensure_success(resp: Response, request_id: &str) -> Result<Response, String> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    tracing::warn!(%status, request_id, "google calendar request failed");
    match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(b) => Err(b.error.message),
        Err(_) => Err(format!("upstream status {status}")),
    }
}

/// Builds a [`GoogleCalendar`] from service-account configuration.
pub struct GoogleConnector {
    google: GoogleConfig,
    http: HttpConfig,
}

impl GoogleConnector {
    pub fn new(google: GoogleConfig, http: HttpConfig) -> Self {
        Self { google, http }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.google.clone(), cfg.http.clone())
    }

    async fn load_key(&self) -> Result<ServiceAccountKey, GatewayError> {
        if let Some(raw) = &self.google.service_account_key {
            return ServiceAccountKey::from_json(raw);
        }
        if let Some(path) = &self.google.service_account_key_file {
            return ServiceAccountKey::from_file(path).await;
        }
        Err(GatewayError::Configuration(
            "GOOGLE_SERVICE_ACCOUNT_KEY or GOOGLE_SERVICE_ACCOUNT_KEY_FILE must be set".into(),
        ))
    }
}

#[async_trait]
impl CalendarConnector for GoogleConnector {
    async fn connect(&self) -> Result<Arc<dyn CalendarProvider>, GatewayError> {
        let key = self.load_key().await?;
        let subject = self
            .google
            .user_email
            .clone()
            .ok_or_else(|| {
                GatewayError::Configuration("GOOGLE_CALENDAR_USER_EMAIL must be set".into())
            })?;
        let http = make_http_client(&self.http)
            .map_err(|e| GatewayError::Configuration(format!("http client: {e}")))?;
        tracing::info!(
            client_email = %key.client_email,
            subject = %subject,
            base = %self.google.base_url(),
            "google calendar client ready"
        );
        let tokens = ServiceAccountTokens::new(key, subject, http.clone())?;
        let calendar = GoogleCalendar::new(self.google.base_url(), http, Arc::new(tokens));
        Ok(Arc::new(calendar) as Arc<dyn CalendarProvider>)
    }
}
