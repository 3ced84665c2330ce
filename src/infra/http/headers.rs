use std::sync::atomic::{AtomicU64, Ordering};

use reqwest::RequestBuilder;

pub const USER_AGENT: &str = concat!("calendar-mcp-gateway/", env!("CARGO_PKG_VERSION"));

static SEQ: AtomicU64 = AtomicU64::new(0);

/// `cal-{unix millis}-{seq}`, unique within the process.
pub fn next_request_id() -> String {
    let seq = SEQ.fetch_add(1, Ordering::Relaxed);
    format!("cal-{}-{}", chrono::Utc::now().timestamp_millis(), seq)
}

/// Stamp an outgoing Google request with `x-request-id` and our user agent.
/// Returns the id so callers can correlate their own log lines.
pub fn tag_outbound(builder: RequestBuilder, op: &str) -> (RequestBuilder, String) {
    let rid = next_request_id();
    tracing::debug!(op = op, request_id = %rid, "outbound request");
    let builder = builder
        .header("x-request-id", rid.as_str())
        .header(reqwest::header::USER_AGENT, USER_AGENT);
    (builder, rid)
}
