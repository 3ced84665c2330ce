use std::time::Duration;

use crate::infra::config::HttpConfig;

/// Build the outgoing reqwest client with configured connect/request timeouts.
/// Redirects are not followed; the calendar API never needs them.
pub fn make_http_client(cfg: &HttpConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_millis(cfg.connect_timeout_ms))
        .timeout(Duration::from_millis(cfg.timeout_ms))
        .redirect(reqwest::redirect::Policy::none())
        .build()
}
