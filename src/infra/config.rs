use std::path::Path;

use serde::Deserialize;

use crate::core::error::GatewayError;

pub const DEFAULT_CALENDAR_BASE_URL: &str = "https://www.googleapis.com/calendar/v3";
pub const DEFAULT_CONFIG_PATH: &str = "calendar-mcp.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub mode: String, // "server" or "stdio"
    pub port: u16,
    pub google: GoogleConfig,
    pub http: HttpConfig,
}

/// Credentials and endpoint of the impersonated calendar.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GoogleConfig {
    /// Inline service-account key JSON. Takes precedence over the file.
    pub service_account_key: Option<String>,
    pub service_account_key_file: Option<String>,
    pub user_email: Option<String>,
    pub calendar_base_url: Option<String>,
}

impl GoogleConfig {
    pub fn base_url(&self) -> &str {
        self.calendar_base_url
            .as_deref()
            .unwrap_or(DEFAULT_CALENDAR_BASE_URL)
    }

    pub fn has_key(&self) -> bool {
        self.service_account_key.is_some() || self.service_account_key_file.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub connect_timeout_ms: u64,
    pub timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 2_000,
            timeout_ms: 10_000,
        }
    }
}

/// Optional on-disk overlay; every field may be omitted.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    mode: Option<String>,
    port: Option<u16>,
    #[serde(default)]
    google: GoogleConfig,
    http: Option<HttpConfig>,
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|s| s.trim().parse::<T>().ok())
}

impl Config {
    pub fn from_env() -> Self {
        Self::overlay(FileConfig::default())
    }

    /// Environment on top of the TOML file named by `CONFIG_PATH`
    /// (default `calendar-mcp.toml`). A missing file is not an error.
    pub fn from_env_and_toml() -> anyhow::Result<Self> {
        let path = env_string("CONFIG_PATH").unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        let file = if Path::new(&path).exists() {
            let raw = std::fs::read_to_string(&path)?;
            let parsed: FileConfig = toml::from_str(&raw)
                .map_err(|e| anyhow::anyhow!("invalid config file {path}: {e}"))?;
            tracing::debug!(path = %path, "loaded config file");
            parsed
        } else {
            FileConfig::default()
        };
        Ok(Self::overlay(file))
    }

    fn overlay(file: FileConfig) -> Self {
        let mode = env_string("MODE")
            .or(file.mode)
            .unwrap_or_else(|| "server".into());
        let port = env_parse::<u16>("PORT").or(file.port).unwrap_or(8080);

        let google = GoogleConfig {
            service_account_key: env_string("GOOGLE_SERVICE_ACCOUNT_KEY")
                .or(file.google.service_account_key),
            service_account_key_file: env_string("GOOGLE_SERVICE_ACCOUNT_KEY_FILE")
                .or(file.google.service_account_key_file),
            user_email: env_string("GOOGLE_CALENDAR_USER_EMAIL").or(file.google.user_email),
            calendar_base_url: env_string("GOOGLE_CALENDAR_BASE_URL")
                .or(file.google.calendar_base_url),
        };

        let file_http = file.http.unwrap_or_default();
        let http = HttpConfig {
            connect_timeout_ms: env_parse("HTTP_CONNECT_TIMEOUT_MS")
                .unwrap_or(file_http.connect_timeout_ms),
            timeout_ms: env_parse("HTTP_TIMEOUT_MS").unwrap_or(file_http.timeout_ms),
        };

        Self {
            mode,
            port,
            google,
            http,
        }
    }

    pub fn validate(&self) -> Result<(), GatewayError> {
        if !matches!(self.mode.as_str(), "server" | "stdio") {
            return Err(GatewayError::Configuration(format!(
                "Invalid MODE: {}. Must be 'server' or 'stdio'",
                self.mode
            )));
        }
        if self.mode == "server" && self.port == 0 {
            return Err(GatewayError::Configuration("PORT cannot be 0".into()));
        }
        Ok(())
    }
}
