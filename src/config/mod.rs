//! Configuration module for the personnel console.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root URL of the REST API; `/personnel` is appended to it
    pub api_url: String,
    /// Per-request timeout for the HTTP client
    pub request_timeout: Duration,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Drop form-submit responses that arrive after the user left the screen
    pub discard_stale_responses: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_level: "info".to_string(),
            discard_stale_responses: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_url = env::var("PERSONNEL_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let timeout_secs = parse_var("PERSONNEL_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS);

        let log_level = env::var("PERSONNEL_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let discard_stale_responses = parse_var("PERSONNEL_DISCARD_STALE", false);

        Self {
            api_url,
            request_timeout: Duration::from_secs(timeout_secs),
            log_level,
            discard_stale_responses,
        }
    }
}

/// Read and parse an environment variable, keeping `default` when unset or malformed.
fn parse_var<T: FromStr + Copy + std::fmt::Debug>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {}={:?}, using {:?}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}
