//! Application configuration.
//!
//! Env-driven settings for the client: backend URL, stream inactivity
//! timeout, and log file location.

use std::path::PathBuf;
use std::time::Duration;

use crate::api::{DEFAULT_BASE_URL, DEFAULT_STREAM_TIMEOUT};

/// Configuration for the client.
///
/// Use the builder pattern to customize behavior.
///
/// # Example
///
/// ```ignore
/// use campaign_tui::config::AppConfig;
///
/// let config = AppConfig::default()
///     .with_base_url("http://localhost:9000")
///     .with_stream_timeout(None);
/// ```
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Backend API base URL
    pub base_url: String,
    /// Inactivity timeout for the chat stream (None disables it)
    pub stream_timeout: Option<Duration>,
    /// Log file path (None disables file logging)
    pub log_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            stream_timeout: Some(DEFAULT_STREAM_TIMEOUT),
            log_path: default_log_path(),
        }
    }
}

impl AppConfig {
    /// Create a new AppConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the stream inactivity timeout.
    pub fn with_stream_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.stream_timeout = timeout;
        self
    }

    /// Set the log file path.
    pub fn with_log_path(mut self, path: Option<PathBuf>) -> Self {
        self.log_path = path;
        self
    }

    /// Create config from environment variables.
    ///
    /// - `CAMPAIGN_API_URL` - backend base URL
    /// - `CAMPAIGN_STREAM_TIMEOUT_SECS` - inactivity timeout in seconds,
    ///   `0` disables it
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("CAMPAIGN_API_URL") {
            if !url.is_empty() {
                config.base_url = url.trim_end_matches('/').to_string();
            }
        }

        if let Ok(raw) = std::env::var("CAMPAIGN_STREAM_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(0) => config.stream_timeout = None,
                Ok(secs) => config.stream_timeout = Some(Duration::from_secs(secs)),
                Err(_) => {
                    tracing::warn!(value = %raw, "ignoring invalid CAMPAIGN_STREAM_TIMEOUT_SECS");
                }
            }
        }

        config
    }
}

/// Default log location: ~/.campaign-tui/campaign-tui.log
fn default_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".campaign-tui").join("campaign-tui.log"))
}
