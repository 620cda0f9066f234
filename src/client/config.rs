//! Client configuration.

use std::env;
use std::time::Duration;

/// Where the stats service lives and how long a single call may take.
///
/// # Environment Variables
///
/// - `STATS_SERVER_URL` - Base URL (default: `http://localhost:9090`)
/// - `STATS_CLIENT_TIMEOUT_MS` - Per-request timeout in milliseconds (default: 2000)
#[derive(Debug, Clone)]
pub struct StatsClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl StatsClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_millis(2000),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Loads the client configuration, falling back to defaults for unset
    /// or unparsable variables.
    pub fn from_env() -> Self {
        let base_url =
            env::var("STATS_SERVER_URL").unwrap_or_else(|_| "http://localhost:9090".to_string());

        let timeout_ms = env::var("STATS_CLIENT_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(2000);

        Self::new(base_url).with_timeout(Duration::from_millis(timeout_ms))
    }
}

impl Default for StatsClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:9090")
    }
}
