use std::time::Duration;

/// Configuration for the Logframe HTTP API client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the Logframe API (e.g. "https://api.logframe.app").
    pub base_url: String,
    /// Optional per-request timeout applied to the underlying HTTP client.
    pub timeout: Option<Duration>,
}

impl ApiConfig {
    /// Create a new config with just a base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
