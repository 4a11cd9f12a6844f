//! Data client configuration.

use std::time::Duration;

use crate::error::ApiError;

/// Base address used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings shared by every data client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base address of the REST API, e.g. `http://localhost:8080/api`
    pub base_url: String,
    /// Upper bound on one request/response exchange
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ApiError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ApiError::InvalidConfig(format!(
                "base_url '{}' must start with http:// or https://",
                self.base_url
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(ApiError::InvalidConfig(
                "request_timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
