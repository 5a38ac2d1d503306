use std::time::Duration;

use crate::error_handler::{ConfigError, validate_http_endpoint};

/// Fixed address of the analytics agent backend.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000";

/// Path appended to the endpoint for every query.
pub const ASK_PATH: &str = "/ask";

/// Configuration for [`crate::HttpAskService`].
///
/// # Fields
///
/// - `endpoint`: Base URL of the backend (scheme + host + port).
/// - `timeout_secs`: Optional request timeout. `None` means the request waits
///   until the backend answers or the connection fails.
///
/// # Examples
///
/// ```
/// use ask_client::AskClientConfig;
///
/// let cfg = AskClientConfig::default();
/// assert_eq!(cfg.ask_url(), "http://127.0.0.1:8000/ask");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskClientConfig {
    /// Backend base URL.
    pub endpoint: String,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}

impl Default for AskClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: None,
        }
    }
}

impl AskClientConfig {
    /// Config pointing at an explicit endpoint, without a timeout.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout_secs: None,
        }
    }

    /// Validates the endpoint scheme.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidFormat`] if the endpoint is not http/https.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_http_endpoint("endpoint", &self.endpoint)
    }

    /// Full URL of the `/ask` route.
    pub fn ask_url(&self) -> String {
        format!("{}{ASK_PATH}", self.endpoint.trim().trim_end_matches('/'))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
