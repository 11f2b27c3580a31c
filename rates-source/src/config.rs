//! Adapter configuration.

use std::fmt;
use std::time::Duration;

use crate::retry::RetryPolicy;

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for [`crate::AlphaVantageSource`].
///
/// `api_key` is optional here so that a missing credential is reported by
/// the adapter constructor, not by whatever parsed the environment.
#[derive(Clone)]
pub struct SourceConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub retry: RetryPolicy,
    pub timeout: Duration,
}

impl SourceConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: Some(api_key.into()),
            retry: RetryPolicy::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("retry", &self.retry)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Startup failures. These are fatal, unlike per-request [`crate::FetchError`]s.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Alpha Vantage API key is not configured")]
    MissingApiKey,

    #[error("Invalid Alpha Vantage base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
