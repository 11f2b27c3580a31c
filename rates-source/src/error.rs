//! Failure classification for a single upstream request.

use reqwest::StatusCode;

/// Why one attempt against the upstream API produced no quote.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Transport error: {0}")]
    Transport(reqwest::Error),

    #[error("Upstream returned HTTP {0}")]
    Status(StatusCode),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Alpha Vantage answers throttling and bad requests with HTTP 200 and a
    /// message field instead of data.
    #[error("Upstream reported: {0}")]
    Upstream(String),
}

impl FetchError {
    /// Returns true for failures a retry might fix: network trouble, 5xx and 408.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(err) => !(err.is_builder() || err.is_decode()),
            Self::Status(status) => {
                status.is_server_error() || *status == StatusCode::REQUEST_TIMEOUT
            }
            Self::Parse(_) | Self::Upstream(_) => false,
        }
    }
}

// The request URL carries the API key, so it is stripped before the error
// can reach a log line.
impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.without_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_errors_are_transient() {
        for code in [500, 502, 503, 504] {
            let err = FetchError::Status(StatusCode::from_u16(code).unwrap());
            assert!(err.is_transient(), "HTTP {} should be retried", code);
        }
    }

    #[test]
    fn test_request_timeout_is_transient() {
        assert!(FetchError::Status(StatusCode::REQUEST_TIMEOUT).is_transient());
    }

    #[test]
    fn test_client_errors_are_not_transient() {
        for code in [400, 401, 403, 404, 429] {
            let err = FetchError::Status(StatusCode::from_u16(code).unwrap());
            assert!(!err.is_transient(), "HTTP {} should not be retried", code);
        }
    }

    #[test]
    fn test_payload_errors_are_not_transient() {
        assert!(!FetchError::Parse("expected value".into()).is_transient());
        assert!(!FetchError::Upstream("API call frequency exceeded".into()).is_transient());
    }
}
