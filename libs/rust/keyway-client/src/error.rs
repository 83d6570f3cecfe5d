//! Pull client error types using thiserror 2.0.
//!
//! Every pull attempt fails with exactly one of four terminal kinds:
//! timeout, transport failure, API error (an HTTP response with status
//! >= 400), or an unrecognized success payload. None are retried by the
//! client itself; the `is_retryable` classification is advice for callers.

use std::time::Duration;
use thiserror::Error;

/// Error payload carried by an HTTP response with status >= 400.
///
/// Status distinctions (401/403/404/429/5xx) are preserved so callers can
/// map them to differentiated guidance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code of the response
    pub status: u16,
    /// Error kind label from the problem-details `title`, or "Error"
    pub kind: String,
    /// Human-readable detail, or a synthesized "HTTP {status}"
    pub message: String,
    /// Plan upgrade URL, passed through when the service sends one
    pub upgrade_url: Option<String>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (HTTP {}): {}", self.kind, self.status, self.message)
    }
}

/// Pull client errors.
#[derive(Error, Debug)]
pub enum KeywayError {
    /// No response within the configured bound
    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    /// Connection-level failure with no HTTP status available
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// HTTP response received with status >= 400
    #[error("{0}")]
    Api(ApiError),

    /// Success response body in neither recognized shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Repository identifier not in owner/repo form
    #[error("Invalid repository \"{0}\": expected owner/repo format")]
    InvalidRepository(String),

    /// HTTP client construction failed
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type for pull operations.
pub type KeywayResult<T> = Result<T, KeywayError>;

impl KeywayError {
    /// Check if error is retryable.
    ///
    /// The client itself never retries; this classifies transient failures
    /// for callers that layer their own policy on top.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::Transport(_) => true,
            Self::Api(api) => api.status == 429 || api.status >= 500,
            _ => false,
        }
    }

    /// Create an API error from response parts.
    #[must_use]
    pub fn api(status: u16, kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api(ApiError {
            status,
            kind: kind.into(),
            message: message.into(),
            upgrade_url: None,
        })
    }

    /// Create an invalid response error.
    #[must_use]
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// HTTP status code, when an HTTP response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api(api) => Some(api.status),
            _ => None,
        }
    }
}
