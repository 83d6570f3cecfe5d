//! Action-level error types.

use keyway_client::KeywayError;
use thiserror::Error;

/// Errors terminal for one action invocation.
#[derive(Error, Debug)]
pub enum ActionError {
    /// Missing or malformed workflow input
    #[error("Configuration error: {0}")]
    Config(String),

    /// Environment-file or secrets-file write failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Pull attempt failed
    #[error(transparent)]
    Client(#[from] KeywayError),
}

impl ActionError {
    /// Create a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
