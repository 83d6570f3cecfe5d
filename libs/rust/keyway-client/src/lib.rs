//! Keyway pull client.
//!
//! Fetches a repository's secrets blob from the Keyway vault service and
//! decodes `.env`-format content into key/value pairs.

pub mod client;
pub mod config;
pub mod envfile;
pub mod error;
pub mod types;

pub use client::KeywayClient;
pub use config::ClientConfig;
pub use error::{ApiError, KeywayError, KeywayResult};
pub use types::{PullRequest, PullResponse, SecretsMap};
