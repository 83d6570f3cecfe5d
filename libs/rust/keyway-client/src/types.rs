//! Request, response, and wire types for the pull endpoint.

use crate::error::{KeywayError, KeywayResult};
use secrecy::SecretString;
use serde::Deserialize;
use std::collections::HashMap;

/// Decoded secrets mapping. Keys are case-sensitive and unique; later
/// duplicates in the source text overwrite earlier ones.
pub type SecretsMap = HashMap<String, String>;

/// Inputs for one pull attempt. Constructed once per invocation.
#[derive(Clone)]
pub struct PullRequest {
    /// Repository in owner/repo form
    pub repository: String,
    /// Environment name (e.g. "production")
    pub environment: String,
    /// Opaque access token, never logged
    pub access_token: SecretString,
}

impl PullRequest {
    /// Build a pull request, validating the repository identifier.
    ///
    /// # Errors
    ///
    /// Returns [`KeywayError::InvalidRepository`] unless `repository` is in
    /// owner/repo form: exactly one `/` with a non-empty name on each side.
    pub fn new(
        repository: impl Into<String>,
        environment: impl Into<String>,
        access_token: SecretString,
    ) -> KeywayResult<Self> {
        let repository = repository.into();

        let mut parts = repository.splitn(3, '/');
        let owner = parts.next().unwrap_or_default();
        let name = parts.next().unwrap_or_default();
        if owner.is_empty() || name.is_empty() || parts.next().is_some() {
            return Err(KeywayError::InvalidRepository(repository));
        }

        Ok(Self {
            repository,
            environment: environment.into(),
            access_token,
        })
    }
}

impl std::fmt::Debug for PullRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PullRequest")
            .field("repository", &self.repository)
            .field("environment", &self.environment)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// Raw content blob exactly as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullResponse {
    /// Undecoded `.env`-format text
    pub content: String,
}

/// Structured success body. The two recognized JSON shapes, tried in
/// priority order; a plain-text body falls through to neither and is taken
/// verbatim by the client.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SuccessBody {
    /// Wrapped shape: `{"data":{"content":"..."}}`
    Enveloped {
        /// Payload wrapper
        data: PullPayload,
    },
    /// Flat shape: `{"content":"..."}`
    Flat {
        /// Raw content blob
        content: String,
    },
}

impl SuccessBody {
    /// Extract the content string from either shape.
    #[must_use]
    pub fn into_content(self) -> String {
        match self {
            Self::Enveloped { data } => data.content,
            Self::Flat { content } => content,
        }
    }
}

/// Inner payload of the enveloped success shape.
#[derive(Debug, Deserialize)]
pub struct PullPayload {
    /// Raw content blob
    pub content: String,
}

/// RFC7807-like error body. All fields optional.
#[derive(Debug, Default, Deserialize)]
pub struct ProblemDetails {
    /// Error type URI
    #[serde(rename = "type")]
    pub type_uri: Option<String>,
    /// Short error label
    pub title: Option<String>,
    /// Status echoed in the body
    pub status: Option<u16>,
    /// Human-readable detail
    pub detail: Option<String>,
    /// Plan upgrade URL (403 responses)
    #[serde(rename = "upgradeUrl")]
    pub upgrade_url: Option<String>,
}
