//! Keyway HTTP pull client.
//!
//! One GET per pull, bounded by a hard timeout. The response is normalized
//! into a [`PullResponse`] or a typed [`KeywayError`]; content negotiation
//! accepts the enveloped and flat JSON shapes and falls back to treating
//! the body verbatim as `.env` text, because the remote may be a mock, a
//! proxy, or a plain static responder.

use crate::{
    config::ClientConfig,
    error::{ApiError, KeywayError, KeywayResult},
    types::{ProblemDetails, PullRequest, PullResponse, SuccessBody},
};
use reqwest::{Client, header};
use secrecy::ExposeSecret;
use tracing::{debug, instrument, warn};

const INVALID_SHAPE_MESSAGE: &str =
    "Unexpected API response format. Expected { data: { content } } or { content }";

/// Client for the Keyway vault pull endpoint.
pub struct KeywayClient {
    config: ClientConfig,
    http: Client,
}

impl KeywayClient {
    /// Create a new pull client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> KeywayResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .use_rustls_tls()
            .build()?;

        Ok(Self { config, http })
    }

    /// Pull the secrets blob for one repository/environment pair.
    ///
    /// Single attempt: timeouts and transport failures are terminal here.
    /// Retry policy, if any, belongs to the caller.
    ///
    /// # Errors
    ///
    /// Fails with [`KeywayError::Timeout`] when the bound is exceeded,
    /// [`KeywayError::Transport`] when no HTTP response was received,
    /// [`KeywayError::Api`] for any status >= 400, and
    /// [`KeywayError::InvalidResponse`] when a structured success body
    /// matches neither accepted shape.
    #[instrument(
        skip(self, request),
        fields(repository = %request.repository, environment = %request.environment)
    )]
    pub async fn pull(&self, request: &PullRequest) -> KeywayResult<PullResponse> {
        let url = format!("{}/v1/secrets/pull", self.config.base_url);

        debug!("Pulling secrets");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("repo", request.repository.as_str()),
                ("environment", request.environment.as_str()),
            ])
            .bearer_auth(request.access_token.expose_secret())
            .send()
            .await
            .map_err(|e| self.network_error(e))?;

        let status = response.status();
        let structured = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("application/json"));

        // Single read; no streaming.
        let body = response.text().await.map_err(|e| self.network_error(e))?;

        if !status.is_success() {
            let err = error_from_response(status.as_u16(), structured, &body);
            warn!(status = status.as_u16(), "Pull failed");
            return Err(err);
        }

        debug!(status = status.as_u16(), bytes = body.len(), "Pull succeeded");
        Ok(PullResponse {
            content: decode_success(structured, body)?,
        })
    }

    fn network_error(&self, err: reqwest::Error) -> KeywayError {
        if err.is_timeout() {
            KeywayError::Timeout(self.config.timeout)
        } else {
            KeywayError::Transport(err)
        }
    }
}

/// Decode a 2xx body into the content string.
///
/// Shape matchers in priority order: enveloped JSON, flat JSON, raw text.
/// Valid JSON in neither recognized shape is an error; invalid JSON under a
/// JSON content type degrades to the raw-text fallback.
fn decode_success(structured: bool, body: String) -> KeywayResult<String> {
    if body.is_empty() {
        return Ok(String::new());
    }

    if structured {
        match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(value) => {
                let parsed: SuccessBody = serde_json::from_value(value)
                    .map_err(|_| KeywayError::invalid_response(INVALID_SHAPE_MESSAGE))?;
                return Ok(parsed.into_content());
            }
            Err(_) => {
                debug!("Content type claimed JSON but body did not parse; using raw text");
            }
        }
    }

    Ok(body)
}

/// Normalize a non-2xx response into an [`ApiError`].
fn error_from_response(status: u16, structured: bool, body: &str) -> KeywayError {
    if structured {
        if let Ok(problem) = serde_json::from_str::<ProblemDetails>(body) {
            return KeywayError::Api(ApiError {
                status,
                kind: problem.title.unwrap_or_else(|| "Error".to_string()),
                message: problem.detail.unwrap_or_else(|| format!("HTTP {status}")),
                upgrade_url: problem.upgrade_url,
            });
        }
    }

    KeywayError::Api(ApiError {
        status,
        kind: "Error".to_string(),
        message: if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body.to_string()
        },
        upgrade_url: None,
    })
}
