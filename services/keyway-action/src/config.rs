//! Workflow input parsing.
//!
//! The runner exposes action inputs as `INPUT_<NAME>` environment
//! variables, uppercased with spaces turned into underscores. Parsing goes
//! through an injectable lookup so tests never touch the process
//! environment.

use crate::error::ActionError;
use keyway_client::config::DEFAULT_BASE_URL;
use secrecy::SecretString;
use std::env;
use std::path::PathBuf;

/// Parsed action inputs. Constructed once per invocation.
#[derive(Debug)]
pub struct ActionInputs {
    /// Keyway access token
    pub token: SecretString,
    /// Environment name (default: "production")
    pub environment: String,
    /// Repository in owner/repo form
    pub repository: String,
    /// Export parsed secrets into the workflow environment
    pub export_env: bool,
    /// Mask secret values in the runner log
    pub mask_values: bool,
    /// Optional path to write the raw blob to
    pub env_file: Option<PathBuf>,
    /// Keyway API base URL
    pub api_url: String,
}

impl ActionInputs {
    /// Load inputs from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a required input is missing or a boolean input
    /// is malformed.
    pub fn from_env() -> Result<Self, ActionError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load inputs through the given variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a required input is missing or a boolean input
    /// is malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ActionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = input(&lookup, "token")
            .ok_or_else(|| ActionError::config("Input required and not supplied: token"))?;

        let repository = input(&lookup, "repository")
            .or_else(|| lookup("GITHUB_REPOSITORY").filter(|v| !v.is_empty()))
            .ok_or_else(|| {
                ActionError::config(
                    "Repository not specified and GITHUB_REPOSITORY environment variable not set. \
                     Please provide the repository input in owner/repo format.",
                )
            })?;

        Ok(Self {
            token: SecretString::from(token),
            environment: input(&lookup, "environment")
                .unwrap_or_else(|| "production".to_string()),
            repository,
            export_env: bool_input(&lookup, "export-env", true)?,
            mask_values: bool_input(&lookup, "mask-values", true)?,
            env_file: input(&lookup, "env-file").map(PathBuf::from),
            api_url: input(&lookup, "api-url").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }
}

/// Read one input; empty values count as unset.
fn input<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let variable = format!("INPUT_{}", name.replace(' ', "_").to_uppercase());
    lookup(&variable).filter(|v| !v.is_empty())
}

/// Read a boolean input, case-insensitively.
fn bool_input<F>(lookup: &F, name: &str, default: bool) -> Result<bool, ActionError>
where
    F: Fn(&str) -> Option<String>,
{
    match input(lookup, name) {
        None => Ok(default),
        Some(raw) => match raw.trim().to_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(ActionError::config(format!(
                "Input \"{name}\" must be \"true\" or \"false\", got \"{raw}\""
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let inputs = ActionInputs::from_lookup(lookup_from(&[
            ("INPUT_TOKEN", "kw_token"),
            ("GITHUB_REPOSITORY", "owner/repo"),
        ]))
        .unwrap();

        assert_eq!(inputs.token.expose_secret(), "kw_token");
        assert_eq!(inputs.environment, "production");
        assert_eq!(inputs.repository, "owner/repo");
        assert!(inputs.export_env);
        assert!(inputs.mask_values);
        assert!(inputs.env_file.is_none());
        assert_eq!(inputs.api_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_explicit_inputs_override_fallbacks() {
        let inputs = ActionInputs::from_lookup(lookup_from(&[
            ("INPUT_TOKEN", "kw_token"),
            ("INPUT_ENVIRONMENT", "staging"),
            ("INPUT_REPOSITORY", "acme/widgets"),
            ("INPUT_EXPORT-ENV", "false"),
            ("INPUT_MASK-VALUES", "False"),
            ("INPUT_ENV-FILE", ".env.pulled"),
            ("INPUT_API-URL", "http://localhost:8080"),
            ("GITHUB_REPOSITORY", "other/repo"),
        ]))
        .unwrap();

        assert_eq!(inputs.environment, "staging");
        assert_eq!(inputs.repository, "acme/widgets");
        assert!(!inputs.export_env);
        assert!(!inputs.mask_values);
        assert_eq!(inputs.env_file, Some(PathBuf::from(".env.pulled")));
        assert_eq!(inputs.api_url, "http://localhost:8080");
    }

    #[test]
    fn test_missing_token_rejected() {
        let err = ActionInputs::from_lookup(lookup_from(&[("GITHUB_REPOSITORY", "owner/repo")]))
            .unwrap_err();
        assert!(err.to_string().contains("token"));
    }

    #[test]
    fn test_missing_repository_rejected() {
        let err =
            ActionInputs::from_lookup(lookup_from(&[("INPUT_TOKEN", "kw_token")])).unwrap_err();
        assert!(err.to_string().contains("GITHUB_REPOSITORY"));
    }

    #[test]
    fn test_empty_input_counts_as_unset() {
        let inputs = ActionInputs::from_lookup(lookup_from(&[
            ("INPUT_TOKEN", "kw_token"),
            ("INPUT_REPOSITORY", ""),
            ("INPUT_ENVIRONMENT", ""),
            ("GITHUB_REPOSITORY", "owner/repo"),
        ]))
        .unwrap();
        assert_eq!(inputs.repository, "owner/repo");
        assert_eq!(inputs.environment, "production");
    }

    #[test]
    fn test_malformed_boolean_rejected() {
        let err = ActionInputs::from_lookup(lookup_from(&[
            ("INPUT_TOKEN", "kw_token"),
            ("GITHUB_REPOSITORY", "owner/repo"),
            ("INPUT_EXPORT-ENV", "yes"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("export-env"));
    }
}
