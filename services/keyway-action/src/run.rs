//! The action's run step: pull, parse, mask, export, report.

use crate::commands::WorkflowCommands;
use crate::config::ActionInputs;
use crate::error::ActionError;
use keyway_client::{KeywayClient, KeywayError, PullRequest, envfile};
use std::path::Path;
use tracing::{debug, info};

/// Execute one pull and route the results through the runner capabilities.
///
/// # Errors
///
/// Returns the first terminal failure: invalid inputs, a failed pull, or a
/// write failure against the runner files or the secrets file.
pub async fn run(
    inputs: &ActionInputs,
    client: &KeywayClient,
    commands: &mut dyn WorkflowCommands,
) -> Result<(), ActionError> {
    let request = PullRequest::new(
        inputs.repository.clone(),
        inputs.environment.clone(),
        inputs.token.clone(),
    )?;

    commands.info(&format!(
        "Pulling secrets from Keyway for {} ({})",
        inputs.repository, inputs.environment
    ));

    let response = client.pull(&request).await?;
    let secrets = envfile::parse(&response.content);
    let count = secrets.len();

    if count == 0 {
        commands.warning(&format!(
            "No secrets found for {} in environment \"{}\"",
            inputs.repository, inputs.environment
        ));
    } else {
        commands.info(&format!("Retrieved {count} secret{}", plural(count)));
    }

    if inputs.mask_values {
        for value in secrets.values().filter(|v| !v.is_empty()) {
            commands.mask_value(value);
        }
    }

    if inputs.export_env {
        for (key, value) in &secrets {
            commands.export_variable(key, value)?;
        }
        commands.info(&format!(
            "Exported {count} secret{} to environment",
            plural(count)
        ));
    }

    if let Some(path) = &inputs.env_file {
        // The raw blob goes to disk, not the re-serialized mapping.
        write_env_file(path, &response.content).await?;
        commands.info(&format!("Wrote secrets to {}", path.display()));
    }

    commands.set_output("secrets-count", &count.to_string())?;
    commands.set_output("environment", &inputs.environment)?;

    debug!(count, "Run step complete");
    Ok(())
}

/// Translate a terminal failure into user-facing guidance.
#[must_use]
pub fn failure_message(err: &ActionError) -> String {
    match err {
        ActionError::Client(KeywayError::Api(api)) => match api.status {
            401 => {
                "Authentication failed. Please check your KEYWAY_TOKEN is valid and not expired."
                    .to_string()
            }
            403 => {
                let mut message = format!("Access denied: {}", api.message);
                if let Some(url) = &api.upgrade_url {
                    message.push_str(&format!("\nUpgrade your plan: {url}"));
                }
                message
            }
            404 => "Vault not found. Make sure the vault is initialized for this repository. \
                    Run \"keyway init\" locally first."
                .to_string(),
            _ => format!("API Error ({}): {}", api.status, api.message),
        },
        other => other.to_string(),
    }
}

async fn write_env_file(path: &Path, content: &str) -> Result<(), ActionError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(path, content).await?;
    info!(path = %path.display(), "Secrets file written");
    Ok(())
}

const fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
