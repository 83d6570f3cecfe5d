//! Keyway workflow action entry point.

use keyway_action::commands::{GithubCommands, WorkflowCommands};
use keyway_action::config::ActionInputs;
use keyway_action::error::ActionError;
use keyway_action::run::{failure_message, run};
use keyway_client::{ClientConfig, KeywayClient};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Diagnostics go to stderr; stdout carries runner commands.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut commands = GithubCommands::from_env();

    if let Err(err) = execute(&mut commands).await {
        error!(%err, "Action failed");
        commands.set_failed(&failure_message(&err));
        std::process::exit(1);
    }
}

async fn execute(commands: &mut dyn WorkflowCommands) -> Result<(), ActionError> {
    let inputs = ActionInputs::from_env()?;

    info!(
        repository = %inputs.repository,
        environment = %inputs.environment,
        "Starting Keyway pull"
    );

    let client = KeywayClient::new(ClientConfig::new(inputs.api_url.clone()))?;
    run(&inputs, &client, commands).await
}
