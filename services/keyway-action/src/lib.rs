//! Keyway workflow action.
//!
//! Pulls a repository's secrets blob from the Keyway vault, decodes it,
//! masks the values, and exports them into the calling workflow via the
//! runner's environment-file and stdout command protocol.

pub mod commands;
pub mod config;
pub mod error;
pub mod run;

pub use commands::{GithubCommands, WorkflowCommands};
pub use config::ActionInputs;
pub use error::ActionError;
pub use run::{failure_message, run};
