//! Workflow runner command capabilities.
//!
//! The run step talks to the runner only through [`WorkflowCommands`], so
//! it stays a pure function of its inputs. [`GithubCommands`] is the
//! production implementation speaking the runner protocol: environment
//! files for variables and outputs, `::command::` lines on stdout for
//! masking and log annotations.

use crate::error::ActionError;
use std::env;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use uuid::Uuid;

/// Side-effecting capabilities the run step needs from the runner.
pub trait WorkflowCommands {
    /// Export a variable to subsequent workflow steps.
    ///
    /// # Errors
    ///
    /// Returns an error if the runner environment file cannot be written.
    fn export_variable(&mut self, key: &str, value: &str) -> Result<(), ActionError>;

    /// Set a step output.
    ///
    /// # Errors
    ///
    /// Returns an error if the runner output file cannot be written.
    fn set_output(&mut self, name: &str, value: &str) -> Result<(), ActionError>;

    /// Register a value to be masked in the runner log.
    fn mask_value(&mut self, value: &str);

    /// Informational log line.
    fn info(&mut self, message: &str);

    /// Warning annotation.
    fn warning(&mut self, message: &str);

    /// Error annotation marking the step as failed.
    fn set_failed(&mut self, message: &str);
}

/// Runner-protocol implementation backed by the `GITHUB_ENV` and
/// `GITHUB_OUTPUT` files and a stdout-style log writer.
pub struct GithubCommands<W> {
    env_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
    log: W,
}

impl GithubCommands<io::Stdout> {
    /// Build from the process environment, logging to stdout.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(
            env::var_os("GITHUB_ENV").map(PathBuf::from),
            env::var_os("GITHUB_OUTPUT").map(PathBuf::from),
            io::stdout(),
        )
    }
}

impl<W: Write> GithubCommands<W> {
    /// Build with explicit file targets and log writer.
    pub const fn new(env_file: Option<PathBuf>, output_file: Option<PathBuf>, log: W) -> Self {
        Self {
            env_file,
            output_file,
            log,
        }
    }
}

impl<W: Write> WorkflowCommands for GithubCommands<W> {
    fn export_variable(&mut self, key: &str, value: &str) -> Result<(), ActionError> {
        append_record(self.env_file.as_ref(), "GITHUB_ENV", key, value)
    }

    fn set_output(&mut self, name: &str, value: &str) -> Result<(), ActionError> {
        append_record(self.output_file.as_ref(), "GITHUB_OUTPUT", name, value)
    }

    fn mask_value(&mut self, value: &str) {
        let _unused = writeln!(self.log, "::add-mask::{}", escape_data(value));
    }

    fn info(&mut self, message: &str) {
        let _unused = writeln!(self.log, "{message}");
    }

    fn warning(&mut self, message: &str) {
        let _unused = writeln!(self.log, "::warning::{}", escape_data(message));
    }

    fn set_failed(&mut self, message: &str) {
        let _unused = writeln!(self.log, "::error::{}", escape_data(message));
    }
}

/// Append one `key<<delimiter` heredoc record, so multiline values
/// survive the runner's line-oriented file format.
fn append_record(
    path: Option<&PathBuf>,
    variable: &str,
    key: &str,
    value: &str,
) -> Result<(), ActionError> {
    let path = path
        .ok_or_else(|| ActionError::config(format!("{variable} environment variable is not set")))?;

    let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
    if key.contains(&delimiter) || value.contains(&delimiter) {
        return Err(ActionError::config(format!(
            "Unexpected input: name or value contains delimiter \"{delimiter}\""
        )));
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{key}<<{delimiter}")?;
    writeln!(file, "{value}")?;
    writeln!(file, "{delimiter}")?;
    Ok(())
}

/// Escape command data per the runner protocol.
fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
