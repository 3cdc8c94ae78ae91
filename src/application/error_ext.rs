//! Error conversion helpers for external command execution
//!
//! Provides extension traits for cleaner error handling with command context.

use std::io;
use std::process::Output;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add the command line to a spawn error.
    ///
    /// # Example
    /// ```ignore
    /// cmd.run("crm_mon", &["--one-shot"])
    ///     .with_command_context("crm_mon --one-shot")?;
    /// ```
    fn with_command_context(self, command: &str) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_command_context(self, command: &str) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("run {}", command),
            source: Box::new(e),
        })
    }
}

/// Extension trait turning a finished process into its stdout text.
pub trait OutputExt {
    /// Stdout as text, or [`ApplicationError::CommandFailed`] on non-zero exit.
    fn into_stdout(self, command: &str) -> ApplicationResult<String>;
}

impl OutputExt for Output {
    fn into_stdout(self, command: &str) -> ApplicationResult<String> {
        if !self.status.success() {
            let stderr = String::from_utf8_lossy(&self.stderr).trim().to_string();
            return Err(ApplicationError::CommandFailed {
                command: command.to_string(),
                exit_code: self.status.code(),
                message: if stderr.is_empty() {
                    format!("exited with {}", self.status)
                } else {
                    stderr
                },
            });
        }
        Ok(String::from_utf8_lossy(&self.stdout).into_owned())
    }
}
