//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Infra(e) => match e {
                InfraError::Terminal { .. } => crate::exitcode::IOERR,
                InfraError::Application(app) => match app {
                    ApplicationError::Domain(DomainError::UnknownSection(_)) => {
                        crate::exitcode::USAGE
                    }
                    ApplicationError::Domain(DomainError::MalformedDocument { .. }) => {
                        crate::exitcode::DATAERR
                    }
                    ApplicationError::DaemonUnavailable { .. } => crate::exitcode::UNAVAILABLE,
                    ApplicationError::UnknownNode(_) => crate::exitcode::NOHOST,
                    ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                    ApplicationError::CommandFailed { .. }
                    | ApplicationError::OperationFailed { .. } => crate::exitcode::SOFTWARE,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_daemon_failure_when_mapping_exit_code_then_unavailable() {
        let err: CliError = ApplicationError::DaemonUnavailable {
            command: "cibadmin --query".into(),
            reason: "no output".into(),
        }
        .into();
        assert_eq!(err.exit_code(), crate::exitcode::UNAVAILABLE);
    }

    #[test]
    fn given_broken_stdout_when_mapping_exit_code_then_ioerr() {
        let err: CliError = InfraError::terminal(
            "write completion script",
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "broken pipe"),
        )
        .into();
        assert_eq!(err.exit_code(), crate::exitcode::IOERR);
        assert!(err.to_string().contains("write completion script"));
    }

    #[test]
    fn given_unknown_section_when_mapping_exit_code_then_usage() {
        let err: CliError =
            ApplicationError::from(DomainError::UnknownSection("bogus".into())).into();
        assert_eq!(err.exit_code(), crate::exitcode::USAGE);
        assert!(err.to_string().contains("bogus"));
    }
}
