//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("cluster daemon unavailable ({command}): {reason}")]
    DaemonUnavailable { command: String, reason: String },

    #[error("unknown cluster node: {0}")]
    UnknownNode(String),

    #[error("command failed ({command}): {message}")]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
        message: String,
    },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
