//! Errors raised while wiring services or talking to the terminal

use thiserror::Error;

use crate::application::ApplicationError;

#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Writing generated output (completion scripts) to stdout failed.
    #[error("cannot {action}: {source}")]
    Terminal {
        action: String,
        #[source]
        source: std::io::Error,
    },
}

impl InfraError {
    pub fn terminal(action: impl Into<String>, source: std::io::Error) -> Self {
        Self::Terminal {
            action: action.into(),
            source,
        }
    }
}

pub type InfraResult<T> = Result<T, InfraError>;
