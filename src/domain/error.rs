//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent problems with the CIB document or its addressing.
/// These are independent of how the document was obtained.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("malformed CIB document: {reason}")]
    MalformedDocument { reason: String },

    #[error("unknown section '{0}' (expected one of: nodes, resources, constraints, crm_config, rsc_defaults, op_defaults, status)")]
    UnknownSection(String),
}

impl DomainError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            reason: reason.into(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
