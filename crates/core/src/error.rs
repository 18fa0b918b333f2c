//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Deterministic, business-level failures only. Storage and transport
/// failures have their own error types in the crates that own them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field was missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// An identifier could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
