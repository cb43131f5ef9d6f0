//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business/domain failures (validation,
/// uniqueness, state rules). `Storage` is the single escape hatch for
/// infrastructure faults so callers can keep client-caused and server-caused
/// outcomes apart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An input field failed validation (malformed, missing, out of bounds).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The referenced product does not exist for this tenant.
    #[error("not found")]
    NotFound,

    /// A uniqueness rule rejected the input (e.g. duplicate nome).
    #[error("conflict: {0}")]
    Conflict(String),

    /// A lifecycle rule rejected the transition (e.g. delete on an active product).
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A conditional write affected zero rows after every prior check passed.
    /// The race was lost; the caller decides how to report it.
    #[error("no rows affected: {0}")]
    NoOp(String),

    /// Infrastructure failure underneath the repository.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn no_op(msg: impl Into<String>) -> Self {
        Self::NoOp(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
