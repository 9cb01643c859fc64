//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// lookups, stock rules). Transport concerns belong in the API layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. a negative quantity).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A requested record was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// A stock movement asked for more than the source holds.
    #[error(
        "insufficient stock in {warehouse}: requested {requested}, available {available}"
    )]
    InsufficientStock {
        warehouse: String,
        requested: u64,
        available: u64,
    },

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// A conflict occurred (e.g. a record that must be unique already exists).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn insufficient_stock(
        warehouse: impl Into<String>,
        requested: u64,
        available: u64,
    ) -> Self {
        Self::InsufficientStock {
            warehouse: warehouse.into(),
            requested,
            available,
        }
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Stable machine-readable category, used by transports as an error code.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation(_) => "VALIDATION_ERROR",
            DomainError::NotFound(_) => "NOT_FOUND",
            DomainError::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            DomainError::InvariantViolation(_) => "INVARIANT_VIOLATION",
            DomainError::Conflict(_) => "CONFLICT",
        }
    }
}
