//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures. Every
/// validation failure is raised before any mutation; the caller (presentation
/// layer) decides user-facing messaging.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. blank name, malformed id).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced entity does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A receipt named an existing item under a different category.
    /// Item categories are immutable once chosen.
    #[error("item '{name}' already registered under category '{existing}', refused '{requested}'")]
    CategoryConflict {
        name: String,
        existing: String,
        requested: String,
    },

    /// A non-positive quantity where a positive one is required, or a
    /// quantity counter that would overflow.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// A storage-level uniqueness constraint was violated. Indicates a logic
    /// defect in the caller, not a user error.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// The storage layer itself failed (e.g. poisoned lock).
    #[error("storage failure: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound(entity)
    }

    pub fn category_conflict(
        name: impl Into<String>,
        existing: impl Into<String>,
        requested: impl Into<String>,
    ) -> Self {
        Self::CategoryConflict {
            name: name.into(),
            existing: existing.into(),
            requested: requested.into(),
        }
    }

    pub fn invalid_quantity(msg: impl Into<String>) -> Self {
        Self::InvalidQuantity(msg.into())
    }

    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::ConstraintViolation(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
