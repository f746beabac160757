//! # AppError
//!
//! Centralized error handling for the Vidboard core.
//! Maps store and use-case failures to actionable error types.

use thiserror::Error;

/// The primary error type for all domain, store and service operations.
///
/// Lookups of a missing entity are not errors: read paths return `Option`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// A write targeted an identity the store does not hold (e.g. `update`)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// A create referenced an Account or Video that does not resolve
    #[error("referenced {0} not found with ID {1}")]
    ReferenceNotFound(String, String),

    /// Validation failure (e.g. blank comment text, blank video title)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Resource already exists (e.g. username taken, ignoring case)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Broken invariant inside an adapter
    #[error("internal service error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(kind: &str, id: impl ToString) -> Self {
        Self::NotFound(kind.to_string(), id.to_string())
    }

    pub fn reference_not_found(kind: &str, id: impl ToString) -> Self {
        Self::ReferenceNotFound(kind.to_string(), id.to_string())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}

/// A specialized Result type for Vidboard logic.
pub type Result<T> = std::result::Result<T, AppError>;
