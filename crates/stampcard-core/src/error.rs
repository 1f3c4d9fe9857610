//! # Error Types
//!
//! Domain-specific error types for stampcard-core.
//!
//! ## Error Hierarchy
//! ```text
//! stampcard-core errors (this file)
//! ├── CoreError        - Business rule violations
//! └── ValidationError  - Input validation failures
//!
//! stampcard-db errors (separate crate)
//! └── DbError          - Store operation failures
//!
//! apps/server
//! └── ApiError         - What API callers see (serialized)
//!
//! Flow: ValidationError → CoreError → DbError → ApiError → client
//! ```
//!
//! The taxonomy is explicit so callers can distinguish not-found, validation
//! failure and store-unavailable conditions.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Customer cannot be found (or is soft-deleted and the operation
    /// requires an active record).
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// Redeem attempted before the stamp wheel is full.
    ///
    /// ## When This Occurs
    /// The redeem transition is only offered at a full wheel; a stale client
    /// can still submit it early, so the ledger enforces the gate itself.
    #[error("Reward locked: {stamps} of {required} stamps collected")]
    RewardLocked { stamps: i64, required: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when user input doesn't meet requirements. Used for early
/// validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., non-numeric mobile, malformed member code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::RewardLocked {
            stamps: 3,
            required: 5,
        };
        assert_eq!(err.to_string(), "Reward locked: 3 of 5 stamps collected");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
