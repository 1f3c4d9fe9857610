//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ValidationError / CoreError / DbError
//!      │
//!      ▼
//! ApiError { code, message } ── serialized as JSON with an HTTP status
//! ```
//!
//! Two deliberate collapses at this edge:
//! - Store failures become one generic "operation did not succeed"; the
//!   detail is logged server-side, never returned.
//! - Credential mismatches (customer card login, admin login, recovery) all
//!   surface as the same message, so a caller cannot probe which field was
//!   wrong.
//!
//! No error is fatal to the process; every failure returns control to the
//! caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use stampcard_core::{CoreError, ValidationError};
use stampcard_db::DbError;

// =============================================================================
// ApiError
// =============================================================================

/// API error returned from handlers.
///
/// ## Serialization
/// ```json
/// { "code": "NOT_FOUND", "message": "Customer not found" }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Login / recovery secret mismatch (401)
    InvalidCredentials,

    /// Business rule violation, e.g. redeem below a full wheel (422)
    BusinessLogic,

    /// Record store did not complete the operation (503)
    StoreUnavailable,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ErrorCode::BusinessLogic => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found", resource))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// The one credential-mismatch error. Same text for unknown username,
    /// wrong password, and wrong security answer.
    pub fn invalid_credentials() -> Self {
        ApiError::new(ErrorCode::InvalidCredentials, "Invalid credentials")
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

// =============================================================================
// Conversions
// =============================================================================

/// Converts record store errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, .. } => ApiError::not_found(&entity),
            DbError::UniqueViolation { field, .. } => {
                ApiError::validation(format!("{} already exists", field))
            }
            DbError::ConnectionFailed(e)
            | DbError::MigrationFailed(e)
            | DbError::QueryFailed(e)
            | DbError::Internal(e) => {
                // Log the actual error but return a generic message.
                tracing::error!("Store operation failed: {}", e);
                ApiError::new(ErrorCode::StoreUnavailable, "Operation did not succeed")
            }
            DbError::PoolExhausted => {
                tracing::error!("Store connection pool exhausted");
                ApiError::new(ErrorCode::StoreUnavailable, "Operation did not succeed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::CustomerNotFound(_) => ApiError::not_found("Customer"),
            CoreError::RewardLocked { stamps, required } => ApiError::new(
                ErrorCode::BusinessLogic,
                format!("Reward locked: {} of {} stamps collected", stamps, required),
            ),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
