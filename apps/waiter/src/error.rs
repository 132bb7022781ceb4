//! # API Error Type
//!
//! Unified error type for waiter commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Mesa                                   │
//! │                                                                         │
//! │  View                        Rust Backend                               │
//! │  ────                        ────────────                               │
//! │                                                                         │
//! │  {"cmd": "add_item", "code": "Z9"}                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Core Error? ─── CoreError::DishNotFound("Z9") ──┐              │  │
//! │  │         │                                        ▼              │  │
//! │  │  Database Error? ─── DbError::QueryFailed ──► ApiError ────────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄──── {"ok": false, "error": {"code": "NOT_FOUND",                    │
//! │                                "message": "Dish not found: Z9"}}       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Not every unhappy path is an error: a save with an empty order or a blank
//! table name comes back as a normal `SaveOutcome`.

use serde::Serialize;
use thiserror::Error;

use mesa_core::{CoreError, ValidationError};
use mesa_db::DbError;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Table not found: Mesa 9"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("[{code:?}] {message}")]
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
    /// Dish or table does not exist
    NotFound,

    /// Input validation failed
    ValidationError,

    /// The command does not apply right now (nothing to confirm, no conflict)
    InvalidState,

    /// The request line could not be understood
    BadRequest,

    /// Storage operation failed
    DatabaseError,

    /// Internal error
    Internal,
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
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadRequest, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::QueryFailed(e) | DbError::Serialization(e) | DbError::Internal(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Storage operation failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Storage operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::DishNotFound(code) => ApiError::not_found("Dish", &code),
            CoreError::TableNotFound(name) => ApiError::not_found("Table", &name),
            CoreError::NoPendingConflict | CoreError::NoPendingConfirmation => {
                ApiError::new(ErrorCode::InvalidState, err.to_string())
            }
            CoreError::VariationRequired { .. } | CoreError::UnknownVariation { .. } => {
                ApiError::validation(err.to_string())
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("Response serialization failed: {}", err);
        ApiError::internal("Could not encode response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_codes() {
        let err: ApiError = CoreError::DishNotFound("Z9".into()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Dish not found: Z9");

        let err: ApiError = CoreError::NoPendingConfirmation.into();
        assert_eq!(err.code, ErrorCode::InvalidState);

        let err: ApiError = CoreError::Validation(ValidationError::MustBePositive {
            field: "quantity".into(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err: ApiError = ValidationError::TooLong {
            field: "requests".into(),
            max: 500,
        }
        .into();
        assert_eq!(err.message, "requests must be at most 500 characters");
    }

    #[test]
    fn test_db_errors_hide_details() {
        let err: ApiError = DbError::QueryFailed("disk I/O error at page 12".into()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("page 12"));
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::not_found("Table", "Mesa 9");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Table not found: Mesa 9");
    }
}
