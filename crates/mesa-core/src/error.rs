//! # Error Types
//!
//! Domain-specific error types for mesa-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  mesa-core errors (this file)                                          │
//! │  ├── CoreError        - Caller misuse of the order manager             │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  mesa-db errors (separate crate)                                       │
//! │  └── DbError          - Local store failures                           │
//! │                                                                         │
//! │  App errors                                                            │
//! │  └── ApiError         - What the view layer sees (serialized)          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → View                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What is NOT an error
//! Saving an empty draft, saving without a table name, or saving an edit
//! whose table was closed in the meantime are ordinary outcomes of
//! [`crate::manager::SaveOutcome`]. They never surface as `Err`.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No dish with this code in the menu.
    #[error("Dish not found: {0}")]
    DishNotFound(String),

    /// No active table with this name.
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// Merge/replace requested while no save conflict is pending.
    #[error("No save conflict is pending")]
    NoPendingConflict,

    /// `confirm` called while nothing awaits confirmation.
    #[error("Nothing is awaiting confirmation")]
    NoPendingConfirmation,

    /// The dish offers variations and none was chosen.
    ///
    /// ## User Workflow
    /// ```text
    /// Tap "Sopa Wantan"  (variations: Personal, Familiar)
    ///      │
    ///      ▼
    /// add_item(code, variation: None)
    ///      │
    ///      ▼
    /// VariationRequired { code: "S01" }  → picker stays open
    /// ```
    #[error("Dish {code} requires choosing one of its variations")]
    VariationRequired { code: String },

    /// The chosen variation is not offered by the dish.
    #[error("Dish {code} has no variation '{variation}'")]
    UnknownVariation { code: String, variation: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., two dishes sharing a code).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::UnknownVariation {
            code: "S01".to_string(),
            variation: "Gigante".to_string(),
        };
        assert_eq!(err.to_string(), "Dish S01 has no variation 'Gigante'");

        let err = CoreError::TableNotFound("Mesa 4".to_string());
        assert_eq!(err.to_string(), "Table not found: Mesa 4");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "code".to_string(),
        };
        assert_eq!(err.to_string(), "code is required");

        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: 99,
        };
        assert_eq!(err.to_string(), "quantity must be between 1 and 99");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        }
        .into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
