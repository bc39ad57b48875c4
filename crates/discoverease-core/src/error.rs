//! # Error Types
//!
//! Domain-specific error types for discoverease-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  discoverease-core errors (this file)                                  │
//! │  ├── CoreError        - Aggregate invariant failures                   │
//! │  └── ValidationError  - Form and filter validation failures            │
//! │                                                                         │
//! │  discoverease-db errors (separate crate)                               │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Dashboard errors (in app)                                             │
//! │  └── ApiError         - What the user sees (code + message)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Terminal     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation reports exactly one error: the first rule that fails.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The application, developer and pricing rows no longer form one
    /// consistent aggregate.
    #[error("Inconsistent app aggregate {app_id}: {reason}")]
    BrokenAggregate { app_id: String, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Each variant corresponds to one rule of the form validation sequence.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A mandatory field is missing or blank.
    #[error("Please fill in all mandatory fields: {field} is required")]
    MissingField { field: String },

    /// Price or Size is not a number, or is negative.
    #[error("{field} {reason}")]
    InvalidNumber { field: String, reason: String },

    /// A date is not `YYYY-MM-DD` or is not a real calendar date.
    #[error("{field} must be a valid date in YYYY-MM-DD format, got '{value}'")]
    InvalidDate { field: String, value: String },

    /// Average user rating is not a number in [0, 5].
    #[error("Average User Rating must be between 0 and 5, got '{value}'")]
    InvalidRating { value: String },

    /// Genre contains characters other than letters, spaces and hyphens.
    #[error("Genre should only contain letters, spaces, and hyphens, got '{value}'")]
    InvalidGenrePattern { value: String },

    /// A filter control is outside its allowed range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },
}

impl ValidationError {
    /// Creates a MissingField error.
    pub fn missing(field: impl Into<String>) -> Self {
        ValidationError::MissingField {
            field: field.into(),
        }
    }
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
        let err = CoreError::BrokenAggregate {
            app_id: "A1".to_string(),
            reason: "missing pricing row".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Inconsistent app aggregate A1: missing pricing row"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::missing("App_Id");
        assert_eq!(
            err.to_string(),
            "Please fill in all mandatory fields: App_Id is required"
        );

        let err = ValidationError::InvalidNumber {
            field: "Price".to_string(),
            reason: "must be a non-negative number".to_string(),
        };
        assert_eq!(err.to_string(), "Price must be a non-negative number");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::missing("Genre").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
