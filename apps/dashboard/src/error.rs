//! # API Error Type
//!
//! Unified error type for dashboard commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in DiscoverEase                           │
//! │                                                                         │
//! │  Command handler: Result<T, ApiError>                                  │
//! │         │                                                               │
//! │         ├── ValidationError ── first failing form rule ──┐             │
//! │         └── DbError ────────── duplicate / not found ────┴─► ApiError  │
//! │                                                                         │
//! │  Terminal:  error[DUPLICATE_IDENTIFIER]: App_Id must be unique. ...    │
//! │  --json:    { "code": "DUPLICATE_IDENTIFIER", "message": "..." }       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage failures are logged in full and shown to the user generically.

use discoverease_core::ValidationError;
use discoverease_db::DbError;
use serde::Serialize;

/// Error returned from dashboard commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Application not found: Foo"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A mandatory form field is blank
    MissingField,

    /// Price or Size is not a non-negative number
    InvalidNumber,

    /// A date is malformed or not a real calendar date
    InvalidDate,

    /// Average user rating outside [0, 5]
    InvalidRating,

    /// Genre contains characters other than letters, spaces, hyphens
    InvalidGenrePattern,

    /// App_Id or Developer_Id already exists
    DuplicateIdentifier,

    /// No row matches the given name or identifier
    NotFound,

    /// A browse filter control is out of range
    InvalidFilter,

    /// Database operation failed
    DatabaseError,

    /// Internal error
    Internal,
}

impl ErrorCode {
    /// The serialized form, e.g. `NOT_FOUND`.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "MISSING_FIELD",
            ErrorCode::InvalidNumber => "INVALID_NUMBER",
            ErrorCode::InvalidDate => "INVALID_DATE",
            ErrorCode::InvalidRating => "INVALID_RATING",
            ErrorCode::InvalidGenrePattern => "INVALID_GENRE_PATTERN",
            ErrorCode::DuplicateIdentifier => "DUPLICATE_IDENTIFIER",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::InvalidFilter => "INVALID_FILTER",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::Internal => "INTERNAL",
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
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    fn inconsistent(app_id: &str, reason: &str) -> Self {
        tracing::error!(app_id = %app_id, reason = %reason, "Inconsistent app aggregate");
        ApiError::new(
            ErrorCode::DatabaseError,
            format!("Records of app {} are inconsistent; nothing was changed", app_id),
        )
    }
}

/// Converts validation failures; the message names the failing rule.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        let code = match &err {
            ValidationError::MissingField { .. } => ErrorCode::MissingField,
            ValidationError::InvalidNumber { .. } => ErrorCode::InvalidNumber,
            ValidationError::InvalidDate { .. } => ErrorCode::InvalidDate,
            ValidationError::InvalidRating { .. } => ErrorCode::InvalidRating,
            ValidationError::InvalidGenrePattern { .. } => ErrorCode::InvalidGenrePattern,
            ValidationError::OutOfRange { .. } => ErrorCode::InvalidFilter,
        };
        ApiError::new(code, err.to_string())
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { .. } => {
                ApiError::new(ErrorCode::DuplicateIdentifier, err.to_string())
            }
            DbError::BrokenAggregate { app_id, reason } => ApiError::inconsistent(&app_id, &reason),
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "error[{}]: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}
