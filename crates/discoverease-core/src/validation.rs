//! # Validation Module
//!
//! Form validation for the create and update paths.
//!
//! ## Validation Order (create)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  NewAppForm                                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. Mandatory fields non-blank ─────────► MissingField                  │
//! │  2. Price  ≥ 0 ─────────────────────────► InvalidNumber                 │
//! │  3. Size   ≥ 0 ─────────────────────────► InvalidNumber                 │
//! │  4. Updated_date (if given) YYYY-MM-DD ─► InvalidDate                   │
//! │  5. Released_date YYYY-MM-DD ───────────► InvalidDate                   │
//! │  6. Avg_user_rating (if given) in [0,5] ► InvalidRating                 │
//! │  7. Genre matches [A-Za-z\s-]+ ─────────► InvalidGenrePattern           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  NewApp (typed, ready to insert)                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The first failing rule wins; later rules are not evaluated.
//!
//! ## Usage
//! ```rust
//! use discoverease_core::validation::{parse_date, parse_non_negative};
//!
//! assert!(parse_date("Released_date", "2024-01-01").is_ok());
//! assert!(parse_date("Released_date", "2023-02-30").is_err());
//! assert_eq!(parse_non_negative("Price", "0.99").unwrap(), 0.99);
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::types::{AppChanges, Application, Developer, NewApp, NewAppForm, Pricing, UpdateAppForm};
use crate::{DATE_FORMAT, MAX_RATING};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Form Validators
// =============================================================================

/// Validates a create form and converts it into a typed [`NewApp`].
///
/// ## Mandatory Fields
/// Everything except Updated_date and Avg_user_rating. Whitespace-only
/// values count as blank. All values are trimmed.
///
/// ## Example
/// ```rust
/// use discoverease_core::types::NewAppForm;
/// use discoverease_core::validation::validate_new_app;
/// use discoverease_core::ValidationError;
///
/// let form = NewAppForm::default();
/// assert!(matches!(
///     validate_new_app(&form),
///     Err(ValidationError::MissingField { .. })
/// ));
/// ```
pub fn validate_new_app(form: &NewAppForm) -> ValidationResult<NewApp> {
    let mandatory = [
        ("App_Id", &form.app_id),
        ("App_name", &form.app_name),
        ("Developer_Id", &form.developer_id),
        ("Genre", &form.genre),
        ("Size", &form.size),
        ("App_version", &form.app_version),
        ("IOS_version", &form.ios_version),
        ("Released_date", &form.released_date),
        ("Age_group", &form.age_group),
        ("Developer", &form.developer_name),
        ("Price", &form.price),
        ("Currency", &form.currency),
    ];
    for (field, value) in mandatory {
        require(field, value)?;
    }

    let price = parse_non_negative("Price", &form.price)?;
    let size = parse_non_negative("Size", &form.size)?;

    let updated_date = match optional(&form.updated_date) {
        Some(value) => Some(parse_date("Updated_date", value)?),
        None => None,
    };
    let released_date = parse_date("Released_date", &form.released_date)?;

    let avg_user_rating = match optional(&form.avg_user_rating) {
        Some(value) => Some(parse_rating(value)?),
        None => None,
    };

    let genre = form.genre.trim();
    validate_genre(genre)?;

    let app_id = form.app_id.trim().to_string();
    let developer_id = form.developer_id.trim().to_string();

    Ok(NewApp {
        application: Application {
            app_id: app_id.clone(),
            app_name: form.app_name.trim().to_string(),
            developer_id: developer_id.clone(),
            genre: genre.to_string(),
            size,
            app_version: form.app_version.trim().to_string(),
            ios_version: form.ios_version.trim().to_string(),
            released_date,
            updated_date,
            avg_user_rating,
            age_group: form.age_group.trim().to_string(),
        },
        developer: Developer {
            developer_id,
            developer: form.developer_name.trim().to_string(),
        },
        pricing: Pricing {
            app_id,
            price,
            currency: form.currency.trim().to_string(),
        },
    })
}

/// Validates an update form (reduced rule set).
///
/// ## Rules
/// 1. App_name, Genre and Price are non-blank
/// 2. Price is a non-negative number
/// 3. Genre matches the allowed pattern
///
/// A blank developer name means "keep the current name".
pub fn validate_update(form: &UpdateAppForm) -> ValidationResult<AppChanges> {
    require("App_name", &form.app_name)?;
    require("Genre", &form.genre)?;
    require("Price", &form.price)?;

    let price = parse_non_negative("Price", &form.price)?;

    let genre = form.genre.trim();
    validate_genre(genre)?;

    Ok(AppChanges {
        app_id: form.app_id.trim().to_string(),
        app_name: form.app_name.trim().to_string(),
        genre: genre.to_string(),
        price,
        developer_name: form
            .developer_name
            .as_deref()
            .and_then(optional)
            .map(str::to_string),
    })
}

// =============================================================================
// Field Validators
// =============================================================================

/// Parses a non-negative, finite number (Price, Size).
pub fn parse_non_negative(field: &str, value: &str) -> ValidationResult<f64> {
    let number: f64 = value
        .trim()
        .parse()
        .ok()
        .filter(|n: &f64| n.is_finite())
        .ok_or_else(|| ValidationError::InvalidNumber {
            field: field.to_string(),
            reason: "must be a valid number".to_string(),
        })?;

    if number < 0.0 {
        return Err(ValidationError::InvalidNumber {
            field: field.to_string(),
            reason: "must be a non-negative number".to_string(),
        });
    }

    Ok(number)
}

/// Parses a strict `YYYY-MM-DD` calendar date.
///
/// ## Rules
/// - Exactly four year digits, two month digits, two day digits
/// - Must name a real day (`2023-02-30` is rejected)
pub fn parse_date(field: &str, value: &str) -> ValidationResult<NaiveDate> {
    let value = value.trim();
    let invalid = || ValidationError::InvalidDate {
        field: field.to_string(),
        value: value.to_string(),
    };

    let well_formed = value.len() == 10
        && value.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())
}

/// Parses an average user rating in [0, 5].
pub fn parse_rating(value: &str) -> ValidationResult<f64> {
    let value = value.trim();
    value
        .parse::<f64>()
        .ok()
        .filter(|r| (0.0..=MAX_RATING).contains(r))
        .ok_or_else(|| ValidationError::InvalidRating {
            value: value.to_string(),
        })
}

/// Validates a genre: letters, whitespace and hyphens only, non-empty.
pub fn validate_genre(genre: &str) -> ValidationResult<()> {
    let valid = !genre.is_empty()
        && genre
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c.is_whitespace() || c == '-');

    if !valid {
        return Err(ValidationError::InvalidGenrePattern {
            value: genre.to_string(),
        });
    }

    Ok(())
}

fn require(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::missing(field));
    }
    Ok(())
}

fn optional(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

// =============================================================================
// Unit Tests
// =============================================================================
