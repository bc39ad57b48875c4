//! # Domain Types
//!
//! Core domain types used throughout DiscoverEase.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         App Aggregate                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Application   │   │    Developer    │   │     Pricing     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  app_id         │──►│  developer_id   │   │  app_id (ref)   │       │
//! │  │  developer_id   │   │  developer      │   │  price          │       │
//! │  │  genre, size    │   └─────────────────┘   │  currency       │       │
//! │  │  dates, rating  │◄────────────────────────└─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The three rows live in three tables with no foreign keys between them.
//! [`AppAggregate`] groups them back into one consistency unit and
//! [`AppAggregate::check`] verifies the linkage.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::MAX_RATING;

// =============================================================================
// Application
// =============================================================================

/// A mobile application in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Application {
    /// Business identifier, unique across applications.
    pub app_id: String,

    /// Display name. Not unique; reads by name return the first match.
    pub app_name: String,

    /// Reference to the publishing developer.
    pub developer_id: String,

    /// Letters, spaces and hyphens only.
    pub genre: String,

    /// Download size in MB.
    pub size: f64,

    pub app_version: String,

    /// Minimum iOS version required.
    pub ios_version: String,

    pub released_date: NaiveDate,

    pub updated_date: Option<NaiveDate>,

    /// Average user rating in [0, 5], if the app has been rated.
    pub avg_user_rating: Option<f64>,

    /// Age rating, e.g. "4+" or "12+".
    pub age_group: String,
}

// =============================================================================
// Developer
// =============================================================================

/// A developer (publisher) of one or more applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Developer {
    pub developer_id: String,

    /// Display name.
    pub developer: String,
}

// =============================================================================
// Pricing
// =============================================================================

/// Price of an application. Exactly one row per application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Pricing {
    pub app_id: String,

    /// Non-negative; zero means the app is free.
    pub price: f64,

    /// Currency code, e.g. "USD".
    pub currency: String,
}

impl Pricing {
    /// Checks if the application is free.
    #[inline]
    pub fn is_free(&self) -> bool {
        self.price == 0.0
    }
}

// =============================================================================
// App Aggregate
// =============================================================================

/// One application together with its developer and pricing rows.
///
/// Reads may return an aggregate with missing parts (legacy data). Writes
/// require [`AppAggregate::check`] to pass before they are committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppAggregate {
    pub application: Application,
    pub developer: Option<Developer>,
    pub pricing: Option<Pricing>,
}

impl AppAggregate {
    /// Returns the aggregate's App_Id.
    #[inline]
    pub fn app_id(&self) -> &str {
        &self.application.app_id
    }

    /// Verifies the aggregate invariants.
    ///
    /// ## Rules
    /// - Exactly one developer row, matching `application.developer_id`
    /// - Exactly one pricing row, matching `application.app_id`
    /// - Size ≥ 0, Price ≥ 0, rating (if any) in [0, 5]
    pub fn check(&self) -> CoreResult<()> {
        self.check_rows(true)
    }

    /// Same rules as [`check`](Self::check), except that a missing developer
    /// row is accepted. A developer row that is present must still match.
    pub fn check_without_developer(&self) -> CoreResult<()> {
        self.check_rows(false)
    }

    fn check_rows(&self, developer_required: bool) -> CoreResult<()> {
        let app = &self.application;
        let broken = |reason: String| CoreError::BrokenAggregate {
            app_id: app.app_id.clone(),
            reason,
        };

        match &self.developer {
            None if developer_required => {
                return Err(broken("missing developer row".to_string()))
            }
            None => {}
            Some(dev) if dev.developer_id != app.developer_id => {
                return Err(broken(format!(
                    "developer row {} does not match Developer_Id {}",
                    dev.developer_id, app.developer_id
                )));
            }
            Some(_) => {}
        }

        match &self.pricing {
            None => return Err(broken("missing pricing row".to_string())),
            Some(pricing) if pricing.app_id != app.app_id => {
                return Err(broken(format!(
                    "pricing row belongs to {}",
                    pricing.app_id
                )));
            }
            Some(pricing) if !(pricing.price >= 0.0) => {
                return Err(broken(format!("negative price {}", pricing.price)));
            }
            Some(_) => {}
        }

        if !(app.size >= 0.0) {
            return Err(broken(format!("negative size {}", app.size)));
        }

        if let Some(rating) = app.avg_user_rating {
            if !(0.0..=MAX_RATING).contains(&rating) {
                return Err(broken(format!("rating {} outside [0, 5]", rating)));
            }
        }

        Ok(())
    }
}

// =============================================================================
// Validated Write Models
// =============================================================================

/// A fully validated application/developer/pricing triple ready to insert.
///
/// Only produced by [`crate::validation::validate_new_app`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewApp {
    pub application: Application,
    pub developer: Developer,
    pub pricing: Pricing,
}

impl NewApp {
    /// Converts into the aggregate the insert is expected to produce.
    pub fn into_aggregate(self) -> AppAggregate {
        AppAggregate {
            application: self.application,
            developer: Some(self.developer),
            pricing: Some(self.pricing),
        }
    }
}

/// Validated changes for the mutable fields of an existing app.
///
/// App_name, Genre, Developer name and Price are the only fields that can
/// change after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppChanges {
    pub app_id: String,
    pub app_name: String,
    pub genre: String,
    pub price: f64,
    /// New developer display name; `None` keeps the current one.
    pub developer_name: Option<String>,
}

// =============================================================================
// Forms (raw user input)
// =============================================================================

/// Raw create-form input, one string per form field.
///
/// Empty strings stand for fields the user left blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAppForm {
    pub app_id: String,
    pub app_name: String,
    pub developer_id: String,
    pub genre: String,
    pub size: String,
    pub app_version: String,
    pub ios_version: String,
    pub released_date: String,
    pub updated_date: String,
    pub avg_user_rating: String,
    pub age_group: String,
    pub developer_name: String,
    pub price: String,
    pub currency: String,
}

/// Raw update-form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAppForm {
    pub app_id: String,
    pub app_name: String,
    pub genre: String,
    pub price: String,
    pub developer_name: Option<String>,
}

// =============================================================================
// Report Rows
// =============================================================================

/// A row of the `TopDevelopers` view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TopDeveloper {
    pub developer: String,
    pub total_apps: i64,
}

/// A free application in a genre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct FreeApp {
    pub app_name: String,
    pub developer: String,
}

/// A row of the `TopRatedAppsByGenre` view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TopRatedApp {
    pub genre: String,
    pub app_id: String,
    pub app_name: String,
    pub developer: Option<String>,
    pub avg_user_rating: Option<f64>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_aggregate() -> AppAggregate {
        AppAggregate {
            application: Application {
                app_id: "A1".to_string(),
                app_name: "Foo".to_string(),
                developer_id: "D1".to_string(),
                genre: "Puzzle".to_string(),
                size: 10.0,
                app_version: "1.0".to_string(),
                ios_version: "10.0".to_string(),
                released_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                updated_date: NaiveDate::from_ymd_opt(2024, 1, 2),
                avg_user_rating: Some(4.5),
                age_group: "4+".to_string(),
            },
            developer: Some(Developer {
                developer_id: "D1".to_string(),
                developer: "Acme".to_string(),
            }),
            pricing: Some(Pricing {
                app_id: "A1".to_string(),
                price: 0.0,
                currency: "USD".to_string(),
            }),
        }
    }

    #[test]
    fn test_consistent_aggregate_passes() {
        assert!(sample_aggregate().check().is_ok());
    }

    #[test]
    fn test_missing_rows_break_aggregate() {
        let mut agg = sample_aggregate();
        agg.developer = None;
        assert!(matches!(
            agg.check(),
            Err(CoreError::BrokenAggregate { .. })
        ));

        let mut agg = sample_aggregate();
        agg.pricing = None;
        assert!(agg.check().is_err());
    }

    #[test]
    fn test_developer_optional_check() {
        let mut agg = sample_aggregate();
        agg.developer = None;
        assert!(agg.check_without_developer().is_ok());

        agg.pricing = None;
        assert!(agg.check_without_developer().is_err());

        let mut agg = sample_aggregate();
        if let Some(dev) = agg.developer.as_mut() {
            dev.developer_id = "D2".to_string();
        }
        assert!(agg.check_without_developer().is_err());
    }

    #[test]
    fn test_mismatched_links_break_aggregate() {
        let mut agg = sample_aggregate();
        if let Some(dev) = agg.developer.as_mut() {
            dev.developer_id = "D2".to_string();
        }
        assert!(agg.check().is_err());

        let mut agg = sample_aggregate();
        if let Some(pricing) = agg.pricing.as_mut() {
            pricing.app_id = "A2".to_string();
        }
        assert!(agg.check().is_err());
    }

    #[test]
    fn test_out_of_range_values_break_aggregate() {
        let mut agg = sample_aggregate();
        agg.application.avg_user_rating = Some(5.1);
        assert!(agg.check().is_err());

        let mut agg = sample_aggregate();
        agg.application.size = -1.0;
        assert!(agg.check().is_err());

        let mut agg = sample_aggregate();
        if let Some(pricing) = agg.pricing.as_mut() {
            pricing.price = f64::NAN;
        }
        assert!(agg.check().is_err());
    }

    #[test]
    fn test_pricing_is_free() {
        let agg = sample_aggregate();
        assert!(agg.pricing.as_ref().is_some_and(Pricing::is_free));
    }
}
