//! # discoverease-core: Pure Domain Logic for DiscoverEase
//!
//! This crate holds the rules of the DiscoverEase catalog as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     DiscoverEase Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Dashboard (terminal / JSON)                     │   │
//! │  │    browse ──► filters ──► reports ──► create/read/update/delete │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ AppCommand                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ discoverease-core (THIS CRATE) ★                  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │validation │  │  catalog  │  │  command  │  │   │
//! │  │   │ Aggregate │  │ AppForm   │  │  Filter   │  │ AppCommand│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                discoverease-db (Database Layer)                 │   │
//! │  │        SQLite queries, migrations, repositories, reports        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Application, Developer, Pricing and the `AppAggregate`
//! - [`validation`] - Form validation with first-failure reporting
//! - [`catalog`] - In-memory catalog filtering
//! - [`command`] - CRUD request/outcome types
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use discoverease_core::validation::validate_genre;
//!
//! assert!(validate_genre("Role-Playing Games").is_ok());
//! assert!(validate_genre("Games2").is_err());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod command;
pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{CatalogFilter, CatalogView};
pub use command::{AppCommand, CommandOutcome};
pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Calendar date format accepted for release and update dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Upper bound of the average user rating scale.
pub const MAX_RATING: f64 = 5.0;

/// Upper bound of the minimum-size filter control, in MB.
pub const MAX_SIZE_FILTER_MB: f64 = 500.0;

/// Rows shown in catalog previews and filtered listings.
pub const PREVIEW_ROWS: usize = 10;

/// Maximum rows in the top developers report.
pub const TOP_DEVELOPERS_LIMIT: u32 = 10;

/// Maximum rows in the free applications report.
pub const FREE_APPS_LIMIT: u32 = 15;

/// Maximum rows in the top-rated applications report.
pub const TOP_RATED_LIMIT: u32 = 10;
