//! # discoverease-db: Database Layer for DiscoverEase
//!
//! This crate provides database access for the DiscoverEase dashboard.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     DiscoverEase Data Flow                              │
//! │                                                                         │
//! │  Dashboard command (create / read / browse / ...)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  discoverease-db (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │   │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                │   │  (embedded)  │  │   │
//! │  │   │               │    │ AggregateRepo  │   │ 001_schema   │  │   │
//! │  │   │ SqlitePool    │◄───│ ApplicationRepo│   │ 002_views    │  │   │
//! │  │   │ Transactions  │    │ DeveloperRepo  │   │              │  │   │
//! │  │   │               │    │ PricingRepo    │   │              │  │   │
//! │  │   │               │    │ ReportRepo     │   │              │  │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <data dir>/DiscoverEase.db                                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Table, aggregate and report repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use discoverease_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("DiscoverEase.db")).await?;
//!
//! let app = db.aggregates().find_by_name("Foo").await?;
//! let top = db.reports().top_developers(10).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::aggregate::AggregateRepository;
pub use repository::application::ApplicationRepository;
pub use repository::developer::DeveloperRepository;
pub use repository::pricing::PricingRepository;
pub use repository::report::ReportRepository;
pub use repository::uniqueness::Identifier;
