//! # Repository Module
//!
//! Database repository implementations for DiscoverEase.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Two Levels of Repositories                           │
//! │                                                                         │
//! │  AggregateRepository (one transaction per operation)                   │
//! │  ├── create(&NewApp)                                                   │
//! │  ├── find_by_name / find_by_id                                         │
//! │  ├── update(&AppChanges)                                               │
//! │  └── delete(app_id)                                                    │
//! │       │                                                                 │
//! │       │  &mut SqliteConnection  (pooled connection or open transaction)│
//! │       ▼                                                                 │
//! │  Table repositories: Application / Developer / Pricing                 │
//! │  + uniqueness checks                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite (parameterized statements only)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Table-level functions take `&mut SqliteConnection`, so the caller decides
//! whether they run inside a transaction.
//!
//! ## Available Repositories
//!
//! - [`ApplicationRepository`](application::ApplicationRepository)
//! - [`DeveloperRepository`](developer::DeveloperRepository)
//! - [`PricingRepository`](pricing::PricingRepository)
//! - [`AggregateRepository`](aggregate::AggregateRepository) - CRUD sequencing
//! - [`ReportRepository`](report::ReportRepository) - reporting views

pub mod aggregate;
pub mod application;
pub mod developer;
pub mod pricing;
pub mod report;
pub mod uniqueness;
