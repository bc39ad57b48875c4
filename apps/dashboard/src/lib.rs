//! # DiscoverEase Dashboard Library
//!
//! Command handlers, configuration and rendering for the `discoverease`
//! terminal dashboard. The binary in `main.rs` only parses arguments and
//! prints what these modules return.
//!
//! ## Module Organization
//! ```text
//! discoverease_dashboard/
//! ├── lib.rs          ◄─── You are here (logging & database setup)
//! ├── config.rs       ◄─── Environment-based configuration
//! ├── error.rs        ◄─── API error type for commands
//! ├── render.rs       ◄─── Text tables, bar chart, JSON
//! └── commands/
//!     ├── crud.rs     ◄─── create / read / update / delete
//!     ├── catalog.rs  ◄─── browse, genres
//!     ├── report.rs   ◄─── top developers, free apps, top rated
//!     └── status.rs   ◄─── diagnostics
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod render;

use tracing::info;
use tracing_subscriber::EnvFilter;

use config::DashboardConfig;
use discoverease_db::{Database, DbConfig};
use error::ApiError;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG` wins when set
/// - otherwise `default_filter` (from `DISCOVEREASE_LOG` or `--log`)
///
/// Logs go to stderr so stdout carries only command output.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Opens the configured database file, creating and migrating it as needed.
pub async fn open_database(config: &DashboardConfig) -> Result<Database, ApiError> {
    info!(path = %config.database_path.display(), "Opening database");

    let db = Database::new(DbConfig::new(&config.database_path)).await?;

    info!("Database connected and migrations applied");
    Ok(db)
}
