//! # Status Command
//!
//! Database diagnostics: connectivity, migrations and row counts.

use serde::Serialize;
use tracing::warn;

use crate::error::ApiError;
use discoverease_db::Database;

/// Snapshot of the database state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub healthy: bool,
    pub migrations_total: usize,
    pub migrations_applied: usize,
    pub applications: i64,
    pub developers: i64,
    pub pricing: i64,
}

/// Collects the status report.
pub async fn status(db: &Database) -> Result<StatusReport, ApiError> {
    let healthy = db.health_check().await;
    if !healthy {
        warn!("Database health check failed");
    }

    let (migrations_total, migrations_applied) = db.migration_status().await?;

    Ok(StatusReport {
        healthy,
        migrations_total,
        migrations_applied,
        applications: db.applications().count().await?,
        developers: db.developers().count().await?,
        pricing: db.pricing().count().await?,
    })
}
