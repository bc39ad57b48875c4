//! # Developer Repository
//!
//! Database operations for the `developers` table.

use discoverease_core::Developer;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;

/// Repository for developer database operations.
#[derive(Debug, Clone)]
pub struct DeveloperRepository {
    pool: SqlitePool,
}

impl DeveloperRepository {
    /// Creates a new DeveloperRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DeveloperRepository { pool }
    }

    /// Counts developers.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM developers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // -------------------------------------------------------------------------
    // Connection-scoped operations
    // -------------------------------------------------------------------------

    /// Finds the first developer row with the given Developer_Id.
    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        developer_id: &str,
    ) -> DbResult<Option<Developer>> {
        let developer = sqlx::query_as::<_, Developer>(
            r#"
            SELECT Developer_Id AS developer_id, Developer AS developer
            FROM developers
            WHERE Developer_Id = ?1
            ORDER BY rowid
            LIMIT 1
            "#,
        )
        .bind(developer_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(developer)
    }

    /// Inserts a developer row.
    pub async fn insert(conn: &mut SqliteConnection, developer: &Developer) -> DbResult<()> {
        debug!(developer_id = %developer.developer_id, "Inserting developer");

        sqlx::query("INSERT INTO developers (Developer_Id, Developer) VALUES (?1, ?2)")
            .bind(&developer.developer_id)
            .bind(&developer.developer)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    /// Renames a developer. Returns rows affected.
    pub async fn update_name(
        conn: &mut SqliteConnection,
        developer_id: &str,
        name: &str,
    ) -> DbResult<u64> {
        debug!(developer_id = %developer_id, "Updating developer");

        let result = sqlx::query("UPDATE developers SET Developer = ?2 WHERE Developer_Id = ?1")
            .bind(developer_id)
            .bind(name)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }

    /// Deletes developer rows by Developer_Id. Returns rows affected.
    pub async fn delete(conn: &mut SqliteConnection, developer_id: &str) -> DbResult<u64> {
        debug!(developer_id = %developer_id, "Deleting developer");

        let result = sqlx::query("DELETE FROM developers WHERE Developer_Id = ?1")
            .bind(developer_id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }
}
