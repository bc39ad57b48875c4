//! # Application Repository
//!
//! Database operations for the `applications` table.

use discoverease_core::Application;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;

/// Column list mapping table columns onto [`Application`] fields.
const SELECT_APPLICATION: &str = r#"
    SELECT
        App_Id          AS app_id,
        App_name        AS app_name,
        Developer_Id    AS developer_id,
        Genre           AS genre,
        Size            AS size,
        App_version     AS app_version,
        IOS_version     AS ios_version,
        Released_date   AS released_date,
        Updated_date    AS updated_date,
        Avg_user_rating AS avg_user_rating,
        Age_group       AS age_group
    FROM applications
"#;

/// Repository for application database operations.
#[derive(Debug, Clone)]
pub struct ApplicationRepository {
    pool: SqlitePool,
}

impl ApplicationRepository {
    /// Creates a new ApplicationRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ApplicationRepository { pool }
    }

    /// Loads the whole applications table in storage order.
    ///
    /// The catalog is small; filtering happens in memory
    /// (see `discoverease_core::catalog`).
    pub async fn list_all(&self) -> DbResult<Vec<Application>> {
        let apps = sqlx::query_as::<_, Application>(&format!(
            "{SELECT_APPLICATION} ORDER BY rowid"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = apps.len(), "Loaded applications");
        Ok(apps)
    }

    /// Counts applications.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM applications")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // -------------------------------------------------------------------------
    // Connection-scoped operations
    // -------------------------------------------------------------------------

    /// Finds the first application with the given App_Id.
    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        app_id: &str,
    ) -> DbResult<Option<Application>> {
        let app = sqlx::query_as::<_, Application>(&format!(
            "{SELECT_APPLICATION} WHERE App_Id = ?1 ORDER BY rowid LIMIT 1"
        ))
        .bind(app_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(app)
    }

    /// Finds the first application with exactly the given name.
    pub async fn find_by_name(
        conn: &mut SqliteConnection,
        app_name: &str,
    ) -> DbResult<Option<Application>> {
        let app = sqlx::query_as::<_, Application>(&format!(
            "{SELECT_APPLICATION} WHERE App_name = ?1 ORDER BY rowid LIMIT 1"
        ))
        .bind(app_name)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(app)
    }

    /// Inserts an application row.
    pub async fn insert(conn: &mut SqliteConnection, app: &Application) -> DbResult<()> {
        debug!(app_id = %app.app_id, "Inserting application");

        sqlx::query(
            r#"
            INSERT INTO applications (
                App_Id, App_name, Developer_Id, Genre, Size,
                App_version, IOS_version, Released_date, Updated_date,
                Avg_user_rating, Age_group
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5,
                ?6, ?7, ?8, ?9,
                ?10, ?11
            )
            "#,
        )
        .bind(&app.app_id)
        .bind(&app.app_name)
        .bind(&app.developer_id)
        .bind(&app.genre)
        .bind(app.size)
        .bind(&app.app_version)
        .bind(&app.ios_version)
        .bind(app.released_date)
        .bind(app.updated_date)
        .bind(app.avg_user_rating)
        .bind(&app.age_group)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Updates the mutable application fields. Returns rows affected.
    pub async fn update_name_and_genre(
        conn: &mut SqliteConnection,
        app_id: &str,
        app_name: &str,
        genre: &str,
    ) -> DbResult<u64> {
        debug!(app_id = %app_id, "Updating application");

        let result = sqlx::query("UPDATE applications SET App_name = ?2, Genre = ?3 WHERE App_Id = ?1")
            .bind(app_id)
            .bind(app_name)
            .bind(genre)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }

    /// Deletes application rows by App_Id. Returns rows affected.
    pub async fn delete(conn: &mut SqliteConnection, app_id: &str) -> DbResult<u64> {
        debug!(app_id = %app_id, "Deleting application");

        let result = sqlx::query("DELETE FROM applications WHERE App_Id = ?1")
            .bind(app_id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }

    /// Counts applications published by a developer.
    pub async fn count_by_developer(
        conn: &mut SqliteConnection,
        developer_id: &str,
    ) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM applications WHERE Developer_Id = ?1")
                .bind(developer_id)
                .fetch_one(&mut *conn)
                .await?;

        Ok(count)
    }
}
