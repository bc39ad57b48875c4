//! # Pricing Repository
//!
//! Database operations for the `pricing` table.

use discoverease_core::Pricing;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;

/// Repository for pricing database operations.
#[derive(Debug, Clone)]
pub struct PricingRepository {
    pool: SqlitePool,
}

impl PricingRepository {
    /// Creates a new PricingRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PricingRepository { pool }
    }

    /// Counts pricing rows.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pricing")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // -------------------------------------------------------------------------
    // Connection-scoped operations
    // -------------------------------------------------------------------------

    /// Finds the first pricing row of an application.
    pub async fn find_by_app_id(
        conn: &mut SqliteConnection,
        app_id: &str,
    ) -> DbResult<Option<Pricing>> {
        let pricing = sqlx::query_as::<_, Pricing>(
            r#"
            SELECT App_Id AS app_id, Price AS price, Currency AS currency
            FROM pricing
            WHERE App_Id = ?1
            ORDER BY rowid
            LIMIT 1
            "#,
        )
        .bind(app_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(pricing)
    }

    /// Inserts a pricing row.
    pub async fn insert(conn: &mut SqliteConnection, pricing: &Pricing) -> DbResult<()> {
        debug!(app_id = %pricing.app_id, price = pricing.price, "Inserting pricing");

        sqlx::query("INSERT INTO pricing (App_Id, Price, Currency) VALUES (?1, ?2, ?3)")
            .bind(&pricing.app_id)
            .bind(pricing.price)
            .bind(&pricing.currency)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    /// Changes the price of an application. Returns rows affected.
    pub async fn update_price(
        conn: &mut SqliteConnection,
        app_id: &str,
        price: f64,
    ) -> DbResult<u64> {
        debug!(app_id = %app_id, price = price, "Updating price");

        let result = sqlx::query("UPDATE pricing SET Price = ?2 WHERE App_Id = ?1")
            .bind(app_id)
            .bind(price)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }

    /// Deletes the pricing rows of an application. Returns rows affected.
    pub async fn delete(conn: &mut SqliteConnection, app_id: &str) -> DbResult<u64> {
        debug!(app_id = %app_id, "Deleting pricing");

        let result = sqlx::query("DELETE FROM pricing WHERE App_Id = ?1")
            .bind(app_id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }
}
