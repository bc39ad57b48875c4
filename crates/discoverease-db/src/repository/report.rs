//! # Report Repository
//!
//! Read-only reporting queries. Two of them read the `TopDevelopers` and
//! `TopRatedAppsByGenre` views from migration 002.
//!
//! Every filter value is bound as a parameter.

use discoverease_core::{FreeApp, TopDeveloper, TopRatedApp};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Repository for reporting queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Developers ranked by number of published apps, most first.
    pub async fn top_developers(&self, limit: u32) -> DbResult<Vec<TopDeveloper>> {
        let rows = sqlx::query_as::<_, TopDeveloper>(
            r#"
            SELECT Developer AS developer, Total_Apps AS total_apps
            FROM TopDevelopers
            ORDER BY Total_Apps DESC, Developer
            LIMIT ?1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Loaded top developers");
        Ok(rows)
    }

    /// Free (Price = 0) apps of a genre with their developer.
    pub async fn free_apps_by_genre(&self, genre: &str, limit: u32) -> DbResult<Vec<FreeApp>> {
        let rows = sqlx::query_as::<_, FreeApp>(
            r#"
            SELECT a.App_name AS app_name, d.Developer AS developer
            FROM applications AS a
            JOIN pricing AS p ON a.App_Id = p.App_Id
            JOIN developers AS d ON a.Developer_Id = d.Developer_Id
            WHERE p.Price = 0.0 AND a.Genre = ?1
            ORDER BY a.rowid
            LIMIT ?2
            "#,
        )
        .bind(genre)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        debug!(genre = %genre, count = rows.len(), "Loaded free apps");
        Ok(rows)
    }

    /// Best-rated apps of a genre, highest rating first.
    pub async fn top_rated_by_genre(&self, genre: &str, limit: u32) -> DbResult<Vec<TopRatedApp>> {
        let rows = sqlx::query_as::<_, TopRatedApp>(
            r#"
            SELECT
                genre           AS genre,
                App_Id          AS app_id,
                App_name        AS app_name,
                Developer       AS developer,
                Avg_user_rating AS avg_user_rating
            FROM TopRatedAppsByGenre
            WHERE genre = ?1
            ORDER BY Avg_user_rating DESC
            LIMIT ?2
            "#,
        )
        .bind(genre)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        debug!(genre = %genre, count = rows.len(), "Loaded top-rated apps");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::application::ApplicationRepository;
    use crate::repository::developer::DeveloperRepository;
    use crate::repository::pricing::PricingRepository;
    use chrono::NaiveDate;
    use discoverease_core::{Application, Developer, Pricing};

    struct Row<'a> {
        app_id: &'a str,
        developer_id: &'a str,
        genre: &'a str,
        price: f64,
        rating: Option<f64>,
    }

    async fn insert_rows(db: &Database, rows: &[Row<'_>]) {
        let mut conn = db.pool().acquire().await.unwrap();
        for row in rows {
            let app = Application {
                app_id: row.app_id.to_string(),
                app_name: format!("App {}", row.app_id),
                developer_id: row.developer_id.to_string(),
                genre: row.genre.to_string(),
                size: 5.0,
                app_version: "1.0".to_string(),
                ios_version: "12.0".to_string(),
                released_date: NaiveDate::from_ymd_opt(2022, 6, 1).unwrap(),
                updated_date: None,
                avg_user_rating: row.rating,
                age_group: "4+".to_string(),
            };
            ApplicationRepository::insert(&mut conn, &app).await.unwrap();
            PricingRepository::insert(
                &mut conn,
                &Pricing {
                    app_id: row.app_id.to_string(),
                    price: row.price,
                    currency: "USD".to_string(),
                },
            )
            .await
            .unwrap();
            if DeveloperRepository::find_by_id(&mut conn, row.developer_id)
                .await
                .unwrap()
                .is_none()
            {
                DeveloperRepository::insert(
                    &mut conn,
                    &Developer {
                        developer_id: row.developer_id.to_string(),
                        developer: format!("Dev {}", row.developer_id),
                    },
                )
                .await
                .unwrap();
            }
        }
    }

    #[tokio::test]
    async fn test_free_apps_are_filtered_and_capped() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let ids: Vec<String> = (0..25).map(|i| format!("P{i}")).collect();
        let mut rows: Vec<Row> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| Row {
                app_id: id,
                developer_id: "D1",
                genre: if i < 20 { "Puzzle" } else { "Action" },
                price: 0.0,
                rating: None,
            })
            .collect();
        rows.push(Row {
            app_id: "PAID",
            developer_id: "D1",
            genre: "Puzzle",
            price: 2.99,
            rating: None,
        });
        insert_rows(&db, &rows).await;

        let free = db.reports().free_apps_by_genre("Puzzle", 15).await.unwrap();
        assert_eq!(free.len(), 15);
        assert!(free.iter().all(|a| a.app_name != "App PAID"));
        assert!(free.iter().all(|a| a.developer == "Dev D1"));

        let action = db.reports().free_apps_by_genre("Action", 15).await.unwrap();
        assert_eq!(action.len(), 5);
    }

    #[tokio::test]
    async fn test_top_developers_ranked_by_app_count() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let rows = [
            ("A1", "D1"),
            ("A2", "D2"),
            ("A3", "D2"),
            ("A4", "D2"),
            ("A5", "D3"),
            ("A6", "D3"),
        ]
        .map(|(app_id, developer_id)| Row {
            app_id,
            developer_id,
            genre: "Puzzle",
            price: 0.0,
            rating: None,
        });
        insert_rows(&db, &rows).await;

        let top = db.reports().top_developers(10).await.unwrap();
        let ranked: Vec<(&str, i64)> = top
            .iter()
            .map(|t| (t.developer.as_str(), t.total_apps))
            .collect();
        assert_eq!(ranked, vec![("Dev D2", 3), ("Dev D3", 2), ("Dev D1", 1)]);

        assert_eq!(db.reports().top_developers(2).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_top_rated_binds_genre() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let rows = [
            ("A1", "Puzzle", Some(3.0)),
            ("A2", "Puzzle", Some(4.8)),
            ("A3", "Puzzle", None),
            ("A4", "Action", Some(5.0)),
        ]
        .map(|(app_id, genre, rating)| Row {
            app_id,
            developer_id: "D1",
            genre,
            price: 1.0,
            rating,
        });
        insert_rows(&db, &rows).await;

        let top = db.reports().top_rated_by_genre("Puzzle", 10).await.unwrap();
        let ids: Vec<&str> = top.iter().map(|t| t.app_id.as_str()).collect();
        assert_eq!(ids, vec!["A2", "A1"]);
        assert_eq!(top[0].developer.as_deref(), Some("Dev D1"));

        // A quote in the genre is just data
        let none = db
            .reports()
            .top_rated_by_genre("Puzzle' OR '1'='1", 10)
            .await
            .unwrap();
        assert!(none.is_empty());
    }
}
