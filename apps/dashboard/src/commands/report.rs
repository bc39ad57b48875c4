//! # Report Commands

use tracing::debug;

use crate::error::ApiError;
use discoverease_core::{
    FreeApp, TopDeveloper, TopRatedApp, ValidationError, FREE_APPS_LIMIT, TOP_DEVELOPERS_LIMIT,
    TOP_RATED_LIMIT,
};
use discoverease_db::Database;

/// Developers with the most apps. `limit` is capped at the report size.
pub async fn top_developers(db: &Database, limit: Option<u32>) -> Result<Vec<TopDeveloper>, ApiError> {
    let limit = limit
        .unwrap_or(TOP_DEVELOPERS_LIMIT)
        .min(TOP_DEVELOPERS_LIMIT);
    debug!(limit, "top_developers command");

    Ok(db.reports().top_developers(limit).await?)
}

/// Free apps of a genre.
pub async fn free_apps(db: &Database, genre: &str) -> Result<Vec<FreeApp>, ApiError> {
    let genre = genre_param(genre)?;
    debug!(genre = %genre, "free_apps command");

    Ok(db.reports().free_apps_by_genre(genre, FREE_APPS_LIMIT).await?)
}

/// Highest-rated apps of a genre.
pub async fn top_rated(db: &Database, genre: &str) -> Result<Vec<TopRatedApp>, ApiError> {
    let genre = genre_param(genre)?;
    debug!(genre = %genre, "top_rated command");

    Ok(db.reports().top_rated_by_genre(genre, TOP_RATED_LIMIT).await?)
}

fn genre_param(genre: &str) -> Result<&str, ApiError> {
    let genre = genre.trim();
    if genre.is_empty() {
        return Err(ValidationError::missing("Genre").into());
    }
    Ok(genre)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use discoverease_db::DbConfig;

    #[tokio::test]
    async fn test_reports_on_empty_catalog() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(top_developers(&db, None).await.unwrap().is_empty());
        assert!(free_apps(&db, "Puzzle").await.unwrap().is_empty());
        assert!(top_rated(&db, "Puzzle").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_genre_is_required() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = top_rated(&db, " ").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingField);
    }
}
