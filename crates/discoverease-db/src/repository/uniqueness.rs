//! # Uniqueness Checks
//!
//! App_Id and Developer_Id carry no UNIQUE constraint in the schema.
//! Uniqueness is enforced here with an existence query, run inside the
//! create transaction before any insert.

use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// An identifier that must be unique within its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identifier {
    /// `applications.App_Id`
    AppId,
    /// `developers.Developer_Id`
    DeveloperId,
}

impl Identifier {
    /// Column name, as shown to the user.
    pub fn field(self) -> &'static str {
        match self {
            Identifier::AppId => "App_Id",
            Identifier::DeveloperId => "Developer_Id",
        }
    }

    fn exists_query(self) -> &'static str {
        match self {
            Identifier::AppId => {
                "SELECT EXISTS(SELECT 1 FROM applications WHERE App_Id = ?1)"
            }
            Identifier::DeveloperId => {
                "SELECT EXISTS(SELECT 1 FROM developers WHERE Developer_Id = ?1)"
            }
        }
    }
}

/// Returns true when no row carries `value` as the given identifier.
pub async fn is_unique(
    conn: &mut SqliteConnection,
    identifier: Identifier,
    value: &str,
) -> DbResult<bool> {
    let exists: i64 = sqlx::query_scalar(identifier.exists_query())
        .bind(value)
        .fetch_one(&mut *conn)
        .await?;
    let exists = exists != 0;

    debug!(field = identifier.field(), value = %value, exists, "Uniqueness check");
    Ok(!exists)
}

/// Fails with [`DbError::UniqueViolation`] when `value` is already taken.
pub async fn ensure_unique(
    conn: &mut SqliteConnection,
    identifier: Identifier,
    value: &str,
) -> DbResult<()> {
    if is_unique(conn, identifier, value).await? {
        Ok(())
    } else {
        Err(DbError::duplicate(identifier.field(), value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::developer::DeveloperRepository;
    use discoverease_core::Developer;

    #[tokio::test]
    async fn test_empty_tables_are_unique() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut conn = db.pool().acquire().await.unwrap();

        assert!(is_unique(&mut conn, Identifier::AppId, "A1").await.unwrap());
        assert!(is_unique(&mut conn, Identifier::DeveloperId, "D1")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_existing_developer_id_is_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut conn = db.pool().acquire().await.unwrap();
        DeveloperRepository::insert(
            &mut conn,
            &Developer {
                developer_id: "D1".to_string(),
                developer: "Acme".to_string(),
            },
        )
        .await
        .unwrap();

        let err = ensure_unique(&mut conn, Identifier::DeveloperId, "D1")
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Developer_Id must be unique. 'D1' already exists"
        );

        // The tables are checked independently
        ensure_unique(&mut conn, Identifier::AppId, "D1")
            .await
            .unwrap();
    }
}
