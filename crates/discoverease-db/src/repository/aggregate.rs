//! # Aggregate Repository
//!
//! Sequences the writes that keep an application, its developer and its
//! pricing row consistent.
//!
//! ## Write Sequences
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CREATE   begin                                                        │
//! │           ├── App_Id unique?        ──► UniqueViolation (rollback)     │
//! │           ├── Developer_Id unique?  ──► UniqueViolation (rollback)     │
//! │           ├── insert application → developer → pricing                 │
//! │           ├── reload + check()      ──► BrokenAggregate (rollback)     │
//! │           commit                                                       │
//! │                                                                         │
//! │  UPDATE   begin                                                        │
//! │           ├── application by App_Id ──► NotFound (rollback)            │
//! │           ├── name + genre, developer name (if row), price             │
//! │           ├── reload + check() (developer optional if it had none)     │
//! │           commit                                                       │
//! │                                                                         │
//! │  DELETE   begin                                                        │
//! │           ├── application by App_Id ──► NotFound (rollback)            │
//! │           ├── pricing → developer (unless shared) → application        │
//! │           ├── verify rows are gone                                     │
//! │           commit                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Dropping an uncommitted transaction rolls it back, so every early return
//! leaves the three tables untouched.

use discoverease_core::{AppAggregate, AppChanges, Application, NewApp};
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::repository::application::ApplicationRepository;
use crate::repository::developer::DeveloperRepository;
use crate::repository::pricing::PricingRepository;
use crate::repository::uniqueness::{ensure_unique, Identifier};

/// Repository for whole-app operations spanning the three tables.
#[derive(Debug, Clone)]
pub struct AggregateRepository {
    pool: SqlitePool,
}

impl AggregateRepository {
    /// Creates a new AggregateRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AggregateRepository { pool }
    }

    /// Attaches the developer and pricing rows linked to `application`.
    pub async fn load(
        conn: &mut SqliteConnection,
        application: Application,
    ) -> DbResult<AppAggregate> {
        let developer = DeveloperRepository::find_by_id(conn, &application.developer_id).await?;
        let pricing = PricingRepository::find_by_app_id(conn, &application.app_id).await?;

        Ok(AppAggregate {
            application,
            developer,
            pricing,
        })
    }

    /// Reads the first app whose App_name matches exactly.
    ///
    /// Linked rows are optional in the result; reads never fail on an
    /// inconsistent aggregate.
    pub async fn find_by_name(&self, app_name: &str) -> DbResult<AppAggregate> {
        let mut conn = self.pool.acquire().await?;

        let Some(application) = ApplicationRepository::find_by_name(&mut conn, app_name).await?
        else {
            warn!(app_name = %app_name, "No application with this name");
            return Err(DbError::not_found("Application", app_name));
        };

        Self::load(&mut conn, application).await
    }

    /// Reads the app with the given App_Id.
    pub async fn find_by_id(&self, app_id: &str) -> DbResult<AppAggregate> {
        let mut conn = self.pool.acquire().await?;

        let Some(application) = ApplicationRepository::find_by_id(&mut conn, app_id).await? else {
            warn!(app_id = %app_id, "No application with this App_Id");
            return Err(DbError::not_found("Application", app_id));
        };

        Self::load(&mut conn, application).await
    }

    /// Inserts a validated app as one unit.
    ///
    /// ## Errors
    /// - `UniqueViolation` if App_Id or Developer_Id is taken (nothing is written)
    /// - `BrokenAggregate` if the inserted rows don't link up (rolled back)
    pub async fn create(&self, new_app: &NewApp) -> DbResult<AppAggregate> {
        let app_id = new_app.application.app_id.as_str();
        debug!(app_id = %app_id, "Creating app");

        let mut tx = self.begin().await?;

        ensure_unique(&mut tx, Identifier::AppId, app_id).await?;
        ensure_unique(&mut tx, Identifier::DeveloperId, &new_app.developer.developer_id).await?;

        ApplicationRepository::insert(&mut tx, &new_app.application).await?;
        DeveloperRepository::insert(&mut tx, &new_app.developer).await?;
        PricingRepository::insert(&mut tx, &new_app.pricing).await?;

        let aggregate = Self::reload_checked(&mut tx, app_id).await?;
        commit(tx).await?;

        info!(app_id = %app_id, "App created");
        Ok(aggregate)
    }

    /// Applies validated changes to an existing app as one unit.
    ///
    /// The developer name changes only when a developer row exists and a
    /// new name was given.
    pub async fn update(&self, changes: &AppChanges) -> DbResult<AppAggregate> {
        let app_id = changes.app_id.as_str();
        debug!(app_id = %app_id, "Updating app");

        let mut tx = self.begin().await?;

        let Some(current) = ApplicationRepository::find_by_id(&mut tx, app_id).await? else {
            warn!(app_id = %app_id, "Update target vanished");
            return Err(DbError::not_found("Application", app_id));
        };

        ApplicationRepository::update_name_and_genre(
            &mut tx,
            app_id,
            &changes.app_name,
            &changes.genre,
        )
        .await?;

        let developer_id = current.developer_id.as_str();
        let has_developer = DeveloperRepository::find_by_id(&mut tx, developer_id)
            .await?
            .is_some();

        match (&changes.developer_name, has_developer) {
            (Some(name), true) => {
                DeveloperRepository::update_name(&mut tx, developer_id, name).await?;
            }
            (_, false) => {
                debug!(developer_id = %developer_id, "No developer row, skipping rename");
            }
            (None, true) => {}
        }

        PricingRepository::update_price(&mut tx, app_id, changes.price).await?;

        // An app that had no developer row before the update is still updatable
        let aggregate = if has_developer {
            Self::reload_checked(&mut tx, app_id).await?
        } else {
            Self::reload_checked_without_developer(&mut tx, app_id).await?
        };
        commit(tx).await?;

        info!(app_id = %app_id, "App updated");
        Ok(aggregate)
    }

    /// Removes an app's pricing, developer and application rows.
    ///
    /// The developer row is kept while another application still references
    /// it. Returns the aggregate as it was before deletion.
    pub async fn delete(&self, app_id: &str) -> DbResult<AppAggregate> {
        debug!(app_id = %app_id, "Deleting app");

        let mut tx = self.begin().await?;

        let Some(application) = ApplicationRepository::find_by_id(&mut tx, app_id).await? else {
            warn!(app_id = %app_id, "Delete target vanished");
            return Err(DbError::not_found("Application", app_id));
        };
        let removed = Self::load(&mut tx, application).await?;
        let developer_id = removed.application.developer_id.as_str();

        PricingRepository::delete(&mut tx, app_id).await?;

        let references = ApplicationRepository::count_by_developer(&mut tx, developer_id).await?;
        if references <= 1 {
            DeveloperRepository::delete(&mut tx, developer_id).await?;
        } else {
            debug!(developer_id = %developer_id, references, "Developer still referenced");
        }

        ApplicationRepository::delete(&mut tx, app_id).await?;

        let leftover_app = ApplicationRepository::find_by_id(&mut tx, app_id).await?;
        let leftover_pricing = PricingRepository::find_by_app_id(&mut tx, app_id).await?;
        if leftover_app.is_some() || leftover_pricing.is_some() {
            return Err(DbError::BrokenAggregate {
                app_id: app_id.to_string(),
                reason: "rows remain after delete".to_string(),
            });
        }

        commit(tx).await?;

        info!(app_id = %app_id, "App deleted");
        Ok(removed)
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    async fn begin(&self) -> DbResult<Transaction<'static, Sqlite>> {
        self.pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))
    }

    async fn reload_checked(conn: &mut SqliteConnection, app_id: &str) -> DbResult<AppAggregate> {
        let aggregate = Self::reload(conn, app_id).await?;
        if let Err(e) = aggregate.check() {
            warn!(app_id = %app_id, error = %e, "Aggregate check failed, rolling back");
            return Err(e.into());
        }

        Ok(aggregate)
    }

    async fn reload_checked_without_developer(
        conn: &mut SqliteConnection,
        app_id: &str,
    ) -> DbResult<AppAggregate> {
        let aggregate = Self::reload(conn, app_id).await?;
        if let Err(e) = aggregate.check_without_developer() {
            warn!(app_id = %app_id, error = %e, "Aggregate check failed, rolling back");
            return Err(e.into());
        }

        Ok(aggregate)
    }

    async fn reload(conn: &mut SqliteConnection, app_id: &str) -> DbResult<AppAggregate> {
        let application = ApplicationRepository::find_by_id(conn, app_id)
            .await?
            .ok_or_else(|| DbError::not_found("Application", app_id))?;

        Self::load(conn, application).await
    }
}

async fn commit(tx: Transaction<'_, Sqlite>) -> DbResult<()> {
    tx.commit()
        .await
        .map_err(|e| DbError::TransactionFailed(e.to_string()))
}
