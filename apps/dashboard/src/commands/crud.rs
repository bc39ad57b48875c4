//! # CRUD Commands
//!
//! Executes [`AppCommand`]s against the database.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Create  validate form ──► AggregateRepository::create (1 transaction) │
//! │  Read    App_name      ──► AggregateRepository::find_by_name           │
//! │  Update  find_by_id (NotFound: stop) ──► validate ──► update (1 tx)    │
//! │  Delete  find_by_id (NotFound: stop) ──► delete (1 transaction)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation runs before any statement; a rejected form never reaches
//! the database.

use std::time::Instant;
use tracing::{debug, info};

use crate::error::ApiError;
use discoverease_core::validation::{validate_new_app, validate_update};
use discoverease_core::{AppCommand, CommandOutcome, NewAppForm, UpdateAppForm, ValidationError};
use discoverease_db::Database;

/// Runs one CRUD command.
pub async fn handle(db: &Database, command: AppCommand) -> Result<CommandOutcome, ApiError> {
    let start = Instant::now();
    let action = command.action();
    debug!(action, "crud command");

    let outcome = match command {
        AppCommand::Create(form) => create(db, &form).await?,
        AppCommand::Read { app_name } => read(db, &app_name).await?,
        AppCommand::Update(form) => update(db, &form).await?,
        AppCommand::Delete { app_id } => delete(db, &app_id).await?,
    };

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        action,
        app_id = %outcome.aggregate().app_id(),
        "crud command complete"
    );

    Ok(outcome)
}

/// Validates the form and inserts the linked application, developer and
/// pricing rows.
pub async fn create(db: &Database, form: &NewAppForm) -> Result<CommandOutcome, ApiError> {
    let new_app = validate_new_app(form)?;
    let created = db.aggregates().create(&new_app).await?;
    Ok(CommandOutcome::Created(created))
}

/// Looks an app up by exact name.
pub async fn read(db: &Database, app_name: &str) -> Result<CommandOutcome, ApiError> {
    let app_name = required("App_name", app_name)?;
    let found = db.aggregates().find_by_name(app_name).await?;
    Ok(CommandOutcome::Found(found))
}

/// Changes name, genre, developer name and price of an existing app.
pub async fn update(db: &Database, form: &UpdateAppForm) -> Result<CommandOutcome, ApiError> {
    let app_id = required("App_Id", &form.app_id)?;

    // Unknown ids stop here, before the form is even checked
    db.aggregates().find_by_id(app_id).await?;

    let changes = validate_update(form)?;
    let updated = db.aggregates().update(&changes).await?;
    Ok(CommandOutcome::Updated(updated))
}

/// Removes an app with its pricing row, and its developer row unless
/// another app still references it.
pub async fn delete(db: &Database, app_id: &str) -> Result<CommandOutcome, ApiError> {
    let app_id = required("App_Id", app_id)?;
    let removed = db.aggregates().delete(app_id).await?;
    Ok(CommandOutcome::Deleted(removed))
}

fn required<'a>(field: &str, value: &'a str) -> Result<&'a str, ApiError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::missing(field).into());
    }
    Ok(value)
}
