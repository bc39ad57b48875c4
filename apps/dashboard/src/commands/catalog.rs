//! # Catalog Commands
//!
//! The browse screen: preview, filtered listing, name search and the two
//! reports shown beside them.

use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info};

use crate::error::ApiError;
use discoverease_core::catalog::distinct_genres;
use discoverease_core::{
    CatalogFilter, CatalogView, FreeApp, TopDeveloper, FREE_APPS_LIMIT, TOP_DEVELOPERS_LIMIT,
};
use discoverease_db::Database;

/// Everything the browse screen displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrowseReport {
    pub view: CatalogView,
    pub top_developers: Vec<TopDeveloper>,
    /// Free apps of the selected genre.
    pub free_apps: Vec<FreeApp>,
}

/// Loads the catalog and applies `filter`.
///
/// Filter ranges are checked before the table is read.
pub async fn browse(db: &Database, filter: &CatalogFilter) -> Result<BrowseReport, ApiError> {
    let start = Instant::now();
    debug!(?filter, "browse command");

    filter.validate()?;

    let apps = db.applications().list_all().await?;
    let view = filter.apply(&apps)?;

    let top_developers = db.reports().top_developers(TOP_DEVELOPERS_LIMIT).await?;
    let free_apps = match view.selected_genre.as_deref() {
        Some(genre) => db.reports().free_apps_by_genre(genre, FREE_APPS_LIMIT).await?,
        None => Vec::new(),
    };

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        total = apps.len(),
        matched = view.matched,
        genre = ?view.selected_genre,
        "browse complete"
    );

    Ok(BrowseReport {
        view,
        top_developers,
        free_apps,
    })
}

/// Genre selector options, in first-appearance order.
pub async fn genres(db: &Database) -> Result<Vec<String>, ApiError> {
    let apps = db.applications().list_all().await?;
    Ok(distinct_genres(&apps))
}
