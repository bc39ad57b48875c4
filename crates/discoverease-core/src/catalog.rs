//! # Catalog Filtering
//!
//! Client-side filtering of the in-memory applications table.
//!
//! ## Filter Chain
//! ```text
//! all applications
//!      │  genre == selected genre
//!      ▼
//!      │  avg_user_rating >= min_rating   (unrated apps never pass)
//!      ▼
//!      │  size >= min_size_mb
//!      ▼
//! filtered ──► first 10 rows ("Top 10 apps based on filters")
//!      │
//!      │  app_name contains search term (case-insensitive)
//!      ▼
//! search results ──► first 10 rows
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::Application;
use crate::validation::ValidationResult;
use crate::{MAX_RATING, MAX_SIZE_FILTER_MB, PREVIEW_ROWS};

/// Default position of the minimum-rating slider.
pub const DEFAULT_MIN_RATING: f64 = 3.0;

/// Filter controls of the browse screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogFilter {
    /// Selected genre; `None` selects the first genre in the catalog.
    pub genre: Option<String>,

    /// Minimum average rating, in [0, 5].
    pub min_rating: f64,

    /// Minimum size in MB, in [0, 500].
    pub min_size_mb: f64,

    /// Free-text name search; blank disables the search.
    pub search: Option<String>,
}

impl Default for CatalogFilter {
    fn default() -> Self {
        CatalogFilter {
            genre: None,
            min_rating: DEFAULT_MIN_RATING,
            min_size_mb: 0.0,
            search: None,
        }
    }
}

impl CatalogFilter {
    /// Checks the slider ranges.
    pub fn validate(&self) -> ValidationResult<()> {
        if !(0.0..=MAX_RATING).contains(&self.min_rating) {
            return Err(ValidationError::OutOfRange {
                field: "Minimum Average User Rating".to_string(),
                min: 0.0,
                max: MAX_RATING,
            });
        }

        if !(0.0..=MAX_SIZE_FILTER_MB).contains(&self.min_size_mb) {
            return Err(ValidationError::OutOfRange {
                field: "Minimum Size (MB)".to_string(),
                min: 0.0,
                max: MAX_SIZE_FILTER_MB,
            });
        }

        Ok(())
    }

    /// Applies the filter chain to `apps`, keeping storage order.
    ///
    /// The selected genre is resolved with [`CatalogFilter::selected_genre`].
    pub fn apply(&self, apps: &[Application]) -> ValidationResult<CatalogView> {
        self.validate()?;

        let genres = distinct_genres(apps);
        let selected_genre = self.selected_genre(&genres);

        let filtered: Vec<Application> = apps
            .iter()
            .filter(|app| selected_genre.as_deref() == Some(app.genre.as_str()))
            .filter(|app| app.avg_user_rating.is_some_and(|r| r >= self.min_rating))
            .filter(|app| app.size >= self.min_size_mb)
            .cloned()
            .collect();

        let search: Option<Vec<Application>> = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(|term| {
                let term = term.to_lowercase();
                filtered
                    .iter()
                    .filter(|app| app.app_name.to_lowercase().contains(&term))
                    .take(PREVIEW_ROWS)
                    .cloned()
                    .collect()
            });

        Ok(CatalogView {
            preview: apps.iter().take(PREVIEW_ROWS).cloned().collect(),
            genres,
            selected_genre,
            matched: filtered.len(),
            filtered: filtered.into_iter().take(PREVIEW_ROWS).collect(),
            search,
        })
    }

    /// Resolves the selected genre against the available ones.
    ///
    /// An explicit genre is used as given (it may match nothing); otherwise
    /// the first genre of the catalog is selected.
    pub fn selected_genre(&self, genres: &[String]) -> Option<String> {
        match self.genre.as_deref().map(str::trim) {
            Some(genre) if !genre.is_empty() => Some(genre.to_string()),
            _ => genres.first().cloned(),
        }
    }
}

/// Result of browsing the catalog with a [`CatalogFilter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogView {
    /// First rows of the unfiltered catalog.
    pub preview: Vec<Application>,

    /// Genre selector options, in first-appearance order.
    pub genres: Vec<String>,

    pub selected_genre: Option<String>,

    /// Number of applications passing the filter chain.
    pub matched: usize,

    /// First rows passing the filter chain.
    pub filtered: Vec<Application>,

    /// Name search results; `None` when no search term was given.
    pub search: Option<Vec<Application>>,
}

/// Returns the distinct genres of `apps` in first-appearance order.
pub fn distinct_genres(apps: &[Application]) -> Vec<String> {
    let mut genres: Vec<String> = Vec::new();
    for app in apps {
        if !genres.iter().any(|g| g == &app.genre) {
            genres.push(app.genre.clone());
        }
    }
    genres
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn app(id: &str, name: &str, genre: &str, rating: Option<f64>, size: f64) -> Application {
        Application {
            app_id: id.to_string(),
            app_name: name.to_string(),
            developer_id: "D1".to_string(),
            genre: genre.to_string(),
            size,
            app_version: "1.0".to_string(),
            ios_version: "12.0".to_string(),
            released_date: NaiveDate::from_ymd_opt(2020, 5, 1).unwrap(),
            updated_date: None,
            avg_user_rating: rating,
            age_group: "4+".to_string(),
        }
    }

    fn catalog() -> Vec<Application> {
        vec![
            app("1", "Sudoku Master", "Puzzle", Some(4.5), 50.0),
            app("2", "Chess Pro", "Board", Some(4.8), 120.0),
            app("3", "Block Puzzle", "Puzzle", Some(2.5), 30.0),
            app("4", "Word Puzzle Go", "Puzzle", None, 80.0),
            app("5", "Puzzle Quest", "Puzzle", Some(3.0), 300.0),
            app("6", "Checkers", "Board", Some(3.9), 10.0),
        ]
    }

    #[test]
    fn test_distinct_genres_first_appearance_order() {
        assert_eq!(distinct_genres(&catalog()), vec!["Puzzle", "Board"]);
    }

    #[test]
    fn test_default_filter_selects_first_genre() {
        let view = CatalogFilter::default().apply(&catalog()).unwrap();
        assert_eq!(view.selected_genre.as_deref(), Some("Puzzle"));
        let ids: Vec<&str> = view.filtered.iter().map(|a| a.app_id.as_str()).collect();
        // Rating >= 3: unrated and 2.5 excluded
        assert_eq!(ids, vec!["1", "5"]);
        assert_eq!(view.matched, 2);
        assert_eq!(view.preview.len(), 6);
        assert!(view.search.is_none());
    }

    #[test]
    fn test_size_and_rating_filters_chain() {
        let filter = CatalogFilter {
            genre: Some("Puzzle".to_string()),
            min_rating: 0.0,
            min_size_mb: 40.0,
            search: None,
        };
        let view = filter.apply(&catalog()).unwrap();
        let ids: Vec<&str> = view.filtered.iter().map(|a| a.app_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "5"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let filter = CatalogFilter {
            genre: Some("Puzzle".to_string()),
            min_rating: 0.0,
            min_size_mb: 0.0,
            search: Some("PUZZLE".to_string()),
        };
        let view = filter.apply(&catalog()).unwrap();
        let search = view.search.unwrap();
        let ids: Vec<&str> = search
            .iter()
            .map(|a| a.app_id.as_str())
            .collect();
        assert_eq!(ids, vec!["3", "5"]);
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let filter = CatalogFilter {
            search: Some("   ".to_string()),
            ..CatalogFilter::default()
        };
        assert!(filter.apply(&catalog()).unwrap().search.is_none());
    }

    #[test]
    fn test_filtered_rows_are_capped() {
        let apps: Vec<Application> = (0..25)
            .map(|i| app(&i.to_string(), "Game", "Action", Some(5.0), 1.0))
            .collect();
        let view = CatalogFilter::default().apply(&apps).unwrap();
        assert_eq!(view.matched, 25);
        assert_eq!(view.filtered.len(), PREVIEW_ROWS);
        assert_eq!(view.preview.len(), PREVIEW_ROWS);
    }

    #[test]
    fn test_slider_ranges() {
        let too_high = CatalogFilter {
            min_rating: 5.5,
            ..CatalogFilter::default()
        };
        assert!(matches!(
            too_high.apply(&catalog()),
            Err(ValidationError::OutOfRange { .. })
        ));

        let too_big = CatalogFilter {
            min_size_mb: 501.0,
            ..CatalogFilter::default()
        };
        assert!(too_big.validate().is_err());
    }

    #[test]
    fn test_empty_catalog() {
        let view = CatalogFilter::default().apply(&[]).unwrap();
        assert!(view.genres.is_empty());
        assert_eq!(view.selected_genre, None);
        assert!(view.filtered.is_empty());
    }
}
