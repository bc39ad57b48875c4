//! # Dashboard Configuration
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. Command line flags override both (see `main.rs`).
//!
//! ## Sources (Priority Order)
//! 1. Command line flags (`--db`, `--log`)
//! 2. Environment variables (`DISCOVEREASE_*`)
//! 3. Defaults (this file)

use directories::ProjectDirs;
use serde::Serialize;
use std::env;
use std::path::PathBuf;

/// Environment variable overriding the database file path.
pub const DB_PATH_VAR: &str = "DISCOVEREASE_DB_PATH";

/// Environment variable overriding the log filter.
pub const LOG_VAR: &str = "DISCOVEREASE_LOG";

/// Database file name inside the data directory.
pub const DB_FILE_NAME: &str = "DiscoverEase.db";

/// Log filter used when nothing else is configured.
pub const DEFAULT_LOG_FILTER: &str = "info,discoverease=debug,sqlx=warn";

/// Dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardConfig {
    /// SQLite database file.
    pub database_path: PathBuf,

    /// `tracing` filter directive.
    pub log_filter: String,
}

impl DashboardConfig {
    /// Loads configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration, letting command line values win over the
    /// environment. Both arguments already carry their environment
    /// fallback when they come from clap.
    pub fn resolve(db_path: Option<PathBuf>, log_filter: Option<String>) -> Result<Self, ConfigError> {
        let mut config = match db_path {
            Some(path) => DashboardConfig {
                database_path: path,
                log_filter: DEFAULT_LOG_FILTER.to_string(),
            },
            None => Self::load()?,
        };

        if let Some(filter) = log_filter.filter(|f| !f.trim().is_empty()) {
            config.log_filter = filter;
        }

        Ok(config)
    }

    /// Loads configuration through `lookup`, which maps variable names to values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_path = match lookup(DB_PATH_VAR).filter(|p| !p.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_database_path()?,
        };

        let log_filter = lookup(LOG_VAR)
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(DashboardConfig {
            database_path,
            log_filter,
        })
    }
}

/// Platform data directory path of the database file.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.discoverease.dashboard/DiscoverEase.db`
/// - **Windows**: `%APPDATA%\discoverease\dashboard\data\DiscoverEase.db`
/// - **Linux**: `~/.local/share/dashboard/DiscoverEase.db`
pub fn default_database_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("com", "discoverease", "dashboard")
        .ok_or(ConfigError::NoDataDirectory)?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir).map_err(|e| ConfigError::DataDirectory {
        path: data_dir.to_path_buf(),
        source: e,
    })?;

    Ok(data_dir.join(DB_FILE_NAME))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine app data directory")]
    NoDataDirectory,

    #[error("Could not create data directory {path}: {source}")]
    DataDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_values_are_used() {
        let config = DashboardConfig::from_lookup(|key| match key {
            DB_PATH_VAR => Some("/tmp/catalog.db".to_string()),
            LOG_VAR => Some("warn".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/tmp/catalog.db"));
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_explicit_values_win() {
        let config = DashboardConfig::resolve(
            Some(PathBuf::from("./catalog.db")),
            Some("debug".to_string()),
        )
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("./catalog.db"));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_blank_log_filter_falls_back() {
        let config = DashboardConfig::from_lookup(|key| match key {
            DB_PATH_VAR => Some("/tmp/catalog.db".to_string()),
            LOG_VAR => Some("  ".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }
}
