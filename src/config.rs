//! Configuration module
//!
//! Resolves where the planner database lives. `HOMEACE_DB_PATH` wins;
//! otherwise the file goes under the platform data directory.

use crate::error::{AppError, AppResult};
use log::info;
use std::env;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "HOMEACE_DB_PATH";
const DB_FILE_NAME: &str = "homeace.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        let db_path = match env::var(DB_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => dirs::data_dir()
                .map(|dir| dir.join("homeace").join(DB_FILE_NAME))
                .ok_or_else(|| {
                    AppError::config(format!(
                        "No data directory found; set {} to choose a database file",
                        DB_PATH_ENV
                    ))
                })?,
        };
        Ok(Self { db_path })
    }

    pub fn with_db_path<P: Into<PathBuf>>(db_path: P) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// SQLite connection string that creates the file when missing.
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.db_path.display())
    }
}

/// Validates the resolved configuration
///
/// # Returns
///
/// * `Ok(())` - the database path is usable
/// * `Err(AppError::Config)` - the path is empty or points at a directory
///
pub fn validate_config(config: &Config) -> AppResult<()> {
    if config.db_path.as_os_str().is_empty() {
        return Err(AppError::config("Database path cannot be empty"));
    }
    if config.db_path.is_dir() {
        return Err(AppError::config(format!(
            "Database path {} is a directory",
            config.db_path.display()
        )));
    }
    info!("Using planner database at {}", config.db_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validation_passes_for_file_path() {
        let dir = TempDir::new().unwrap();
        let config = Config::with_db_path(dir.path().join("planner.db"));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_rejects_directory() {
        let dir = TempDir::new().unwrap();
        let config = Config::with_db_path(dir.path());
        assert!(matches!(validate_config(&config), Err(AppError::Config(_))));
    }

    #[test]
    fn test_validation_rejects_empty_path() {
        let config = Config::with_db_path("");
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_database_url() {
        let config = Config::with_db_path("/tmp/planner.db");
        assert_eq!(config.database_url(), "sqlite:/tmp/planner.db?mode=rwc");
    }
}
