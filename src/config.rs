//! Application settings.
//!
//! Defaults are overlaid by an optional `assetman.toml` in the data
//! directory, then by `ASSETMAN_*` environment variables.

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::repository::DbContext;

/// Default database filename inside the data directory.
pub const DEFAULT_DATABASE_FILENAME: &str = "assetman.db";

/// Default server bind address.
pub const DEFAULT_BIND: &str = "127.0.0.1:3030";

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base data directory.
    pub data_dir: PathBuf,
    /// Database filename.
    pub database_filename: String,
    /// Database URL (overrides data_dir/database_filename if set).
    /// Set via ASSETMAN_DATABASE_URL or the `database` field in the config file.
    pub database_url: Option<String>,
    /// Server bind address.
    pub bind: String,
}

impl Default for Settings {
    fn default() -> Self {
        // Default to a per-user data directory.
        // Falls back gracefully: data dir -> home dir -> current dir
        let data_dir = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("assetman");

        Self {
            data_dir,
            database_filename: DEFAULT_DATABASE_FILENAME.to_string(),
            database_url: None,
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

/// Subset of settings readable from `assetman.toml`.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    database: Option<String>,
    bind: Option<String>,
}

impl Settings {
    /// Create settings with a custom data directory.
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            ..Default::default()
        }
    }

    /// Load settings: defaults, then config file, then environment.
    pub fn load(data_dir: Option<PathBuf>) -> Self {
        let mut settings = match data_dir {
            Some(dir) => Self::with_data_dir(dir),
            None => Self::default(),
        };

        settings.apply_config_file();
        settings.apply_env();
        settings
    }

    /// Overlay values from `assetman.toml` in the data directory, if present.
    fn apply_config_file(&mut self) {
        let path = self.data_dir.join("assetman.toml");
        let Ok(contents) = fs::read_to_string(&path) else {
            return;
        };

        match toml::from_str::<FileConfig>(&contents) {
            Ok(file) => {
                if let Some(database) = file.database {
                    self.database_url = Some(database);
                }
                if let Some(bind) = file.bind {
                    self.bind = bind;
                }
            }
            Err(e) => {
                tracing::warn!("Ignoring invalid config file {}: {}", path.display(), e);
            }
        }
    }

    /// Overlay values from ASSETMAN_* environment variables.
    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("ASSETMAN_DATABASE_URL") {
            if !url.is_empty() {
                self.database_url = Some(url);
            }
        }
        if let Ok(bind) = std::env::var("ASSETMAN_BIND") {
            if !bind.is_empty() {
                self.bind = bind;
            }
        }
    }

    /// Get the database URL, constructing from path if not explicitly set.
    pub fn database_url(&self) -> String {
        if let Some(ref url) = self.database_url {
            url.clone()
        } else {
            format!("sqlite:{}", self.database_path().display())
        }
    }

    /// Get the full path to the database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_filename)
    }

    /// Check if the database appears to be initialized.
    pub fn database_exists(&self) -> bool {
        if self.database_url.is_some() {
            true // Explicit URL - connection errors handled elsewhere
        } else {
            self.database_path().exists()
        }
    }

    /// Ensure the data directory exists.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.data_dir)
    }

    /// Create a database context from these settings.
    pub fn create_db_context(&self) -> DbContext {
        DbContext::from_url(&self.database_url())
    }
}
