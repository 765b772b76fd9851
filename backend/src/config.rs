//! # Application Configuration
//!
//! Settings are resolved in three layers, each overriding the previous one:
//!
//! 1. Built-in defaults
//! 2. An optional YAML file (`EXPENSE_TRACKER_CONFIG`, or `expense_tracker.yaml`
//!    in the working directory when it exists)
//! 3. Environment variables
//!
//! ## YAML Format
//!
//! ```yaml
//! app_name: "Expense Tracker"
//! storage: sqlite
//! database_url: "sqlite://data/expenses.db"
//! api_port: 8000
//! cors_origins:
//!   - "http://localhost:5173"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

pub const CONFIG_PATH_ENV: &str = "EXPENSE_TRACKER_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "expense_tracker.yaml";

/// Which `ExpenseStore` adapter backs the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Json,
    Sqlite,
}

impl FromStr for StorageKind {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_lowercase().as_str() {
            "json" => Ok(StorageKind::Json),
            "sqlite" => Ok(StorageKind::Sqlite),
            other => Err(anyhow::anyhow!("unknown storage backend '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub app_name: String,
    pub app_version: String,
    pub storage: StorageKind,
    /// Used by the JSON store
    pub data_file_path: PathBuf,
    /// Used by the SQLite store
    pub database_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub cors_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: "Expense Tracker".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            storage: StorageKind::Json,
            data_file_path: PathBuf::from("data/expenses.json"),
            database_url: "sqlite://data/expenses.db".to_string(),
            api_host: "0.0.0.0".to_string(),
            api_port: 8000,
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
            ],
        }
    }
}

impl AppConfig {
    /// Resolve the configuration from file and process environment
    pub fn load() -> Result<Self> {
        let explicit = std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        info!("Loading configuration from {}", path.display());
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply environment-style overrides; `lookup` returns the value of a variable
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(storage) = lookup("EXPENSE_TRACKER_STORAGE") {
            self.storage = storage.parse()?;
        }
        if let Some(path) = lookup("EXPENSE_TRACKER_DATA_FILE") {
            self.data_file_path = PathBuf::from(path);
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database_url = url;
        }
        if let Some(host) = lookup("EXPENSE_TRACKER_HOST") {
            self.api_host = host;
        }
        if let Some(port) = lookup("EXPENSE_TRACKER_PORT") {
            self.api_port = port
                .trim()
                .parse()
                .with_context(|| format!("invalid EXPENSE_TRACKER_PORT '{}'", port))?;
        }
        if let Some(origins) = lookup("CORS_ORIGINS") {
            self.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}
