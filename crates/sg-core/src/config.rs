//! Configuration types and parsing for schemaguard.yml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

/// Main project configuration from schemaguard.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory containing generated migration files
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// SQL dialect used for statement tokenization
    #[serde(default)]
    pub dialect: Dialect,

    /// Ledger table name (outside the application schema)
    #[serde(default = "default_ledger_table")]
    pub ledger_table: String,

    /// Advisory lock name serializing concurrent pipeline runs
    #[serde(default = "default_lock_name")]
    pub lock_name: String,

    /// Append-only audit log for neutralized statements (JSON lines).
    /// When unset, neutralizations are only logged.
    #[serde(default)]
    pub audit_log: Option<String>,
}

/// Database connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database file path, or `:memory:`
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// SQL dialect for tokenization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// DuckDB dialect
    #[default]
    Duckdb,
    /// PostgreSQL dialect
    Postgres,
}

impl Dialect {
    /// Dialect name as used in config files and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Duckdb => "duckdb",
            Dialect::Postgres => "postgres",
        }
    }
}

fn default_migrations_dir() -> String {
    "migrations".to_string()
}

fn default_db_path() -> String {
    "schemaguard.duckdb".to_string()
}

fn default_ledger_table() -> String {
    "_schemaguard_ledger".to_string()
}

fn default_lock_name() -> String {
    "schemaguard_pipeline".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            migrations_dir: default_migrations_dir(),
            database: DatabaseConfig::default(),
            dialect: Dialect::default(),
            ledger_table: default_ledger_table(),
            lock_name: default_lock_name(),
            audit_log: None,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        let text = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        serde_yaml::from_str(&text).map_err(|e| CoreError::ConfigParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load `schemaguard.yml` from a project directory, falling back to
    /// defaults when the file is absent.
    pub fn load_or_default(project_dir: &Path) -> CoreResult<Self> {
        let path = project_dir.join("schemaguard.yml");
        if path.exists() {
            Self::load(&path)
        } else {
            log::debug!("no schemaguard.yml in {}, using defaults", project_dir.display());
            Ok(Self::default())
        }
    }

    /// Migrations directory resolved against the project root.
    pub fn migrations_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.migrations_dir)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
