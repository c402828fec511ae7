//! Database configuration for runtime backend selection.
//!
//! Parses connection URLs, environment variables and the config file into a
//! [`DatabaseConfig`], and opens the corresponding CozoDB instance.

use std::path::PathBuf;

use cozo::DbInstance;
use serde::{Deserialize, Serialize};

use super::connection::{open_db, open_mem_db};
use super::DbError;

/// Default database location when nothing else is configured.
pub const DEFAULT_DB_PATH: &str = "./entity_schema.sqlite";

/// Configuration for database backend selection.
///
/// Serialized form uses a `type` tag, matching the `database` section of
/// `.entity_schema.json`:
///
/// ```json
/// { "type": "sqlite", "path": "./entity_schema.sqlite" }
/// { "type": "memory" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DatabaseConfig {
    /// Local CozoDB with SQLite storage.
    #[serde(rename = "sqlite")]
    CozoSqlite { path: PathBuf },

    /// Local CozoDB with in-memory storage.
    #[serde(rename = "memory")]
    CozoMem,
}

impl DatabaseConfig {
    /// Open a database instance from this configuration.
    pub fn open(&self) -> Result<DbInstance, DbError> {
        match self {
            Self::CozoSqlite { path } => open_db(path),
            Self::CozoMem => open_mem_db(),
        }
    }

    /// Whether the backing store already exists.
    ///
    /// In-memory databases always "exist": opening one never touches disk.
    pub fn exists(&self) -> bool {
        match self {
            Self::CozoSqlite { path } => path.exists(),
            Self::CozoMem => true,
        }
    }

    /// Human-readable location, used in log and error messages.
    pub fn location(&self) -> String {
        match self {
            Self::CozoSqlite { path } => path.display().to_string(),
            Self::CozoMem => ":memory:".to_string(),
        }
    }

    /// Parse from a connection URL or file path.
    ///
    /// Supported formats:
    /// - `./path/to/db.sqlite` or `/absolute/path` → CozoSqlite
    /// - `sqlite:///path/to/db` → CozoSqlite
    /// - `:memory:` or `mem://` → CozoMem
    ///
    /// Any other `scheme://` URL is rejected.
    pub fn from_url(url: &str) -> Result<Self, DbError> {
        if url == ":memory:" || url == "mem://" {
            return Ok(Self::CozoMem);
        }

        if let Some(path) = url.strip_prefix("sqlite://") {
            return Ok(Self::CozoSqlite {
                path: PathBuf::from(path),
            });
        }

        if let Some((scheme, _)) = url.split_once("://") {
            return Err(DbError::UnsupportedUrl {
                url: url.to_string(),
                message: format!("backend '{}' is not supported", scheme),
            });
        }

        Ok(Self::CozoSqlite {
            path: PathBuf::from(url),
        })
    }

    /// Load from environment variables.
    ///
    /// Checks in order:
    /// 1. DATABASE_URL environment variable
    /// 2. COZO_PATH environment variable
    pub fn from_env() -> Result<Option<Self>, DbError> {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            return Ok(Some(Self::from_url(&url)?));
        }

        if let Ok(path) = std::env::var("COZO_PATH") {
            return Ok(Some(Self::CozoSqlite {
                path: PathBuf::from(path),
            }));
        }

        Ok(None)
    }

    /// Resolve configuration from config file and environment.
    ///
    /// Priority: Config file > Environment > Default (./entity_schema.sqlite)
    pub fn resolve() -> Result<Self, DbError> {
        if let Some(config_file) = crate::config::ConfigFile::load_optional()? {
            return Ok(config_file.database);
        }

        if let Some(config) = Self::from_env()? {
            return Ok(config);
        }

        Self::from_url(DEFAULT_DB_PATH)
    }
}
