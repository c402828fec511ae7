//! Configuration file handling for database connections.
//!
//! This module provides loading and parsing of `.entity_schema.json`
//! configuration files: the default database plus optional named pool
//! configurations.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::db::{DatabaseConfig, DbError, PoolConfig};

/// Name of the configuration file looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = ".entity_schema.json";

/// Top-level configuration file structure.
///
/// ```json
/// {
///   "database": { "type": "sqlite", "path": "./entity_schema.sqlite" },
///   "pools": {
///     "test": { "database": { "type": "memory" }, "max_connections": 4 }
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Default database configuration
    pub database: DatabaseConfig,

    /// Pool configurations by pool key
    #[serde(default)]
    pub pools: BTreeMap<String, PoolConfig>,
}

impl ConfigFile {
    /// Load configuration from `.entity_schema.json` in the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file doesn't exist, cannot be read, or is not
    /// a valid configuration.
    pub fn load() -> Result<Self, DbError> {
        Self::load_optional()?.ok_or_else(|| DbError::Config {
            message: format!(
                "Configuration file not found: {name}\n\n\
                 Please create a {name} file in the current directory, e.g.\n\
                 {{\n  \"database\": {{ \"type\": \"sqlite\", \"path\": \"./entity_schema.sqlite\" }}\n}}",
                name = CONFIG_FILE_NAME
            ),
        })
    }

    /// Like [`ConfigFile::load`], but a missing file is `Ok(None)`.
    pub fn load_optional() -> Result<Option<Self>, DbError> {
        let path = Path::new(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(path).map(Some)
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, DbError> {
        let content = fs::read_to_string(path).map_err(|e| DbError::Config {
            message: format!("Failed to read {}: {}", path.display(), e),
        })?;

        serde_json::from_str(&content).map_err(|e| DbError::Config {
            message: format!("Invalid JSON in {}: {}", path.display(), e),
        })
    }

    /// Pool configuration for `key`.
    ///
    /// Keys without an entry in `pools` fall back to the default database with
    /// default pool settings.
    pub fn pool_config(&self, key: &str) -> PoolConfig {
        self.pools
            .get(key)
            .cloned()
            .unwrap_or_else(|| PoolConfig::new(self.database.clone()))
    }
}
