//! Process-wide, keyed connection pools.
//!
//! Pools are registered lazily under an opaque key (typically a deployment
//! mode such as `"production"` or `"test"`) and live for the rest of the
//! process. Construction is delegated to a [`PoolFactory`] so callers can pick
//! the pool configuration per key.
//!
//! Registration is an atomic get-or-insert: the registry lock is held while
//! the factory runs, so a factory is invoked at most once per successfully
//! registered key. Failed constructions are logged and never cached; the next
//! call for the same key tries again.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock, Mutex, PoisonError};

use cozo::DbInstance;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::{DatabaseConfig, DbError};
use crate::config::ConfigFile;
use crate::schema::{CozoSchema, SchemaError};

static POOLS: LazyLock<Mutex<HashMap<String, Arc<ConnectionPool>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Settings for a single pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Database the pool connects to
    pub database: DatabaseConfig,

    /// Maximum number of connections handed out at the same time
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,

    /// Create the database on first use if it does not exist yet
    #[serde(default = "default_auto_create")]
    pub auto_create: bool,
}

fn default_max_connections() -> usize {
    PoolConfig::DEFAULT_MAX_CONNECTIONS
}

fn default_auto_create() -> bool {
    true
}

impl PoolConfig {
    pub const DEFAULT_MAX_CONNECTIONS: usize = 16;

    pub fn new(database: DatabaseConfig) -> Self {
        Self {
            database,
            max_connections: Self::DEFAULT_MAX_CONNECTIONS,
            auto_create: true,
        }
    }

    pub fn with_max_connections(mut self, max_connections: usize) -> Self {
        self.max_connections = max_connections;
        self
    }

    pub fn with_auto_create(mut self, auto_create: bool) -> Self {
        self.auto_create = auto_create;
        self
    }

    fn validate(&self, key: &str) -> Result<(), DbError> {
        if self.max_connections == 0 {
            return Err(DbError::Config {
                message: format!("pool '{}' must allow at least one connection", key),
            });
        }
        Ok(())
    }
}

/// Builds a new pool for a key.
pub trait PoolFactory {
    fn new_pool(&self, key: &str) -> Result<ConnectionPool, DbError>;
}

impl<F> PoolFactory for F
where
    F: Fn(&str) -> Result<ConnectionPool, DbError>,
{
    fn new_pool(&self, key: &str) -> Result<ConnectionPool, DbError> {
        self(key)
    }
}

/// Pool factory backed by the `pools` table of `.entity_schema.json`.
#[derive(Debug, Clone)]
pub struct ConfigPoolFactory {
    config: ConfigFile,
}

impl ConfigPoolFactory {
    pub fn new(config: ConfigFile) -> Self {
        Self { config }
    }

    /// Load the config file from the current directory.
    pub fn from_current_dir() -> Result<Self, DbError> {
        ConfigFile::load().map(Self::new)
    }
}

impl PoolFactory for ConfigPoolFactory {
    fn new_pool(&self, key: &str) -> Result<ConnectionPool, DbError> {
        let config = self.config.pool_config(key);
        config.validate(key)?;
        Ok(ConnectionPool::new(key, config))
    }
}

/// A bounded pool of handles onto one CozoDB instance.
///
/// The database is opened lazily by the first [`ConnectionPool::acquire`].
pub struct ConnectionPool {
    key: String,
    config: PoolConfig,
    auto_create: AtomicBool,
    instance: Mutex<Option<Arc<DbInstance>>>,
    in_use: Arc<AtomicUsize>,
}

impl std::fmt::Debug for ConnectionPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionPool")
            .field("key", &self.key)
            .field("config", &self.config)
            .field("auto_create", &self.is_auto_create())
            .field("in_use", &self.in_use())
            .finish()
    }
}

impl ConnectionPool {
    pub fn new(key: impl Into<String>, config: PoolConfig) -> Self {
        let auto_create = config.auto_create;
        Self {
            key: key.into(),
            config,
            auto_create: AtomicBool::new(auto_create),
            instance: Mutex::new(None),
            in_use: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Return the pool registered under `key`, building it with `factory` if
    /// none is registered yet.
    ///
    /// Returns `None` if the factory fails; the failure is logged and the key
    /// stays unregistered.
    pub fn get_instance(key: &str, factory: &dyn PoolFactory) -> Option<Arc<ConnectionPool>> {
        let mut pools = POOLS.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pool) = pools.get(key) {
            return Some(Arc::clone(pool));
        }

        match factory.new_pool(key) {
            Ok(pool) => {
                debug!(key, "registered connection pool");
                let pool = Arc::new(pool);
                pools.insert(key.to_string(), Arc::clone(&pool));
                Some(pool)
            }
            Err(e) => {
                error!(key, error = %e, "unable to instantiate connection pool");
                None
            }
        }
    }

    /// Keys of all registered pools, sorted.
    pub fn registered_keys() -> Vec<String> {
        let pools = POOLS.lock().unwrap_or_else(PoisonError::into_inner);
        let mut keys: Vec<String> = pools.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    pub fn is_auto_create(&self) -> bool {
        self.auto_create.load(Ordering::Acquire)
    }

    pub fn set_auto_create(&self, auto_create: bool) -> &Self {
        self.auto_create.store(auto_create, Ordering::Release);
        self
    }

    /// Number of connections currently checked out.
    pub fn in_use(&self) -> usize {
        self.in_use.load(Ordering::Acquire)
    }

    /// Borrow a connection from the pool.
    ///
    /// The connection is returned to the pool when the guard is dropped.
    pub fn acquire(&self) -> Result<PooledConnection, DbError> {
        let max = self.config.max_connections;
        self.in_use
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| (n < max).then_some(n + 1))
            .map_err(|_| DbError::PoolExhausted {
                key: self.key.clone(),
                max_connections: max,
            })?;

        match self.instance() {
            Ok(db) => Ok(PooledConnection {
                db,
                in_use: Arc::clone(&self.in_use),
            }),
            Err(e) => {
                self.in_use.fetch_sub(1, Ordering::AcqRel);
                Err(e)
            }
        }
    }

    fn instance(&self) -> Result<Arc<DbInstance>, DbError> {
        let mut slot = self.instance.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(db) = slot.as_ref() {
            return Ok(Arc::clone(db));
        }

        let database = &self.config.database;
        if !database.exists() && !self.is_auto_create() {
            return Err(DbError::OpenFailed {
                path: database.location(),
                message: "database does not exist and auto-create is disabled".to_string(),
            });
        }

        debug!(key = %self.key, location = %database.location(), "opening database");
        let db = Arc::new(database.open()?);
        *slot = Some(Arc::clone(&db));
        Ok(db)
    }
}

/// A connection checked out of a [`ConnectionPool`].
pub struct PooledConnection {
    db: Arc<DbInstance>,
    in_use: Arc<AtomicUsize>,
}

impl PooledConnection {
    /// The raw database handle.
    pub fn db(&self) -> &DbInstance {
        &self.db
    }

    /// A schema handle over this connection, with the catalog relations
    /// bootstrapped.
    pub fn schema(&self) -> Result<CozoSchema, SchemaError> {
        CozoSchema::new(Arc::clone(&self.db))
    }
}

impl Drop for PooledConnection {
    fn drop(&mut self) {
        self.in_use.fetch_sub(1, Ordering::AcqRel);
    }
}
