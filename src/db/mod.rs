//! CozoDB storage layer for the schema catalog.
//!
//! This module provides everything the reconciliation engine needs from a live
//! database, independent of the reconciliation algorithm itself:
//! - Connection management (SQLite-backed or in-memory for tests)
//! - Backend selection from URLs, environment and the config file
//! - Query execution with parameter binding
//! - The catalog relations that persist classes, properties and indexes
//! - Process-wide, keyed connection pools
//!
//! # Architecture
//!
//! CozoDB is a Datalog database with no native notion of classes or
//! inheritance. The entity schema is therefore stored as plain data in three
//! catalog relations (`entity_class`, `entity_property`, `entity_index`) that
//! are created on demand by [`catalog::ensure_catalog`].

pub mod catalog;
mod config;
mod connection;
pub mod pool;
mod query;

pub use config::DatabaseConfig;
pub use connection::{open_db, open_mem_db};
pub use pool::{ConfigPoolFactory, ConnectionPool, PoolConfig, PoolFactory, PooledConnection};
pub use query::{
    extract_string, extract_string_list, relation_exists, run_query, run_query_no_params,
    try_create_relation, Params,
};

use thiserror::Error;

/// Database error types
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to open database '{path}': {message}")]
    OpenFailed { path: String, message: String },

    #[error("Query failed: {message}")]
    QueryFailed { message: String },

    #[error("Missing column '{name}' in query result")]
    MissingColumn { name: String },

    #[error("Unexpected value in column '{name}': {message}")]
    BadValue { name: String, message: String },

    #[error("Connection pool '{key}' is exhausted ({max_connections} connections in use)")]
    PoolExhausted { key: String, max_connections: usize },

    #[error("Unsupported database URL '{url}': {message}")]
    UnsupportedUrl { url: String, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}
