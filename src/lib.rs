//! entity_schema library - Schema reconciliation for entity types
//!
//! Maps statically declared entity types onto the classes, properties and
//! unique indexes of a schema catalog, creating what is missing and leaving
//! what exists untouched. Also provides the CozoDB-backed catalog, keyed
//! connection pools and the inspection CLI.

#[cfg(test)]
#[macro_use]
mod test_macros;

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod entity;
pub mod output;
pub mod schema;

#[cfg(test)]
pub mod test_utils;
