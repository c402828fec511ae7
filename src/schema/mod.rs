//! Schema reconciliation engine.
//!
//! Maps statically declared entity types onto classes, properties and unique
//! indexes of a [`SchemaEngine`], creating whatever is missing and never
//! touching what already exists.
//!
//! # Overview
//!
//! 1. **Field descriptors** (`field.rs`): normalize one member's metadata into
//!    a canonical name, value kind, uniqueness flag and optional target type.
//! 2. **Type descriptors** (`descriptor.rs`): collect a type's field
//!    descriptors, discover its schema-backed parents and drive class and
//!    property creation.
//! 3. **Facade** (`facade.rs`): the two entry points external callers use.
//! 4. **Engines** (`engine.rs`, `memory.rs`, `cozo.rs`): the schema storage
//!    interface and its in-memory and CozoDB implementations.
//!
//! # Convergence
//!
//! Each (type, schema) pair moves one way only:
//! absent → class present → fields configured. Lookup by name is the
//! idempotency key; an existing class is never re-parented and an existing
//! property or index is never altered.

mod cozo;
mod descriptor;
mod engine;
mod facade;
mod field;
mod kind;
mod memory;

pub use cozo::CozoSchema;
pub use descriptor::TypeDescriptor;
pub use engine::{IndexType, SchemaClass, SchemaEngine, SchemaIndex, SchemaProperty};
pub use facade::{configure_base_fields, configure_class_fields, ensure_type, ensure_type_info, sync_type};
pub use field::{FieldDescriptor, ACCESSOR_PREFIX};
pub use kind::ValueKind;
pub use memory::MemorySchema;

use thiserror::Error;

use crate::db::DbError;
use crate::entity::MemberKind;

/// Schema reconciliation error types
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Unsupported member kind {kind:?} for '{member}' on type {owner}")]
    UnsupportedMemberKind {
        owner: String,
        member: String,
        kind: MemberKind,
    },

    #[error("Invalid type {type_name}: {reason}")]
    InvalidType { type_name: String, reason: String },

    #[error("Class '{name}' not found in schema")]
    ClassNotFound { name: String },

    #[error("{what} '{name}' already exists")]
    AlreadyExists { what: &'static str, name: String },

    #[error("Cyclic ancestry: {}", path.join(" -> "))]
    AncestryCycle { path: Vec<String> },

    #[error("Unknown value kind '{name}'")]
    UnknownValueKind { name: String },

    #[error("Unknown index type '{name}'")]
    UnknownIndexType { name: String },

    #[error(transparent)]
    Db(#[from] DbError),
}

#[cfg(test)]
mod descriptor_tests;
