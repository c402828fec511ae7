//! Catalog relations that persist the entity schema inside CozoDB.
//!
//! The schema system consists of three parts:
//!
//! 1. **Core Types** (`definition.rs`):
//!    - `DataType` - Column types used by the catalog (String, StringList)
//!    - `CatalogField` - A single column with name and type
//!    - `CatalogRelation` - A stored relation with key and value columns
//!
//! 2. **Relation Definitions** (`relations.rs`):
//!    - `ENTITY_CLASS`, `ENTITY_PROPERTY`, `ENTITY_INDEX`
//!    - `ALL_RELATIONS` - Slice for easy iteration
//!
//! 3. **Bootstrap** (`bootstrap.rs`): compiles each relation to Cozo DDL and
//!    creates whatever is missing.
//!
//! # Type Mapping
//!
//! | Catalog Type | Cozo Type  |
//! |--------------|------------|
//! | String       | String     |
//! | StringList   | [String]   |

mod bootstrap;
mod definition;
mod relations;

pub use bootstrap::{compile_relation, ensure_catalog, missing_relations};
pub use definition::{CatalogField, CatalogRelation, DataType};
pub use relations::{ALL_RELATIONS, ENTITY_CLASS, ENTITY_INDEX, ENTITY_PROPERTY};
