//! Schema engine interface.
//!
//! The reconciliation engine only ever reads and adds schema elements; the
//! trait therefore has no drop, rename or alter operations.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::{SchemaError, ValueKind};

/// A class as stored in the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaClass {
    pub name: String,
    /// Direct parent class names, in declaration order.
    pub parents: Vec<String>,
}

/// A property declared on a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaProperty {
    pub name: String,
    pub kind: ValueKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IndexType {
    Unique,
    NotUnique,
}

impl IndexType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexType::Unique => "UNIQUE",
            IndexType::NotUnique => "NOTUNIQUE",
        }
    }
}

impl fmt::Display for IndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndexType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNIQUE" => Ok(IndexType::Unique),
            "NOTUNIQUE" => Ok(IndexType::NotUnique),
            _ => Err(SchemaError::UnknownIndexType { name: s.to_string() }),
        }
    }
}

/// An index declared on a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaIndex {
    pub name: String,
    pub fields: Vec<String>,
    pub index_type: IndexType,
}

/// Storage for classes, properties and indexes.
///
/// Implementations enforce their own uniqueness: creating a class, property
/// or index that already exists fails with [`SchemaError::AlreadyExists`].
/// Check-then-create sequences built on this trait are not atomic; callers
/// that mutate one schema from several threads must serialize externally.
pub trait SchemaEngine: Send + Sync {
    /// Get the backend name for logging/debugging.
    fn backend_name(&self) -> &'static str;

    /// Find a class by name.
    fn lookup_class(&self, name: &str) -> Result<Option<SchemaClass>, SchemaError>;

    /// Create a class with the given direct parents.
    fn create_class(&self, name: &str, parents: &[SchemaClass]) -> Result<SchemaClass, SchemaError>;

    /// All classes, sorted by name.
    fn list_classes(&self) -> Result<Vec<SchemaClass>, SchemaError>;

    /// Find a property declared directly on `class`.
    fn get_property(
        &self,
        class: &SchemaClass,
        name: &str,
    ) -> Result<Option<SchemaProperty>, SchemaError>;

    /// All properties declared directly on `class`, sorted by name.
    fn get_properties(&self, class: &SchemaClass) -> Result<Vec<SchemaProperty>, SchemaError>;

    /// Add a property to `class`.
    fn create_property(
        &self,
        class: &SchemaClass,
        name: &str,
        kind: ValueKind,
    ) -> Result<SchemaProperty, SchemaError>;

    /// All indexes declared on `class`, sorted by name.
    fn get_indexes(&self, class: &SchemaClass) -> Result<Vec<SchemaIndex>, SchemaError>;

    /// Add a single-field unique index to `class`.
    fn create_unique_index(
        &self,
        class: &SchemaClass,
        index_name: &str,
        field_name: &str,
    ) -> Result<SchemaIndex, SchemaError>;
}
