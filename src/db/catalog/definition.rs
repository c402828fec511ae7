//! Core catalog definition types.

/// Column data type of a catalog relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// String/text data
    String,
    /// List of strings
    StringList,
}

impl DataType {
    /// Returns the Cozo type name for this data type.
    pub fn cozo_type(&self) -> &'static str {
        match self {
            DataType::String => "String",
            DataType::StringList => "[String]",
        }
    }
}

/// A column of a catalog relation.
#[derive(Debug, Clone)]
pub struct CatalogField {
    /// Column name (e.g., "class", "name")
    pub name: &'static str,

    /// Column data type
    pub data_type: DataType,
}

/// A stored relation of the catalog.
#[derive(Debug, Clone)]
pub struct CatalogRelation {
    /// Relation name (e.g., "entity_class")
    pub name: &'static str,

    /// Fields that form the key (must be unique)
    pub key_fields: &'static [CatalogField],

    /// Fields that are associated values
    pub value_fields: &'static [CatalogField],
}

impl CatalogRelation {
    /// Returns all fields in this relation (key + value).
    pub fn all_fields(&self) -> impl Iterator<Item = &CatalogField> {
        self.key_fields.iter().chain(self.value_fields.iter())
    }

    /// Comma-separated column names, keys first (`class, name, kind`).
    pub fn column_list(&self) -> String {
        self.all_fields().map(|f| f.name).collect::<Vec<_>>().join(", ")
    }

    /// Cozo binding spec `{ key1, key2 => val1 }` used by `:put` and `:rm`.
    pub fn binding_spec(&self) -> String {
        let keys = self.key_fields.iter().map(|f| f.name).collect::<Vec<_>>().join(", ");
        let values = self.value_fields.iter().map(|f| f.name).collect::<Vec<_>>().join(", ");
        if values.is_empty() {
            format!("{{ {} }}", keys)
        } else {
            format!("{{ {} => {} }}", keys, values)
        }
    }
}
