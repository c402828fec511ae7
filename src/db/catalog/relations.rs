//! All catalog relation definitions.

use super::definition::{CatalogField, CatalogRelation, DataType};

/// Classes: one row per schema class.
///
/// Key fields: name
/// Value fields: parents (ordered parent class names)
pub const ENTITY_CLASS: CatalogRelation = CatalogRelation {
    name: "entity_class",
    key_fields: &[CatalogField {
        name: "name",
        data_type: DataType::String,
    }],
    value_fields: &[CatalogField {
        name: "parents",
        data_type: DataType::StringList,
    }],
};

/// Properties declared directly on a class.
///
/// Key fields: class, name
/// Value fields: kind (stored value-kind name, e.g. "LINKLIST")
pub const ENTITY_PROPERTY: CatalogRelation = CatalogRelation {
    name: "entity_property",
    key_fields: &[
        CatalogField {
            name: "class",
            data_type: DataType::String,
        },
        CatalogField {
            name: "name",
            data_type: DataType::String,
        },
    ],
    value_fields: &[CatalogField {
        name: "kind",
        data_type: DataType::String,
    }],
};

/// Indexes declared on a class.
///
/// Key fields: class, name
/// Value fields: fields (indexed property names), index_type
pub const ENTITY_INDEX: CatalogRelation = CatalogRelation {
    name: "entity_index",
    key_fields: &[
        CatalogField {
            name: "class",
            data_type: DataType::String,
        },
        CatalogField {
            name: "name",
            data_type: DataType::String,
        },
    ],
    value_fields: &[
        CatalogField {
            name: "fields",
            data_type: DataType::StringList,
        },
        CatalogField {
            name: "index_type",
            data_type: DataType::String,
        },
    ],
};

/// Every catalog relation, in creation order.
pub const ALL_RELATIONS: &[&CatalogRelation] = &[&ENTITY_CLASS, &ENTITY_PROPERTY, &ENTITY_INDEX];
