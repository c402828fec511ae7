//! Catalog bootstrap.
//!
//! Creates the catalog relations that do not exist yet. Safe to run any number
//! of times: existing relations are left untouched.

use cozo::DbInstance;
use tracing::debug;

use super::definition::CatalogRelation;
use super::relations::ALL_RELATIONS;
use crate::db::{relation_exists, try_create_relation, DbError};

/// Generate Cozo DDL for a single relation.
///
/// Produces output in the format:
/// ```cozo
/// :create relation_name {
///     key_field1: Type1,
///     key_field2: Type2
///     =>
///     value_field1: Type1
/// }
/// ```
pub fn compile_relation(relation: &CatalogRelation) -> String {
    let render = |fields: &[super::CatalogField]| {
        fields
            .iter()
            .map(|f| format!("    {}: {}", f.name, f.data_type.cozo_type()))
            .collect::<Vec<_>>()
            .join(",\n")
    };

    format!(
        ":create {} {{\n{}\n    =>\n{}\n}}",
        relation.name,
        render(relation.key_fields),
        render(relation.value_fields)
    )
}

/// Names of the catalog relations not yet present in `db`.
pub fn missing_relations(db: &DbInstance) -> Result<Vec<&'static str>, DbError> {
    let mut missing = Vec::new();
    for relation in ALL_RELATIONS {
        if !relation_exists(db, relation.name)? {
            missing.push(relation.name);
        }
    }
    Ok(missing)
}

/// Create every missing catalog relation.
///
/// Returns the names of the relations created by this call.
pub fn ensure_catalog(db: &DbInstance) -> Result<Vec<&'static str>, DbError> {
    let missing = missing_relations(db)?;
    let mut created = Vec::with_capacity(missing.len());

    for relation in ALL_RELATIONS.iter().filter(|r| missing.contains(&r.name)) {
        if try_create_relation(db, &compile_relation(relation))? {
            debug!(relation = relation.name, "created catalog relation");
            created.push(relation.name);
        }
    }

    Ok(created)
}
