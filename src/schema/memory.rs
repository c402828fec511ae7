//! In-memory schema engine.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{IndexType, SchemaClass, SchemaEngine, SchemaError, SchemaIndex, SchemaProperty, ValueKind};

#[derive(Debug)]
struct ClassEntry {
    class: SchemaClass,
    properties: BTreeMap<String, ValueKind>,
    indexes: BTreeMap<String, SchemaIndex>,
}

/// A schema held entirely in memory.
///
/// Useful for tests and for dry runs that show what a reconciliation would
/// create. Every operation takes the lock once, so each individual call is
/// atomic; sequences of calls are not.
#[derive(Debug, Default)]
pub struct MemorySchema {
    classes: RwLock<BTreeMap<String, ClassEntry>>,
}

impl MemorySchema {
    pub fn new() -> Self {
        Self::default()
    }

    // Every write is a single insert, so a poisoned lock never guards a
    // half-applied change.
    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, ClassEntry>> {
        self.classes.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, ClassEntry>> {
        self.classes.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn class_not_found(name: &str) -> SchemaError {
    SchemaError::ClassNotFound {
        name: name.to_string(),
    }
}

impl SchemaEngine for MemorySchema {
    fn backend_name(&self) -> &'static str {
        "MemorySchema"
    }

    fn lookup_class(&self, name: &str) -> Result<Option<SchemaClass>, SchemaError> {
        Ok(self.read().get(name).map(|entry| entry.class.clone()))
    }

    fn create_class(&self, name: &str, parents: &[SchemaClass]) -> Result<SchemaClass, SchemaError> {
        let mut classes = self.write();
        if classes.contains_key(name) {
            return Err(SchemaError::AlreadyExists {
                what: "Class",
                name: name.to_string(),
            });
        }
        if let Some(missing) = parents.iter().find(|p| !classes.contains_key(&p.name)) {
            return Err(class_not_found(&missing.name));
        }

        let class = SchemaClass {
            name: name.to_string(),
            parents: parents.iter().map(|p| p.name.clone()).collect(),
        };
        classes.insert(
            name.to_string(),
            ClassEntry {
                class: class.clone(),
                properties: BTreeMap::new(),
                indexes: BTreeMap::new(),
            },
        );
        Ok(class)
    }

    fn list_classes(&self) -> Result<Vec<SchemaClass>, SchemaError> {
        Ok(self.read().values().map(|entry| entry.class.clone()).collect())
    }

    fn get_property(
        &self,
        class: &SchemaClass,
        name: &str,
    ) -> Result<Option<SchemaProperty>, SchemaError> {
        let classes = self.read();
        let entry = classes.get(&class.name).ok_or_else(|| class_not_found(&class.name))?;
        Ok(entry.properties.get(name).map(|kind| SchemaProperty {
            name: name.to_string(),
            kind: *kind,
        }))
    }

    fn get_properties(&self, class: &SchemaClass) -> Result<Vec<SchemaProperty>, SchemaError> {
        let classes = self.read();
        let entry = classes.get(&class.name).ok_or_else(|| class_not_found(&class.name))?;
        Ok(entry
            .properties
            .iter()
            .map(|(name, kind)| SchemaProperty {
                name: name.clone(),
                kind: *kind,
            })
            .collect())
    }

    fn create_property(
        &self,
        class: &SchemaClass,
        name: &str,
        kind: ValueKind,
    ) -> Result<SchemaProperty, SchemaError> {
        let mut classes = self.write();
        let entry = classes
            .get_mut(&class.name)
            .ok_or_else(|| class_not_found(&class.name))?;
        if entry.properties.contains_key(name) {
            return Err(SchemaError::AlreadyExists {
                what: "Property",
                name: format!("{}.{}", class.name, name),
            });
        }
        entry.properties.insert(name.to_string(), kind);
        Ok(SchemaProperty {
            name: name.to_string(),
            kind,
        })
    }

    fn get_indexes(&self, class: &SchemaClass) -> Result<Vec<SchemaIndex>, SchemaError> {
        let classes = self.read();
        let entry = classes.get(&class.name).ok_or_else(|| class_not_found(&class.name))?;
        Ok(entry.indexes.values().cloned().collect())
    }

    fn create_unique_index(
        &self,
        class: &SchemaClass,
        index_name: &str,
        field_name: &str,
    ) -> Result<SchemaIndex, SchemaError> {
        let mut classes = self.write();
        let entry = classes
            .get_mut(&class.name)
            .ok_or_else(|| class_not_found(&class.name))?;
        if entry.indexes.contains_key(index_name) {
            return Err(SchemaError::AlreadyExists {
                what: "Index",
                name: index_name.to_string(),
            });
        }
        let index = SchemaIndex {
            name: index_name.to_string(),
            fields: vec![field_name.to_string()],
            index_type: IndexType::Unique,
        };
        entry.indexes.insert(index_name.to_string(), index.clone());
        Ok(index)
    }
}
