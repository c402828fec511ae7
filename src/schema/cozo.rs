//! CozoDB-backed schema engine.
//!
//! Classes, properties and indexes are rows of the catalog relations in
//! [`crate::db::catalog`]. Uniqueness is checked before each write; like any
//! check-then-create sequence this is not atomic across connections.

use std::sync::Arc;

use cozo::{DataValue, DbInstance};

use super::{IndexType, SchemaClass, SchemaEngine, SchemaError, SchemaIndex, SchemaProperty, ValueKind};
use crate::db::catalog::{ensure_catalog, CatalogRelation, ENTITY_CLASS, ENTITY_INDEX, ENTITY_PROPERTY};
use crate::db::{extract_string, extract_string_list, run_query, Params};

/// Schema engine storing the catalog in a CozoDB instance.
#[derive(Clone)]
pub struct CozoSchema {
    db: Arc<DbInstance>,
}

impl CozoSchema {
    /// Wrap a database, creating the catalog relations if they are missing.
    pub fn new(db: Arc<DbInstance>) -> Result<Self, SchemaError> {
        ensure_catalog(&db)?;
        Ok(Self { db })
    }

    /// An empty schema in a fresh in-memory database.
    pub fn open_mem() -> Result<Self, SchemaError> {
        Self::new(Arc::new(crate::db::open_mem_db()?))
    }

    pub fn db(&self) -> &DbInstance {
        &self.db
    }

    fn query(&self, script: &str, params: Params) -> Result<Vec<Vec<DataValue>>, SchemaError> {
        Ok(run_query(&self.db, script, params)?.rows)
    }

    fn put(&self, relation: &CatalogRelation, row: Vec<DataValue>) -> Result<(), SchemaError> {
        let columns = relation.column_list();
        let placeholders = (0..row.len()).map(|i| format!("$p{}", i)).collect::<Vec<_>>().join(", ");
        let script = format!(
            "?[{}] <- [[{}]]\n:put {} {}",
            columns,
            placeholders,
            relation.name,
            relation.binding_spec()
        );
        let params = row
            .into_iter()
            .enumerate()
            .map(|(i, value)| (format!("p{}", i), value))
            .collect();
        self.query(&script, params)?;
        Ok(())
    }

    fn require_class(&self, class: &SchemaClass) -> Result<(), SchemaError> {
        match self.lookup_class(&class.name)? {
            Some(_) => Ok(()),
            None => Err(SchemaError::ClassNotFound {
                name: class.name.clone(),
            }),
        }
    }

    fn class_properties(
        &self,
        class: &str,
        name: Option<&str>,
    ) -> Result<Vec<SchemaProperty>, SchemaError> {
        let mut params = class_params(class);
        let script = match name {
            Some(name) => {
                params.insert("name".to_string(), str_value(name));
                "?[name, kind] := *entity_property{class, name, kind}, class = $class, name = $name"
            }
            None => "?[name, kind] := *entity_property{class, name, kind}, class = $class\n:order name",
        };

        self.query(script, params)?
            .iter()
            .map(|row| -> Result<SchemaProperty, SchemaError> {
                Ok(SchemaProperty {
                    name: extract_string(row, 0, "name")?,
                    kind: extract_string(row, 1, "kind")?.parse()?,
                })
            })
            .collect()
    }
}

fn str_value(s: &str) -> DataValue {
    DataValue::Str(s.into())
}

fn list_value(items: impl IntoIterator<Item = String>) -> DataValue {
    DataValue::List(items.into_iter().map(|s| DataValue::Str(s.into())).collect())
}

fn class_params(class: &str) -> Params {
    let mut params = Params::new();
    params.insert("class".to_string(), str_value(class));
    params
}

fn row_to_class(row: &[DataValue]) -> Result<SchemaClass, SchemaError> {
    Ok(SchemaClass {
        name: extract_string(row, 0, "name")?,
        parents: extract_string_list(row, 1, "parents")?,
    })
}

impl SchemaEngine for CozoSchema {
    fn backend_name(&self) -> &'static str {
        "CozoSchema"
    }

    fn lookup_class(&self, name: &str) -> Result<Option<SchemaClass>, SchemaError> {
        let mut params = Params::new();
        params.insert("name".to_string(), str_value(name));
        let rows = self.query(
            "?[name, parents] := *entity_class{name, parents}, name = $name",
            params,
        )?;
        rows.first().map(|row| row_to_class(row)).transpose()
    }

    fn create_class(&self, name: &str, parents: &[SchemaClass]) -> Result<SchemaClass, SchemaError> {
        if self.lookup_class(name)?.is_some() {
            return Err(SchemaError::AlreadyExists {
                what: "Class",
                name: name.to_string(),
            });
        }
        for parent in parents {
            self.require_class(parent)?;
        }

        let class = SchemaClass {
            name: name.to_string(),
            parents: parents.iter().map(|p| p.name.clone()).collect(),
        };
        self.put(
            &ENTITY_CLASS,
            vec![str_value(&class.name), list_value(class.parents.iter().cloned())],
        )?;
        Ok(class)
    }

    fn list_classes(&self) -> Result<Vec<SchemaClass>, SchemaError> {
        self.query(
            "?[name, parents] := *entity_class{name, parents}\n:order name",
            Params::new(),
        )?
        .iter()
        .map(|row| row_to_class(row))
        .collect()
    }

    fn get_property(
        &self,
        class: &SchemaClass,
        name: &str,
    ) -> Result<Option<SchemaProperty>, SchemaError> {
        self.require_class(class)?;
        Ok(self.class_properties(&class.name, Some(name))?.into_iter().next())
    }

    fn get_properties(&self, class: &SchemaClass) -> Result<Vec<SchemaProperty>, SchemaError> {
        self.require_class(class)?;
        self.class_properties(&class.name, None)
    }

    fn create_property(
        &self,
        class: &SchemaClass,
        name: &str,
        kind: ValueKind,
    ) -> Result<SchemaProperty, SchemaError> {
        if self.get_property(class, name)?.is_some() {
            return Err(SchemaError::AlreadyExists {
                what: "Property",
                name: format!("{}.{}", class.name, name),
            });
        }
        self.put(
            &ENTITY_PROPERTY,
            vec![str_value(&class.name), str_value(name), str_value(kind.as_str())],
        )?;
        Ok(SchemaProperty {
            name: name.to_string(),
            kind,
        })
    }

    fn get_indexes(&self, class: &SchemaClass) -> Result<Vec<SchemaIndex>, SchemaError> {
        self.require_class(class)?;
        self.query(
            "?[name, fields, index_type] := *entity_index{class, name, fields, index_type}, class = $class\n:order name",
            class_params(&class.name),
        )?
        .iter()
        .map(|row| -> Result<SchemaIndex, SchemaError> {
            Ok(SchemaIndex {
                name: extract_string(row, 0, "name")?,
                fields: extract_string_list(row, 1, "fields")?,
                index_type: extract_string(row, 2, "index_type")?.parse()?,
            })
        })
        .collect()
    }

    fn create_unique_index(
        &self,
        class: &SchemaClass,
        index_name: &str,
        field_name: &str,
    ) -> Result<SchemaIndex, SchemaError> {
        if self.get_indexes(class)?.iter().any(|index| index.name == index_name) {
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
        self.put(
            &ENTITY_INDEX,
            vec![
                str_value(&class.name),
                str_value(&index.name),
                list_value(index.fields.iter().cloned()),
                str_value(index.index_type.as_str()),
            ],
        )?;
        Ok(index)
    }
}
