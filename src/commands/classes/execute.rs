use std::error::Error;
use std::sync::Arc;

use cozo::DbInstance;
use serde::Serialize;

use super::ClassesCmd;
use crate::commands::Execute;
use crate::schema::{CozoSchema, SchemaClass, SchemaEngine, SchemaError, SchemaIndex, SchemaProperty};

/// A class together with everything declared on it.
#[derive(Debug, Clone, Serialize)]
pub struct ClassDetail {
    pub name: String,
    pub parents: Vec<String>,
    pub properties: Vec<SchemaProperty>,
    pub indexes: Vec<SchemaIndex>,
}

impl ClassDetail {
    pub fn load(schema: &dyn SchemaEngine, class: SchemaClass) -> Result<Self, SchemaError> {
        let properties = schema.get_properties(&class)?;
        let indexes = schema.get_indexes(&class)?;
        Ok(Self {
            name: class.name,
            parents: class.parents,
            properties,
            indexes,
        })
    }
}

#[derive(Debug, Default, Serialize)]
pub struct ClassesResult {
    pub filter: Option<String>,
    pub classes: Vec<ClassDetail>,
}

impl Execute for ClassesCmd {
    type Output = ClassesResult;

    fn execute(self, db: &Arc<DbInstance>) -> Result<Self::Output, Box<dyn Error>> {
        let schema = CozoSchema::new(Arc::clone(db))?;
        let classes = schema
            .list_classes()?
            .into_iter()
            .filter(|class| match &self.filter {
                Some(filter) => class.name.contains(filter.as_str()),
                None => true,
            })
            .map(|class| ClassDetail::load(&schema, class))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ClassesResult {
            filter: self.filter,
            classes,
        })
    }
}
