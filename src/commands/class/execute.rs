use std::error::Error;
use std::sync::Arc;

use cozo::DbInstance;
use serde::Serialize;

use super::ClassCmd;
use crate::commands::classes::ClassDetail;
use crate::commands::Execute;
use crate::schema::{CozoSchema, SchemaEngine, SchemaError};

#[derive(Debug, Serialize)]
pub struct ClassResult {
    pub class: ClassDetail,
}

impl Execute for ClassCmd {
    type Output = ClassResult;

    fn execute(self, db: &Arc<DbInstance>) -> Result<Self::Output, Box<dyn Error>> {
        let schema = CozoSchema::new(Arc::clone(db))?;
        let class = schema
            .lookup_class(&self.name)?
            .ok_or(SchemaError::ClassNotFound { name: self.name })?;
        Ok(ClassResult {
            class: ClassDetail::load(&schema, class)?,
        })
    }
}
