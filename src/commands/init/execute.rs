use std::error::Error;
use std::sync::Arc;

use cozo::DbInstance;
use serde::Serialize;

use super::InitCmd;
use crate::commands::Execute;
use crate::db::catalog::{ensure_catalog, ALL_RELATIONS};

/// One catalog relation and whether this run created it.
#[derive(Debug, Clone, Serialize)]
pub struct RelationStatus {
    pub name: String,
    pub created: bool,
}

#[derive(Debug, Default, Serialize)]
pub struct InitResult {
    pub relations: Vec<RelationStatus>,
}

impl InitResult {
    pub fn created_count(&self) -> usize {
        self.relations.iter().filter(|r| r.created).count()
    }
}

impl Execute for InitCmd {
    type Output = InitResult;

    fn execute(self, db: &Arc<DbInstance>) -> Result<Self::Output, Box<dyn Error>> {
        let created = ensure_catalog(db)?;
        let relations = ALL_RELATIONS
            .iter()
            .map(|relation| RelationStatus {
                name: relation.name.to_string(),
                created: created.contains(&relation.name),
            })
            .collect();
        Ok(InitResult { relations })
    }
}
