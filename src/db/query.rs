//! Query execution utilities.

use std::collections::BTreeMap;

use cozo::{DataValue, DbInstance, NamedRows, ScriptMutability};

use super::DbError;

/// Type alias for query parameters.
pub type Params = BTreeMap<String, DataValue>;

/// Run a mutable query (insert, delete, create, etc.)
pub fn run_query(db: &DbInstance, script: &str, params: Params) -> Result<NamedRows, DbError> {
    db.run_script(script, params, ScriptMutability::Mutable)
        .map_err(|e| DbError::QueryFailed {
            message: format!("{:?}", e),
        })
}

/// Run a mutable query with no parameters
pub fn run_query_no_params(db: &DbInstance, script: &str) -> Result<NamedRows, DbError> {
    run_query(db, script, Params::new())
}

/// Check whether a stored relation with the given name exists.
pub fn relation_exists(db: &DbInstance, name: &str) -> Result<bool, DbError> {
    let rows = run_query_no_params(db, "::relations")?;
    Ok(rows
        .rows
        .iter()
        .any(|row| matches!(row.first(), Some(DataValue::Str(s)) if s.as_str() == name)))
}

/// Try to create a relation, returning Ok(true) if created, Ok(false) if already exists
pub fn try_create_relation(db: &DbInstance, script: &str) -> Result<bool, DbError> {
    match run_query_no_params(db, script) {
        Ok(_) => Ok(true),
        Err(e) => {
            let err_str = e.to_string();
            if err_str.contains("AlreadyExists") || err_str.contains("stored_relation_conflict") {
                Ok(false)
            } else {
                Err(e)
            }
        }
    }
}

/// Extract a string cell from a result row.
pub fn extract_string(row: &[DataValue], index: usize, name: &str) -> Result<String, DbError> {
    match row.get(index) {
        Some(DataValue::Str(s)) => Ok(s.to_string()),
        Some(other) => Err(DbError::BadValue {
            name: name.to_string(),
            message: format!("expected string, found {:?}", other),
        }),
        None => Err(DbError::MissingColumn {
            name: name.to_string(),
        }),
    }
}

/// Extract a list-of-strings cell from a result row.
pub fn extract_string_list(
    row: &[DataValue],
    index: usize,
    name: &str,
) -> Result<Vec<String>, DbError> {
    match row.get(index) {
        Some(DataValue::List(items)) => items
            .iter()
            .map(|item| match item {
                DataValue::Str(s) => Ok(s.to_string()),
                other => Err(DbError::BadValue {
                    name: name.to_string(),
                    message: format!("expected string list element, found {:?}", other),
                }),
            })
            .collect(),
        Some(other) => Err(DbError::BadValue {
            name: name.to_string(),
            message: format!("expected list, found {:?}", other),
        }),
        None => Err(DbError::MissingColumn {
            name: name.to_string(),
        }),
    }
}
