//! Database connection management.

use std::path::Path;

use cozo::DbInstance;

use super::DbError;

/// Open a CozoDB database backed by SQLite storage.
///
/// The file is created if it does not exist yet.
pub fn open_db(path: &Path) -> Result<DbInstance, DbError> {
    DbInstance::new("sqlite", path, "").map_err(|e| DbError::OpenFailed {
        path: path.display().to_string(),
        message: format!("{:?}", e),
    })
}

/// Create an in-memory database instance.
///
/// Every call returns a fresh, empty database.
pub fn open_mem_db() -> Result<DbInstance, DbError> {
    DbInstance::new("mem", "", "").map_err(|e| DbError::OpenFailed {
        path: ":memory:".to_string(),
        message: format!("{:?}", e),
    })
}
