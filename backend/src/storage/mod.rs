//! SQLite persistence of the forms service.
//!
//! A [`Database`] only knows the file path: each operation opens its own
//! connection, making sure the schema exists first. Three tables live in it:
//!
//! - `forms` and `form_fields`: the backend records served by `/api/forms`,
//!   with auto-increment ids.
//! - `kv`: the key-value store behind the submission logs.

pub mod forms;
pub mod kv;

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use thiserror::Error;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS forms (
    form_id       INTEGER PRIMARY KEY AUTOINCREMENT,
    title         TEXT    NOT NULL,
    description   TEXT    NOT NULL DEFAULT '',
    is_active     INTEGER NOT NULL DEFAULT 1,
    theme         TEXT    NOT NULL,
    created_date  TEXT    NOT NULL,
    created_by    INTEGER NOT NULL,
    modified_date TEXT    NOT NULL,
    modified_by   INTEGER NOT NULL
);
CREATE TABLE IF NOT EXISTS form_fields (
    field_id      INTEGER PRIMARY KEY AUTOINCREMENT,
    form_id       INTEGER NOT NULL,
    label         TEXT    NOT NULL,
    field_type_id INTEGER NOT NULL,
    is_required   INTEGER NOT NULL,
    placeholder   TEXT,
    sort_order    INTEGER NOT NULL,
    is_active     INTEGER NOT NULL DEFAULT 1,
    created_date  TEXT    NOT NULL,
    created_by    INTEGER NOT NULL,
    modified_date TEXT    NOT NULL,
    modified_by   INTEGER NOT NULL,
    configuration TEXT    NOT NULL
);
CREATE INDEX IF NOT EXISTS form_fields_form_id ON form_fields (form_id);
CREATE TABLE IF NOT EXISTS kv (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("form {0} not found")]
    NotFound(i64),
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("stored JSON column is invalid: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a connection with the schema in place.
    pub fn connect(&self) -> Result<Connection, rusqlite::Error> {
        let conn = Connection::open(&self.path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(conn)
    }
}
