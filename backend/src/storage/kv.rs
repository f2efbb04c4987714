use crate::storage::Database;
use common::storage::{KeyValueStore, StoreError};
use rusqlite::{params, OptionalExtension};

/// [`KeyValueStore`] over the `kv` table.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

fn backend(e: rusqlite::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let conn = self.db.connect().map_err(backend)?;
        conn.query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
            row.get::<_, String>(0)
        })
        .optional()
        .map_err(backend)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let conn = self.db.connect().map_err(backend)?;
        conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )
        .map_err(backend)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let conn = self.db.connect().map_err(backend)?;
        conn.execute("DELETE FROM kv WHERE key = ?1", params![key])
            .map_err(backend)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::submission::{FormSubmission, SubmissionData};
    use common::storage::SubmissionStore;
    use tempfile::tempdir;

    #[test]
    fn values_survive_reconnects() {
        let dir = tempdir().unwrap();
        let store = SqliteStore::new(Database::new(dir.path().join("kv.sqlite")));

        assert_eq!(store.get("a").unwrap(), None);
        store.set("a", "1").unwrap();
        store.set("a", "2").unwrap();

        let reopened = SqliteStore::new(Database::new(dir.path().join("kv.sqlite")));
        assert_eq!(reopened.get("a").unwrap().as_deref(), Some("2"));

        reopened.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
    }

    #[test]
    fn backs_a_submission_store() {
        let dir = tempdir().unwrap();
        let submissions =
            SubmissionStore::new(SqliteStore::new(Database::new(dir.path().join("s.sqlite"))));

        let first = FormSubmission::new(SubmissionData::new());
        let second = FormSubmission::new(SubmissionData::new());
        submissions.append("7", first.clone()).unwrap();
        submissions.append("7", second.clone()).unwrap();

        assert_eq!(submissions.list("7").unwrap(), vec![first.clone(), second]);
        assert!(submissions.remove("7", &first.id).unwrap());
        assert_eq!(submissions.list("7").unwrap().len(), 1);
    }
}
