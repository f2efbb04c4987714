//! Shared state injected into every handler as `web::Data<AppState>`.

use crate::config::Config;
use crate::storage::kv::SqliteStore;
use crate::storage::Database;
use common::storage::SubmissionStore;

/// Clonable handle to the service's storage and settings.
///
/// Holds no connection: handlers open one per request through [`Database`].
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    /// User id recorded when a save request does not name one.
    pub actor_id: i64,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            db: Database::new(&config.db_path),
            actor_id: config.actor_id,
        }
    }

    /// Submission logs, kept in the `kv` table.
    pub fn submissions(&self) -> SubmissionStore<SqliteStore> {
        SubmissionStore::new(SqliteStore::new(self.db.clone()))
    }
}
