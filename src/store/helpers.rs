use rusqlite::{params, Connection, OptionalExtension};

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::data::DBConnection;
use crate::internal_error::InternalResult;
use crate::tasks::data::Task;

use super::data::*;

/// Local storage persisted in a single SQLite table.
#[derive(Clone)]
pub struct SqliteStore {
    db_connection: DBConnection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> InternalResult<SqliteStore> {
        SqliteStore::from_connection(Connection::open(path)?)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> InternalResult<SqliteStore> {
        SqliteStore::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(connection: Connection) -> InternalResult<SqliteStore> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS local_storage (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            params![],
        )?;

        Ok(SqliteStore {
            db_connection: Arc::new(Mutex::new(connection)),
        })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> InternalResult<Option<String>> {
        let db_connection = self.db_connection.lock()?;

        let value = db_connection
            .query_row(
                "SELECT value FROM local_storage WHERE key = (?1)",
                params![key],
                |row| row.get::<usize, String>(0),
            )
            .optional()?;

        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> InternalResult<()> {
        let db_connection = self.db_connection.lock()?;

        db_connection.execute(
            "INSERT OR REPLACE INTO local_storage (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;

        Ok(())
    }

    fn remove(&self, key: &str) -> InternalResult<()> {
        let db_connection = self.db_connection.lock()?;

        db_connection.execute("DELETE FROM local_storage WHERE key = (?1)", params![key])?;

        Ok(())
    }
}

#[cfg(test)]
use std::collections::HashMap;

/// Volatile store; clones share the same map.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> InternalResult<Option<String>> {
        Ok(self.values.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> InternalResult<()> {
        self.values.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> InternalResult<()> {
        self.values.lock()?.remove(key);
        Ok(())
    }
}

/// Stores each user's collection as a JSON array under `tasks_<username>`.
pub struct StoreRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> StoreRepository<S> {
    pub fn new(store: S) -> StoreRepository<S> {
        StoreRepository { store }
    }
}

impl<S: KeyValueStore> TaskRepository for StoreRepository<S> {
    fn load(&self, username: &str) -> Vec<Task> {
        let saved = match self.store.get(&tasks_key(username)) {
            Ok(Some(v)) => v,
            Ok(None) => return vec![],
            Err(e) => {
                tracing::error!(user = username, error = %e, "could not read task collection");
                return vec![];
            }
        };

        match serde_json::from_str::<Vec<Task>>(&saved) {
            Ok(tasks) => tasks,
            Err(e) => {
                tracing::warn!(user = username, error = %e, "discarding corrupt task collection");
                vec![]
            }
        }
    }

    /// An empty collection removes the key; loading it back gives an empty list.
    fn save(&self, username: &str, tasks: &[Task]) -> InternalResult<()> {
        if tasks.is_empty() {
            return self.store.remove(&tasks_key(username));
        }

        let encoded = serde_json::to_string(tasks)?;
        self.store.set(&tasks_key(username), &encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn sample_task() -> Task {
        Task {
            id: 1_700_000_000_000,
            text: "Buy milk".to_string(),
            deadline: Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
            done: false,
            favorite: true,
            notified: false,
        }
    }

    #[test]
    fn sqlite_store_overwrites_and_removes() {
        let store = SqliteStore::open_in_memory().unwrap();

        assert_eq!(store.get("theme").unwrap(), None);
        store.set("theme", "dark").unwrap();
        store.set("theme", "ocean").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("ocean"));

        store.remove("theme").unwrap();
        assert_eq!(store.get("theme").unwrap(), None);
    }

    #[test]
    fn sqlite_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rtasks.db");

        {
            let repository = StoreRepository::new(SqliteStore::open(&path).unwrap());
            repository.save("alice", &[sample_task()]).unwrap();
        }

        let repository = StoreRepository::new(SqliteStore::open(&path).unwrap());
        assert_eq!(repository.load("alice"), vec![sample_task()]);
        assert!(repository.load("bob").is_empty());
    }

    #[rstest]
    #[case("not json")]
    #[case("{\"id\": 1}")]
    #[case("[{\"id\": \"one\"}]")]
    fn corrupt_collection_loads_empty(#[case] stored: &str) {
        let store = MemoryStore::default();
        store.set(&tasks_key("alice"), stored).unwrap();

        let repository = StoreRepository::new(store);
        assert!(repository.load("alice").is_empty());
    }

    #[test]
    fn emptied_collection_clears_its_key() {
        let store = MemoryStore::default();
        let repository = StoreRepository::new(store.clone());

        repository.save("alice", &[sample_task()]).unwrap();
        repository.save("alice", &[]).unwrap();

        assert_eq!(store.get("tasks_alice").unwrap(), None);
        assert!(repository.load("alice").is_empty());
    }

    #[test]
    fn collection_uses_browser_storage_layout() {
        let store = MemoryStore::default();
        let repository = StoreRepository::new(store.clone());
        repository.save("alice", &[sample_task()]).unwrap();

        let raw = store.get("tasks_alice").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let task = &value[0];

        assert_eq!(task["id"], 1_700_000_000_000i64);
        assert_eq!(task["text"], "Buy milk");
        assert_eq!(task["createdAt"], 1_704_103_200_000i64);
        assert_eq!(task["favorite"], true);
        assert_eq!(task["notified"], false);
    }
}
