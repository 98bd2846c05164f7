//! DuckDB key-value store implementation

use std::path::Path;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use async_trait::async_trait;
use duckdb::{params, Connection};

use crate::domain::result::{Error, Result};
use crate::ports::KeyValueStore;

/// Maximum number of retries when database file is locked
const MAX_RETRIES: u32 = 5;

/// Initial retry delay in milliseconds (doubles each retry: 50, 100, 200, 400, 800ms)
const INITIAL_RETRY_DELAY_MS: u64 = 50;

/// Check if an error message indicates a file locking issue that should be retried
fn is_retryable_error(err_msg: &str) -> bool {
    let lower = err_msg.to_lowercase();
    // Windows error messages
    lower.contains("being used by another process")
        || lower.contains("cannot access the file")
        // Unix/macOS error messages
        || lower.contains("resource temporarily unavailable")
        || lower.contains("database is locked")
        || lower.contains("file is already open")
}

/// DuckDB-backed key-value store
///
/// One `kv` table of string pairs. All records this store holds are opaque
/// to it; serialization happens in the services that own each key.
pub struct DuckDbKeyValueStore {
    conn: Mutex<Connection>,
}

impl DuckDbKeyValueStore {
    /// Open (or create) the store at the given path
    ///
    /// Includes retry logic with exponential backoff for file locking
    /// errors, which can occur when a second process touches the database
    /// while a command is running.
    pub fn new(db_path: &Path) -> Result<Self> {
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            match Self::try_open_connection(db_path) {
                Ok(conn) => {
                    let store = Self {
                        conn: Mutex::new(conn),
                    };
                    store.ensure_schema()?;
                    return Ok(store);
                }
                Err(e) => {
                    let err_msg = e.to_string();
                    if is_retryable_error(&err_msg) && attempt < MAX_RETRIES - 1 {
                        let delay =
                            Duration::from_millis(INITIAL_RETRY_DELAY_MS * 2u64.pow(attempt));
                        eprintln!(
                            "[moonwallet] Database busy, retrying in {}ms (attempt {}/{}): {}",
                            delay.as_millis(),
                            attempt + 1,
                            MAX_RETRIES,
                            err_msg
                        );
                        thread::sleep(delay);
                        last_error = Some(e);
                        continue;
                    }
                    return Err(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            Error::persistence(format!("Failed to open database after {} retries", MAX_RETRIES))
        }))
    }

    /// Attempt to open a database connection (called by new() with retry logic)
    fn try_open_connection(db_path: &Path) -> Result<Connection> {
        // Disable extension autoloading to avoid macOS code signing issues
        // with cached extensions in ~/.duckdb/extensions
        let config = duckdb::Config::default()
            .enable_autoload_extension(false)
            .map_err(|e| Error::persistence(e.to_string()))?;
        Connection::open_with_flags(db_path, config)
            .map_err(|e| Error::persistence(e.to_string()))
    }

    /// Ensure the kv table exists
    fn ensure_schema(&self) -> Result<()> {
        let conn = self.lock_conn()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
        )
        .map_err(|e| Error::persistence(e.to_string()))?;
        Ok(())
    }

    fn lock_conn(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| Error::persistence(format!("Lock poisoned: {}", e)))
    }
}

#[async_trait]
impl KeyValueStore for DuckDbKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn
            .prepare("SELECT value FROM kv WHERE key = ?")
            .map_err(|e| Error::persistence(e.to_string()))?;
        let mut rows = stmt
            .query_map(params![key], |row| row.get::<_, String>(0))
            .map_err(|e| Error::persistence(e.to_string()))?;

        match rows.next() {
            Some(Ok(value)) => Ok(Some(value)),
            Some(Err(e)) => Err(Error::persistence(e.to_string())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.lock_conn()?;
        conn.execute(
            "INSERT INTO kv (key, value) VALUES (?, ?)
             ON CONFLICT (key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )
        .map_err(|e| Error::persistence(e.to_string()))?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let conn = self.lock_conn()?;
        conn.execute("DELETE FROM kv WHERE key = ?", params![key])
            .map_err(|e| Error::persistence(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_set_get_remove() {
        let dir = TempDir::new().unwrap();
        let store = DuckDbKeyValueStore::new(&dir.path().join("test.duckdb")).unwrap();

        assert_eq!(store.get("balance").await.unwrap(), None);

        store.set("balance", "100.50").await.unwrap();
        assert_eq!(
            store.get("balance").await.unwrap(),
            Some("100.50".to_string())
        );

        store.set("balance", "42").await.unwrap();
        assert_eq!(store.get("balance").await.unwrap(), Some("42".to_string()));

        store.remove("balance").await.unwrap();
        assert_eq!(store.get("balance").await.unwrap(), None);

        // Removing an absent key is not an error
        store.remove("balance").await.unwrap();
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("test.duckdb");

        {
            let store = DuckDbKeyValueStore::new(&db_path).unwrap();
            store.set("user", r#"{"email":"a@x.com"}"#).await.unwrap();
        }

        let store = DuckDbKeyValueStore::new(&db_path).unwrap();
        assert_eq!(
            store.get("user").await.unwrap(),
            Some(r#"{"email":"a@x.com"}"#.to_string())
        );
    }

    #[test]
    fn test_retryable_error_detection() {
        assert!(is_retryable_error("database is locked"));
        assert!(is_retryable_error(
            "The process cannot access the file because it is being used by another process"
        ));
        assert!(!is_retryable_error("no such table: kv"));
    }
}
