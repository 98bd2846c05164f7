//! In-memory key-value store
//!
//! A `HashMap` behind the same port as the durable store. Used by tests as
//! a drop-in substitute, and by embedders that want a throwaway context.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::result::{Error, Result};
use crate::ports::KeyValueStore;

#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key, for tests that start from persisted state
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .lock()
            .expect("lock poisoned")
            .insert(key.to_string(), value.to_string());
        self
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| Error::persistence(format!("Lock poisoned: {}", e)))?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| Error::persistence(format!("Lock poisoned: {}", e)))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| Error::persistence(format!("Lock poisoned: {}", e)))?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_basic_operations() {
        let store = InMemoryKeyValueStore::new();

        assert_eq!(store.get("users").await.unwrap(), None);
        store.set("users", "[]").await.unwrap();
        assert_eq!(store.get("users").await.unwrap(), Some("[]".to_string()));
        store.remove("users").await.unwrap();
        assert_eq!(store.get("users").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_with_entry() {
        let store = InMemoryKeyValueStore::new().with_entry("balance", "250");
        assert_eq!(store.get("balance").await.unwrap(), Some("250".to_string()));
    }
}
