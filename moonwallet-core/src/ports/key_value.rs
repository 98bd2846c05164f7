//! Key-value persistence port

use async_trait::async_trait;

use crate::domain::result::Result;

/// Durable local storage abstraction
///
/// String keys to string values, mirroring the mobile platform's async
/// storage. There is no transactional guarantee across keys: callers that
/// write two records (e.g. the registered set and the active session) get
/// last-write-wins semantics per key, nothing more.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` if the key has never been written
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a key; deleting an absent key is not an error
    async fn remove(&self, key: &str) -> Result<()>;
}
