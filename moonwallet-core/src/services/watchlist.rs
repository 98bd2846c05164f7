//! Watchlist service - coins saved from the detail view

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::result::Result;
use crate::domain::CoinSnapshot;
use crate::ports::KeyValueStore;

/// Persisted record key (identical to the mobile app's storage key)
const SAVED_COINS_KEY: &str = "savedCoins";

/// Watchlist service owning the saved-coins list
pub struct WatchlistService {
    store: Arc<dyn KeyValueStore>,
    // Serializes concurrent saves so the read-modify-write cannot lose one
    write_guard: Mutex<()>,
}

impl WatchlistService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_guard: Mutex::new(()),
        }
    }

    /// Saved coins, oldest first; empty when the record is absent or unreadable
    pub async fn saved_coins(&self) -> Result<Vec<CoinSnapshot>> {
        let raw = self.store.get(SAVED_COINS_KEY).await?;
        Ok(raw
            .and_then(|r| serde_json::from_str(&r).ok())
            .unwrap_or_default())
    }

    /// Save a coin; returns false when a coin with the same id is already saved
    pub async fn save(&self, coin: CoinSnapshot) -> Result<bool> {
        let _guard = self.write_guard.lock().await;

        let mut saved = self.saved_coins().await?;
        if saved.iter().any(|c| c.id == coin.id) {
            return Ok(false);
        }

        saved.push(coin);
        let raw = serde_json::to_string(&saved)?;
        self.store.set(SAVED_COINS_KEY, &raw).await?;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryKeyValueStore;
    use rust_decimal::Decimal;

    fn snapshot(id: &str) -> CoinSnapshot {
        CoinSnapshot::new(id, id.to_uppercase(), id, Decimal::ONE)
    }

    #[tokio::test]
    async fn test_save_and_list() {
        let service = WatchlistService::new(Arc::new(InMemoryKeyValueStore::new()));

        assert!(service.saved_coins().await.unwrap().is_empty());

        assert!(service.save(snapshot("bitcoin")).await.unwrap());
        assert!(service.save(snapshot("ethereum")).await.unwrap());

        let saved = service.saved_coins().await.unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].id, "bitcoin");
    }

    #[tokio::test]
    async fn test_save_is_idempotent_per_id() {
        let service = WatchlistService::new(Arc::new(InMemoryKeyValueStore::new()));

        assert!(service.save(snapshot("bitcoin")).await.unwrap());
        assert!(!service.save(snapshot("bitcoin")).await.unwrap());

        assert_eq!(service.saved_coins().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_record_reads_as_empty() {
        let store = Arc::new(InMemoryKeyValueStore::new().with_entry("savedCoins", "{nope"));
        let service = WatchlistService::new(store as Arc<dyn KeyValueStore>);

        assert!(service.saved_coins().await.unwrap().is_empty());
        // A save overwrites the corrupt record
        assert!(service.save(snapshot("bitcoin")).await.unwrap());
        assert_eq!(service.saved_coins().await.unwrap().len(), 1);
    }
}
