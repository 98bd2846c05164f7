//! Market service - coin listing and detail with cache fallback

use std::sync::Arc;

use serde::Serialize;

use crate::domain::CoinSnapshot;
use crate::ports::{KeyValueStore, PriceFeed};

/// Persisted cache keys (identical to the mobile app's storage keys)
const LISTING_CACHE_KEY: &str = "coins";

fn detail_cache_key(coin_id: &str) -> String {
    format!("coin_{}", coin_id)
}

/// Where a market result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Fresh fetch from the price feed
    Live,
    /// Most recently cached snapshot for the same key
    Cache,
    /// Built-in default (listing only)
    Fallback,
}

/// Coin listing plus provenance
#[derive(Debug, Serialize)]
pub struct ListingResult {
    pub coins: Vec<CoinSnapshot>,
    pub source: DataSource,
    pub warnings: Vec<String>,
}

/// Single-coin detail plus provenance; `coin` is None when the feed failed
/// and nothing was cached for that id
#[derive(Debug, Serialize)]
pub struct DetailResult {
    pub coin: Option<CoinSnapshot>,
    pub source: DataSource,
    pub warnings: Vec<String>,
}

/// Market service for the coin-list and coin-detail views
///
/// Feed failures never surface as errors here: the fallback chain
/// (live, then cache, then default/None) is the contract. The result's
/// `source` and `warnings` let front-ends tell the user what they got.
pub struct MarketService {
    feed: Arc<dyn PriceFeed>,
    store: Arc<dyn KeyValueStore>,
}

impl MarketService {
    pub fn new(feed: Arc<dyn PriceFeed>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { feed, store }
    }

    /// Name of the backing price feed
    pub fn feed_name(&self) -> &str {
        self.feed.name()
    }

    /// Ranked coin listing: live, else cached, else the built-in trio
    pub async fn coin_listing(&self) -> ListingResult {
        let mut warnings = Vec::new();

        match self.feed.coin_listing().await {
            Ok(coins) => {
                self.cache_listing(&coins, &mut warnings).await;
                ListingResult {
                    coins,
                    source: DataSource::Live,
                    warnings,
                }
            }
            Err(e) => {
                warnings.push(format!("Failed to fetch live coins: {}", e));
                match self.cached_listing().await {
                    Some(coins) => ListingResult {
                        coins,
                        source: DataSource::Cache,
                        warnings,
                    },
                    None => ListingResult {
                        coins: CoinSnapshot::fallback_listing(),
                        source: DataSource::Fallback,
                        warnings,
                    },
                }
            }
        }
    }

    /// Single coin detail: live, else cached, else None
    pub async fn coin_detail(&self, coin_id: &str) -> DetailResult {
        let mut warnings = Vec::new();

        match self.feed.coin_detail(coin_id).await {
            Ok(coin) => {
                self.cache_detail(&coin, &mut warnings).await;
                DetailResult {
                    coin: Some(coin),
                    source: DataSource::Live,
                    warnings,
                }
            }
            Err(e) => {
                warnings.push(format!("Failed to fetch live data: {}", e));
                match self.cached_detail(coin_id).await {
                    Some(coin) => DetailResult {
                        coin: Some(coin),
                        source: DataSource::Cache,
                        warnings,
                    },
                    None => DetailResult {
                        coin: None,
                        source: DataSource::Fallback,
                        warnings,
                    },
                }
            }
        }
    }

    async fn cache_listing(&self, coins: &[CoinSnapshot], warnings: &mut Vec<String>) {
        match serde_json::to_string(coins) {
            Ok(raw) => {
                if let Err(e) = self.store.set(LISTING_CACHE_KEY, &raw).await {
                    warnings.push(format!("Failed to cache coin listing: {}", e));
                }
            }
            Err(e) => warnings.push(format!("Failed to encode coin listing: {}", e)),
        }
    }

    async fn cached_listing(&self) -> Option<Vec<CoinSnapshot>> {
        let raw = self.store.get(LISTING_CACHE_KEY).await.ok()??;
        serde_json::from_str(&raw).ok()
    }

    async fn cache_detail(&self, coin: &CoinSnapshot, warnings: &mut Vec<String>) {
        match serde_json::to_string(coin) {
            Ok(raw) => {
                if let Err(e) = self.store.set(&detail_cache_key(&coin.id), &raw).await {
                    warnings.push(format!("Failed to cache coin detail: {}", e));
                }
            }
            Err(e) => warnings.push(format!("Failed to encode coin detail: {}", e)),
        }
    }

    async fn cached_detail(&self, coin_id: &str) -> Option<CoinSnapshot> {
        let raw = self.store.get(&detail_cache_key(coin_id)).await.ok()??;
        serde_json::from_str(&raw).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::adapters::demo::DemoPriceFeed;
    use crate::adapters::memory::InMemoryKeyValueStore;
    use crate::domain::result::{Error, Result};

    /// A feed that always fails, for exercising the fallback chain
    struct DownFeed;

    #[async_trait]
    impl PriceFeed for DownFeed {
        fn name(&self) -> &str {
            "down"
        }

        async fn coin_listing(&self) -> Result<Vec<CoinSnapshot>> {
            Err(Error::price_feed("Unable to connect"))
        }

        async fn coin_detail(&self, _coin_id: &str) -> Result<CoinSnapshot> {
            Err(Error::price_feed("Unable to connect"))
        }
    }

    #[tokio::test]
    async fn test_live_listing_populates_cache() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let service = MarketService::new(
            Arc::new(DemoPriceFeed::new()),
            Arc::clone(&store) as Arc<dyn KeyValueStore>,
        );

        let result = service.coin_listing().await;
        assert_eq!(result.source, DataSource::Live);
        assert!(result.warnings.is_empty());
        assert!(store.get("coins").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_listing_falls_back_to_cache() {
        let store = Arc::new(InMemoryKeyValueStore::new());

        // Warm the cache with a live fetch
        let live = MarketService::new(
            Arc::new(DemoPriceFeed::new()),
            Arc::clone(&store) as Arc<dyn KeyValueStore>,
        );
        let warm = live.coin_listing().await;

        // Same store, dead feed
        let down = MarketService::new(
            Arc::new(DownFeed),
            Arc::clone(&store) as Arc<dyn KeyValueStore>,
        );
        let result = down.coin_listing().await;

        assert_eq!(result.source, DataSource::Cache);
        assert_eq!(result.coins.len(), warm.coins.len());
        assert_eq!(result.warnings.len(), 1);
    }

    #[tokio::test]
    async fn test_listing_cold_cache_uses_fallback_trio() {
        let service = MarketService::new(
            Arc::new(DownFeed),
            Arc::new(InMemoryKeyValueStore::new()),
        );

        let result = service.coin_listing().await;
        assert_eq!(result.source, DataSource::Fallback);
        let ids: Vec<&str> = result.coins.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["bitcoin", "ethereum", "solana"]);
    }

    #[tokio::test]
    async fn test_detail_falls_back_to_cache() {
        let store = Arc::new(InMemoryKeyValueStore::new());

        let live = MarketService::new(
            Arc::new(DemoPriceFeed::new()),
            Arc::clone(&store) as Arc<dyn KeyValueStore>,
        );
        live.coin_detail("bitcoin").await;

        let down = MarketService::new(
            Arc::new(DownFeed),
            Arc::clone(&store) as Arc<dyn KeyValueStore>,
        );
        let result = down.coin_detail("bitcoin").await;

        assert_eq!(result.source, DataSource::Cache);
        let coin = result.coin.unwrap();
        assert_eq!(coin.id, "bitcoin");
        // The cached detail keeps its sparkline
        assert!(coin.sparkline_7d.is_some());
    }

    #[tokio::test]
    async fn test_detail_cold_cache_returns_none() {
        let service = MarketService::new(
            Arc::new(DownFeed),
            Arc::new(InMemoryKeyValueStore::new()),
        );

        let result = service.coin_detail("bitcoin").await;
        assert!(result.coin.is_none());
        assert_eq!(result.warnings.len(), 1);
    }

    #[tokio::test]
    async fn test_detail_caches_are_per_coin() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let live = MarketService::new(
            Arc::new(DemoPriceFeed::new()),
            Arc::clone(&store) as Arc<dyn KeyValueStore>,
        );
        live.coin_detail("bitcoin").await;

        let down = MarketService::new(
            Arc::new(DownFeed),
            Arc::clone(&store) as Arc<dyn KeyValueStore>,
        );
        assert!(down.coin_detail("bitcoin").await.coin.is_some());
        assert!(down.coin_detail("ethereum").await.coin.is_none());
    }
}
