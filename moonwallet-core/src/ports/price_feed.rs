//! Price feed port
//!
//! Defines the narrow interface to the external market-data collaborator
//! so UI-facing services can be tested against a stub returning fixed
//! snapshots.

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::domain::CoinSnapshot;

/// Market data provider trait
///
/// Implementations fetch coin snapshots from an external source (CoinGecko,
/// fixed demo data). Both operations are fire-and-forget fetches; callers
/// own caching and fallback.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Provider name (e.g. "coingecko", "demo")
    fn name(&self) -> &str;

    /// Fetch the ranked coin listing (descending market cap)
    async fn coin_listing(&self) -> Result<Vec<CoinSnapshot>>;

    /// Fetch one coin by id, including the 7-day sparkline when available
    async fn coin_detail(&self, coin_id: &str) -> Result<CoinSnapshot>;
}
