//! Coin snapshot domain model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A point-in-time view of one coin's market data
///
/// Listing rows carry no sparkline; the detail view may include the 7-day
/// price series. Prices are quoted in the configured vs-currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinSnapshot {
    /// Upstream coin id, e.g. "bitcoin"
    pub id: String,
    pub name: String,
    /// Ticker symbol, normalized to uppercase
    pub symbol: String,
    pub current_price: Decimal,
    pub market_cap: Decimal,
    pub volume_24h: Decimal,
    pub change_24h_percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sparkline_7d: Option<Vec<f64>>,
}

impl CoinSnapshot {
    /// Create a listing-row snapshot (no sparkline)
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        symbol: impl Into<String>,
        current_price: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            symbol: Self::normalize_symbol(&symbol.into()),
            current_price,
            market_cap: Decimal::ZERO,
            volume_24h: Decimal::ZERO,
            change_24h_percent: 0.0,
            sparkline_7d: None,
        }
    }

    /// Normalize a ticker symbol to uppercase
    pub fn normalize_symbol(symbol: &str) -> String {
        symbol.trim().to_uppercase()
    }

    /// Built-in listing used when the feed is down and no cache exists
    ///
    /// Matches the static trio the mobile app shipped with. Prices are
    /// placeholders, not quotes.
    pub fn fallback_listing() -> Vec<CoinSnapshot> {
        vec![
            CoinSnapshot::new("bitcoin", "Bitcoin", "btc", Decimal::new(68300, 0)),
            CoinSnapshot::new("ethereum", "Ethereum", "eth", Decimal::new(3250, 0)),
            CoinSnapshot::new("solana", "Solana", "sol", Decimal::new(160, 0)),
        ]
    }
}
