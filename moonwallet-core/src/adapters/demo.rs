//! Demo price feed
//!
//! Fixed snapshots behind the same port as the real provider. Selected when
//! demo mode is on, and used by tests as the substitutable stub.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::result::{Error, Result};
use crate::domain::CoinSnapshot;
use crate::ports::PriceFeed;

/// Generate the demo listing (ranked by market cap, like the live feed)
pub fn generate_demo_listing() -> Vec<CoinSnapshot> {
    vec![
        CoinSnapshot {
            id: "bitcoin".to_string(),
            name: "Bitcoin".to_string(),
            symbol: "BTC".to_string(),
            current_price: Decimal::new(6830012, 2),      // $68,300.12
            market_cap: Decimal::new(1345000000000, 0),   // $1.345T
            volume_24h: Decimal::new(28400000000, 0),     // $28.4B
            change_24h_percent: 1.82,
            sparkline_7d: None,
        },
        CoinSnapshot {
            id: "ethereum".to_string(),
            name: "Ethereum".to_string(),
            symbol: "ETH".to_string(),
            current_price: Decimal::new(325050, 2),       // $3,250.50
            market_cap: Decimal::new(390000000000, 0),    // $390B
            volume_24h: Decimal::new(15200000000, 0),     // $15.2B
            change_24h_percent: -0.64,
            sparkline_7d: None,
        },
        CoinSnapshot {
            id: "solana".to_string(),
            name: "Solana".to_string(),
            symbol: "SOL".to_string(),
            current_price: Decimal::new(16045, 2),        // $160.45
            market_cap: Decimal::new(74000000000, 0),     // $74B
            volume_24h: Decimal::new(3100000000, 0),      // $3.1B
            change_24h_percent: 3.91,
            sparkline_7d: None,
        },
    ]
}

/// A 7-day sparkline drifting toward the final price
fn demo_sparkline(final_price: &Decimal) -> Vec<f64> {
    use rust_decimal::prelude::ToPrimitive;

    let end = final_price.to_f64().unwrap_or(0.0);
    // 24 points ~ one week of 7h samples, gentle sinusoidal wobble
    (0..24)
        .map(|i| {
            let t = i as f64 / 23.0;
            let wobble = (t * std::f64::consts::PI * 3.0).sin() * 0.015;
            end * (0.95 + 0.05 * t + wobble)
        })
        .collect()
}

/// Fixed-snapshot price feed for demo mode and tests
#[derive(Debug, Default)]
pub struct DemoPriceFeed;

impl DemoPriceFeed {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PriceFeed for DemoPriceFeed {
    fn name(&self) -> &str {
        "demo"
    }

    async fn coin_listing(&self) -> Result<Vec<CoinSnapshot>> {
        Ok(generate_demo_listing())
    }

    async fn coin_detail(&self, coin_id: &str) -> Result<CoinSnapshot> {
        let mut coin = generate_demo_listing()
            .into_iter()
            .find(|c| c.id == coin_id)
            .ok_or_else(|| Error::price_feed(format!("Unknown demo coin: {}", coin_id)))?;

        coin.sparkline_7d = Some(demo_sparkline(&coin.current_price));
        Ok(coin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_listing_is_ranked() {
        let feed = DemoPriceFeed::new();
        let coins = feed.coin_listing().await.unwrap();

        assert_eq!(coins.len(), 3);
        assert!(coins.windows(2).all(|w| w[0].market_cap >= w[1].market_cap));
    }

    #[tokio::test]
    async fn test_demo_detail_has_sparkline() {
        let feed = DemoPriceFeed::new();
        let coin = feed.coin_detail("bitcoin").await.unwrap();

        assert_eq!(coin.id, "bitcoin");
        let sparkline = coin.sparkline_7d.unwrap();
        assert_eq!(sparkline.len(), 24);
        assert!(sparkline.iter().all(|p| *p > 0.0));
    }

    #[tokio::test]
    async fn test_demo_detail_unknown_coin() {
        let feed = DemoPriceFeed::new();
        let result = feed.coin_detail("dogecoin").await;
        assert!(matches!(result, Err(Error::PriceFeed(_))));
    }
}
