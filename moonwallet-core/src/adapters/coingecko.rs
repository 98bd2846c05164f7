//! CoinGecko API client
//!
//! Handles communication with the public CoinGecko v3 API for the ranked
//! coin listing and per-coin market data.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::result::{Error, Result};
use crate::domain::CoinSnapshot;
use crate::ports::PriceFeed;

const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// How many listing rows to request (one page, descending market cap)
const LISTING_PAGE_SIZE: u32 = 10;

/// CoinGecko market data feed
#[derive(Debug)]
pub struct CoinGeckoFeed {
    client: Client,
    base_url: String,
    vs_currency: String,
    api_key: Option<String>,
}

/// One row of the /coins/markets response
#[derive(Debug, Deserialize)]
struct MarketsRow {
    id: String,
    name: String,
    symbol: String,
    #[serde(default)]
    current_price: Option<Decimal>,
    #[serde(default)]
    market_cap: Option<Decimal>,
    #[serde(default)]
    total_volume: Option<Decimal>,
    #[serde(default)]
    price_change_percentage_24h: Option<f64>,
}

/// The /coins/{id} response (only the fields we consume)
#[derive(Debug, Deserialize)]
struct CoinResponse {
    id: String,
    name: String,
    symbol: String,
    market_data: MarketData,
}

#[derive(Debug, Deserialize)]
struct MarketData {
    #[serde(default)]
    current_price: HashMap<String, Decimal>,
    #[serde(default)]
    market_cap: HashMap<String, Decimal>,
    #[serde(default)]
    total_volume: HashMap<String, Decimal>,
    #[serde(default)]
    price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    sparkline_7d: Option<Sparkline>,
}

#[derive(Debug, Deserialize)]
struct Sparkline {
    #[serde(default)]
    price: Vec<f64>,
}

impl CoinGeckoFeed {
    /// Create a new CoinGecko feed
    ///
    /// The API key is optional; without one, requests run against the
    /// public rate-limited tier.
    pub fn new(vs_currency: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, vs_currency, api_key)
    }

    /// Create a feed pointed at a non-default base URL (used by tests)
    pub fn with_base_url(
        base_url: impl Into<String>,
        vs_currency: impl Into<String>,
        api_key: Option<String>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| Error::price_feed(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            vs_currency: vs_currency.into(),
            api_key,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let mut request = self.client.get(url);
        if let Some(key) = &self.api_key {
            request = request.header("X-CoinGecko-API-Key", key);
        }

        let response = request.send().await.map_err(map_request_error)?;
        check_response_status(&response)?;

        response
            .json::<T>()
            .await
            .map_err(|e| Error::price_feed(format!("Failed to parse CoinGecko response: {}", e)))
    }

    fn map_markets_row(&self, row: MarketsRow) -> CoinSnapshot {
        CoinSnapshot {
            id: row.id,
            name: row.name,
            symbol: CoinSnapshot::normalize_symbol(&row.symbol),
            current_price: row.current_price.unwrap_or_default(),
            market_cap: row.market_cap.unwrap_or_default(),
            volume_24h: row.total_volume.unwrap_or_default(),
            change_24h_percent: row.price_change_percentage_24h.unwrap_or_default(),
            sparkline_7d: None,
        }
    }

    fn map_coin_response(&self, coin: CoinResponse) -> CoinSnapshot {
        let md = coin.market_data;
        let sparkline = md
            .sparkline_7d
            .map(|s| s.price)
            .filter(|prices| !prices.is_empty());

        CoinSnapshot {
            id: coin.id,
            name: coin.name,
            symbol: CoinSnapshot::normalize_symbol(&coin.symbol),
            current_price: md
                .current_price
                .get(&self.vs_currency)
                .copied()
                .unwrap_or_default(),
            market_cap: md
                .market_cap
                .get(&self.vs_currency)
                .copied()
                .unwrap_or_default(),
            volume_24h: md
                .total_volume
                .get(&self.vs_currency)
                .copied()
                .unwrap_or_default(),
            change_24h_percent: md.price_change_percentage_24h.unwrap_or_default(),
            sparkline_7d: sparkline,
        }
    }
}

#[async_trait]
impl PriceFeed for CoinGeckoFeed {
    fn name(&self) -> &str {
        "coingecko"
    }

    async fn coin_listing(&self) -> Result<Vec<CoinSnapshot>> {
        let url = format!(
            "{}/coins/markets?vs_currency={}&order=market_cap_desc&per_page={}&page=1&sparkline=false&price_change_percentage=24h",
            self.base_url, self.vs_currency, LISTING_PAGE_SIZE
        );

        let rows: Vec<MarketsRow> = self.get_json(&url).await?;
        Ok(rows.into_iter().map(|r| self.map_markets_row(r)).collect())
    }

    async fn coin_detail(&self, coin_id: &str) -> Result<CoinSnapshot> {
        let url = format!(
            "{}/coins/{}?localization=false&tickers=false&market_data=true&community_data=false&developer_data=false&sparkline=true",
            self.base_url, coin_id
        );

        let coin: CoinResponse = self.get_json(&url).await?;
        Ok(self.map_coin_response(coin))
    }
}

/// Map request errors to user-friendly messages
fn map_request_error(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::price_feed("Connection timed out after 10 seconds")
    } else if error.is_connect() {
        Error::price_feed("Unable to connect to CoinGecko")
    } else {
        Error::price_feed(format!("CoinGecko request failed: {}", error))
    }
}

/// Check response status and return appropriate errors
fn check_response_status(response: &reqwest::Response) -> Result<()> {
    match response.status().as_u16() {
        200 => Ok(()),
        401 | 403 => Err(Error::price_feed(
            "CoinGecko rejected the API key. Check the apiKey setting or the CG_API_KEY variable.",
        )),
        404 => Err(Error::price_feed("Unknown coin id")),
        429 => Err(Error::price_feed(
            "CoinGecko rate limit reached. Wait a minute and try again.",
        )),
        status => Err(Error::price_feed(format!("CoinGecko API error: HTTP {}", status))),
    }
}
