//! MoonWallet Core - Business logic for the wallet/portfolio tracker
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core business entities (Credential, CoinSnapshot, errors)
//! - **ports**: Trait definitions for external dependencies (KeyValueStore, PriceFeed)
//! - **services**: Business logic orchestration
//! - **adapters**: Concrete implementations (DuckDB, CoinGecko, demo data)

pub mod adapters;
pub mod config;
pub mod domain;
mod log_migrations;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use adapters::coingecko::CoinGeckoFeed;
use adapters::demo::DemoPriceFeed;
use adapters::duckdb::DuckDbKeyValueStore;
use config::Config;
use ports::{KeyValueStore, PriceFeed};
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{Error, Result as CoreResult};
pub use domain::{CoinSnapshot, Credential};
pub use services::{EntryPoint, LogEvent, LoggingService};

/// Main context for MoonWallet operations
///
/// This is the primary entry point for all business logic. It holds the
/// configuration, the durable store, and all services, and replaces the
/// app shell's scattered global state with one dependency-injected object.
pub struct MoonWalletContext {
    pub config: Config,
    pub store: Arc<dyn KeyValueStore>,
    pub session_service: SessionService,
    pub wallet_service: WalletService,
    pub market_service: MarketService,
    pub watchlist_service: WatchlistService,
}

impl MoonWalletContext {
    /// Create a new MoonWallet context
    ///
    /// Opens the durable store under `moonwallet_dir`, selects the price
    /// feed (fixed demo data when demo mode is on, CoinGecko otherwise),
    /// and rehydrates session and balance from persisted state. A failed
    /// rehydration read is non-fatal and leaves the defaults in place.
    pub async fn new(moonwallet_dir: &Path) -> Result<Self> {
        let config = Config::load(moonwallet_dir)?;

        // Demo mode gets its own database so real data stays untouched
        let db_filename = if config.demo_mode {
            "demo.duckdb"
        } else {
            "moonwallet.duckdb"
        };

        let store: Arc<dyn KeyValueStore> =
            Arc::new(DuckDbKeyValueStore::new(&moonwallet_dir.join(db_filename))?);

        let feed: Arc<dyn PriceFeed> = if config.demo_mode {
            Arc::new(DemoPriceFeed::new())
        } else {
            Arc::new(CoinGeckoFeed::new(
                config.vs_currency.clone(),
                config.api_key.clone(),
            )?)
        };

        Ok(Self::assemble(config, store, feed).await)
    }

    /// Create a context over explicit store and feed implementations
    ///
    /// Used by tests and embedders that bring their own adapters.
    pub async fn with_components(
        config: Config,
        store: Arc<dyn KeyValueStore>,
        feed: Arc<dyn PriceFeed>,
    ) -> Self {
        Self::assemble(config, store, feed).await
    }

    async fn assemble(
        config: Config,
        store: Arc<dyn KeyValueStore>,
        feed: Arc<dyn PriceFeed>,
    ) -> Self {
        let session_service = SessionService::new(Arc::clone(&store));
        let wallet_service = WalletService::new(Arc::clone(&store));
        let market_service = MarketService::new(feed, Arc::clone(&store));
        let watchlist_service = WatchlistService::new(Arc::clone(&store));

        session_service.rehydrate().await;
        wallet_service.rehydrate().await;

        Self {
            config,
            store,
            session_service,
            wallet_service,
            market_service,
            watchlist_service,
        }
    }
}
