//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - DuckDB for the KeyValueStore port
//! - CoinGecko HTTP client for PriceFeed
//! - Fixed demo data for PriceFeed (demo mode / tests)
//! - In-memory map for KeyValueStore (tests / throwaway contexts)

pub mod coingecko;
pub mod demo;
pub mod duckdb;
pub mod memory;
