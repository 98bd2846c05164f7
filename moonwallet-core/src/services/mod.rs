//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

pub mod logging;
mod market;
mod session;
mod wallet;
mod watchlist;

pub use logging::{EntryPoint, LogEntry, LogEvent, LoggingService};
pub use market::{DataSource, DetailResult, ListingResult, MarketService};
pub use session::{ResetAcknowledgment, SessionService};
pub use wallet::WalletService;
pub use watchlist::WatchlistService;
