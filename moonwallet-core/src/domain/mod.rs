//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! with validation logic - no I/O or external dependencies.

mod coin;
mod credential;
pub mod result;

pub use coin::CoinSnapshot;
pub use credential::Credential;
