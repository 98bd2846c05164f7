//! Result and error types for the core library

use rust_decimal::Decimal;
use thiserror::Error;

/// Core library error type
///
/// The auth and wallet variants carry enough context to render a
/// user-facing message without re-querying state.
#[derive(Error, Debug)]
pub enum Error {
    #[error("User already exists: {0}")]
    DuplicateUser(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("No user found with this email: {0}")]
    UserNotFound(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(Decimal),

    #[error("Limit exceeded: {amount} is above the {limit} per-transaction cap")]
    LimitExceeded { amount: Decimal, limit: Decimal },

    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Price feed error: {0}")]
    PriceFeed(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a persistence error
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Create a price feed error
    pub fn price_feed(msg: impl Into<String>) -> Self {
        Self::PriceFeed(msg.into())
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::DuplicateUser("a@x.com".to_string());
        assert!(err.to_string().contains("a@x.com"));

        let err = Error::InsufficientFunds {
            requested: Decimal::new(15000, 2),
            available: Decimal::new(10000, 2),
        };
        assert!(err.to_string().contains("150.00"));
        assert!(err.to_string().contains("100.00"));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_err = serde_json::from_str::<Vec<String>>("not json").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
