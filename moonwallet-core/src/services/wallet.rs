//! Wallet service - the mock balance ledger

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::Mutex;

use crate::domain::result::{Error, Result};
use crate::ports::KeyValueStore;

/// Persisted record key (identical to the mobile app's storage key)
const BALANCE_KEY: &str = "balance";

/// Per-transaction deposit ceiling, in wallet units
const DEPOSIT_LIMIT_UNITS: i64 = 5000;

/// Wallet service owning the single balance
///
/// Each mutation validates, persists the new balance, then commits it in
/// memory, all under one async mutex. A failed persistence write therefore
/// leaves the in-memory balance unchanged.
pub struct WalletService {
    store: Arc<dyn KeyValueStore>,
    balance: Mutex<Decimal>,
}

impl WalletService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            balance: Mutex::new(Decimal::ZERO),
        }
    }

    /// The fixed per-transaction deposit ceiling
    pub fn deposit_limit() -> Decimal {
        Decimal::new(DEPOSIT_LIMIT_UNITS, 0)
    }

    /// Restore the balance from persisted state
    ///
    /// Missing or unparseable records leave the balance at 0; startup
    /// never fails on a bad read.
    pub async fn rehydrate(&self) {
        if let Ok(Some(raw)) = self.store.get(BALANCE_KEY).await {
            *self.balance.lock().await = raw.trim().parse().unwrap_or(Decimal::ZERO);
        }
    }

    /// Current balance
    pub async fn balance(&self) -> Decimal {
        *self.balance.lock().await
    }

    /// Add funds; returns the new balance
    pub async fn deposit(&self, amount: Decimal) -> Result<Decimal> {
        validate_amount(amount)?;
        if amount > Self::deposit_limit() {
            return Err(Error::LimitExceeded {
                amount,
                limit: Self::deposit_limit(),
            });
        }

        let mut balance = self.balance.lock().await;
        let updated = *balance + amount;
        self.persist(updated).await?;
        *balance = updated;

        Ok(updated)
    }

    /// Remove funds; returns the new balance
    pub async fn withdraw(&self, amount: Decimal) -> Result<Decimal> {
        validate_amount(amount)?;

        let mut balance = self.balance.lock().await;
        if amount > *balance {
            return Err(Error::InsufficientFunds {
                requested: amount,
                available: *balance,
            });
        }

        let updated = *balance - amount;
        self.persist(updated).await?;
        *balance = updated;

        Ok(updated)
    }

    async fn persist(&self, balance: Decimal) -> Result<()> {
        self.store.set(BALANCE_KEY, &balance.to_string()).await
    }
}

/// An amount must be strictly positive
fn validate_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(Error::InvalidAmount(amount));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryKeyValueStore;

    fn service() -> WalletService {
        WalletService::new(Arc::new(InMemoryKeyValueStore::new()))
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_balance_starts_at_zero() {
        assert_eq!(service().balance().await, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_deposit_increases_balance() {
        let service = service();
        let balance = service.deposit(dec("100")).await.unwrap();
        assert_eq!(balance, dec("100"));

        let balance = service.deposit(dec("0.50")).await.unwrap();
        assert_eq!(balance, dec("100.50"));
    }

    #[tokio::test]
    async fn test_deposit_rejects_non_positive_amounts() {
        let service = service();
        assert!(matches!(
            service.deposit(Decimal::ZERO).await.unwrap_err(),
            Error::InvalidAmount(_)
        ));
        assert!(matches!(
            service.deposit(dec("-5")).await.unwrap_err(),
            Error::InvalidAmount(_)
        ));
        assert_eq!(service.balance().await, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_deposit_limit() {
        let service = service();

        // Exactly at the cap is allowed
        service.deposit(dec("5000")).await.unwrap();

        let err = service.deposit(dec("5000.01")).await.unwrap_err();
        assert!(matches!(err, Error::LimitExceeded { .. }));
        assert_eq!(service.balance().await, dec("5000"));
    }

    #[tokio::test]
    async fn test_withdraw_decreases_balance() {
        let service = service();
        service.deposit(dec("100")).await.unwrap();

        let balance = service.withdraw(dec("40")).await.unwrap();
        assert_eq!(balance, dec("60"));
    }

    #[tokio::test]
    async fn test_withdraw_more_than_balance_fails() {
        let service = service();
        service.deposit(dec("100")).await.unwrap();

        let err = service.withdraw(dec("150")).await.unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientFunds { requested, available }
                if requested == dec("150") && available == dec("100")
        ));
        assert_eq!(service.balance().await, dec("100"));
    }

    #[tokio::test]
    async fn test_withdraw_entire_balance() {
        let service = service();
        service.deposit(dec("100")).await.unwrap();
        let balance = service.withdraw(dec("100")).await.unwrap();
        assert_eq!(balance, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_withdraw_has_no_deposit_ceiling() {
        let service = service();
        service.deposit(dec("5000")).await.unwrap();
        service.deposit(dec("5000")).await.unwrap();

        // 6000 is above the deposit cap but a valid withdrawal
        let balance = service.withdraw(dec("6000")).await.unwrap();
        assert_eq!(balance, dec("4000"));
    }

    #[tokio::test]
    async fn test_rehydrate_round_trip() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        {
            let service = WalletService::new(Arc::clone(&store) as Arc<dyn KeyValueStore>);
            service.deposit(dec("123.45")).await.unwrap();
        }

        let service = WalletService::new(Arc::clone(&store) as Arc<dyn KeyValueStore>);
        service.rehydrate().await;
        assert_eq!(service.balance().await, dec("123.45"));
    }

    #[tokio::test]
    async fn test_rehydrate_unparseable_defaults_to_zero() {
        let store = Arc::new(InMemoryKeyValueStore::new().with_entry("balance", "not a number"));
        let service = WalletService::new(store as Arc<dyn KeyValueStore>);
        service.rehydrate().await;
        assert_eq!(service.balance().await, Decimal::ZERO);
    }
}
