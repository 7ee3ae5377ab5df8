//! The deposit processor
//!
//! This is the single authoritative validation and application path for
//! deposits. Every deposit, regardless of caller, passes through here:
//! amount bounds are checked once, the store applies the atomic unit, and
//! write conflicts are retried transparently up to a bounded count.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::LedgerError;
use crate::store::{DepositOutcome, LedgerStore, StoreError};
use crate::transaction::{Transaction, TransactionKind};
use core_kernel::{AccountId, Money};

/// Default bound on transparent conflict retries
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Configured deposit amount bounds, in minor units
#[derive(Debug, Clone, Copy)]
pub struct DepositLimits {
    /// Smallest accepted deposit
    pub min: Money,
    /// Largest accepted deposit
    pub max: Money,
}

impl Default for DepositLimits {
    fn default() -> Self {
        Self {
            min: Money::from_minor(1),
            max: Money::from_minor(1_000_000),
        }
    }
}

impl DepositLimits {
    pub fn new(min_minor_units: i64, max_minor_units: i64) -> Self {
        Self {
            min: Money::from_minor(min_minor_units),
            max: Money::from_minor(max_minor_units),
        }
    }
}

/// Result of a successful deposit call
#[derive(Debug, Clone)]
pub struct DepositReceipt {
    /// The account balance after the deposit
    pub new_balance: Money,
    /// The committed transaction; on a replay this is the original entry
    pub transaction: Transaction,
    /// True if this call was an idempotent replay of an earlier success
    pub replayed: bool,
}

/// Validates and applies deposits against the ledger store
#[derive(Clone)]
pub struct DepositProcessor {
    store: Arc<dyn LedgerStore>,
    limits: DepositLimits,
    max_retries: u32,
}

impl DepositProcessor {
    /// Creates a processor with default limits and retry policy
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self {
            store,
            limits: DepositLimits::default(),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Overrides the deposit amount bounds
    pub fn with_limits(mut self, limits: DepositLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Overrides the conflict retry bound
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Applies a deposit with at-most-one effective application per
    /// `(account, idempotency key)` pair
    ///
    /// Replays of a previously applied key return the original result
    /// without mutating state. Write conflicts are retried up to the
    /// configured bound; if they persist, [`LedgerError::RetryExhausted`]
    /// is returned and the deposit is guaranteed not to have been applied.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidAmount`] for non-positive or out-of-bounds
    ///   amounts
    /// - [`LedgerError::InvalidIdempotencyKey`] for an empty key, or a key
    ///   already bound to a different account
    /// - [`LedgerError::AccountNotFound`] when the account does not exist
    /// - [`LedgerError::RetryExhausted`] when conflicts outlast the retries
    pub async fn deposit(
        &self,
        account_id: AccountId,
        amount_minor_units: i64,
        idempotency_key: &str,
    ) -> Result<DepositReceipt, LedgerError> {
        let amount = self.validate_amount(amount_minor_units)?;
        let key = Self::validate_key(idempotency_key)?;

        let mut attempt = 0u32;
        loop {
            attempt += 1;

            match self
                .store
                .apply_deposit(account_id, amount, TransactionKind::Deposit, key)
                .await
            {
                Ok(DepositOutcome::Applied {
                    balance,
                    transaction,
                }) => {
                    debug!(
                        account_id = %account_id,
                        transaction_id = %transaction.id,
                        amount = %amount,
                        "deposit applied"
                    );
                    return Ok(DepositReceipt {
                        new_balance: balance,
                        transaction,
                        replayed: false,
                    });
                }
                Ok(DepositOutcome::Replayed {
                    balance,
                    transaction,
                }) => {
                    if transaction.account_id != account_id {
                        return Err(LedgerError::InvalidIdempotencyKey(
                            "key already used by another account".to_string(),
                        ));
                    }
                    debug!(
                        account_id = %account_id,
                        transaction_id = %transaction.id,
                        "deposit replayed, returning original result"
                    );
                    return Ok(DepositReceipt {
                        new_balance: balance,
                        transaction,
                        replayed: true,
                    });
                }
                Err(err) if err.is_retryable() && attempt < self.max_retries => {
                    warn!(
                        account_id = %account_id,
                        attempt,
                        error = %err,
                        "deposit conflicted, retrying"
                    );
                }
                Err(StoreError::Conflict(_)) => {
                    return Err(LedgerError::RetryExhausted { attempts: attempt });
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    fn validate_amount(&self, amount_minor_units: i64) -> Result<Money, LedgerError> {
        let amount = Money::from_minor(amount_minor_units);
        if !amount.is_positive() || amount < self.limits.min {
            return Err(LedgerError::InvalidAmount(format!(
                "amount must be at least {} minor units",
                self.limits.min.minor_units()
            )));
        }
        if amount > self.limits.max {
            return Err(LedgerError::InvalidAmount(format!(
                "amount cannot exceed {} minor units",
                self.limits.max.minor_units()
            )));
        }
        Ok(amount)
    }

    fn validate_key(idempotency_key: &str) -> Result<&str, LedgerError> {
        if idempotency_key.trim().is_empty() {
            return Err(LedgerError::InvalidIdempotencyKey(
                "key must not be empty".to_string(),
            ));
        }
        Ok(idempotency_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryLedgerStore;
    use core_kernel::DependentId;

    async fn processor_over_memory() -> (DepositProcessor, AccountId) {
        let store = Arc::new(MemoryLedgerStore::new());
        let accounts = store.open_accounts(DependentId::new(1)).await.unwrap();
        (DepositProcessor::new(store), accounts[0].id)
    }

    #[tokio::test]
    async fn test_rejects_zero_amount() {
        let (processor, account_id) = processor_over_memory().await;
        let result = processor.deposit(account_id, 0, "k1").await;
        assert!(matches!(result, Err(LedgerError::InvalidAmount(_))));
    }

    #[tokio::test]
    async fn test_rejects_negative_amount() {
        let (processor, account_id) = processor_over_memory().await;
        let result = processor.deposit(account_id, -500, "k1").await;
        assert!(matches!(result, Err(LedgerError::InvalidAmount(_))));
    }

    #[tokio::test]
    async fn test_rejects_amount_above_ceiling() {
        let (processor, account_id) = processor_over_memory().await;
        let result = processor.deposit(account_id, 1_000_001, "k1").await;
        assert!(matches!(result, Err(LedgerError::InvalidAmount(_))));
    }

    #[tokio::test]
    async fn test_accepts_maximum_amount() {
        let (processor, account_id) = processor_over_memory().await;
        let receipt = processor.deposit(account_id, 1_000_000, "k1").await.unwrap();
        assert_eq!(receipt.new_balance.minor_units(), 1_000_000);
        assert!(!receipt.replayed);
    }

    #[tokio::test]
    async fn test_rejects_empty_idempotency_key() {
        let (processor, account_id) = processor_over_memory().await;
        let result = processor.deposit(account_id, 100, "   ").await;
        assert!(matches!(result, Err(LedgerError::InvalidIdempotencyKey(_))));
    }

    #[tokio::test]
    async fn test_unknown_account() {
        let (processor, _) = processor_over_memory().await;
        let result = processor.deposit(AccountId::new(9999), 100, "k1").await;
        assert!(matches!(result, Err(LedgerError::AccountNotFound(_))));
    }

    #[tokio::test]
    async fn test_custom_limits() {
        let store = Arc::new(MemoryLedgerStore::new());
        let accounts = store.open_accounts(DependentId::new(1)).await.unwrap();
        let processor =
            DepositProcessor::new(store).with_limits(DepositLimits::new(500, 1_000));

        let too_small = processor.deposit(accounts[0].id, 499, "k1").await;
        assert!(matches!(too_small, Err(LedgerError::InvalidAmount(_))));

        let accepted = processor.deposit(accounts[0].id, 1_000, "k2").await.unwrap();
        assert_eq!(accepted.new_balance.minor_units(), 1_000);
    }
}
