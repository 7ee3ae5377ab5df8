//! The ledger store port
//!
//! Adapters implement [`LedgerStore`] to provide the durable, transactional
//! record of accounts and transactions. The store owns atomicity: each
//! method call is a single atomic unit that fully commits or fully rolls
//! back, and the idempotency guard is the store's uniqueness invariant on
//! `idempotency_key` rather than any separate cache.

use async_trait::async_trait;
use thiserror::Error;

use crate::account::Account;
use crate::transaction::{Transaction, TransactionKind};
use core_kernel::{AccountId, DependentId, Money, TransactionId};

/// Errors surfaced by ledger store adapters
#[derive(Debug, Error)]
pub enum StoreError {
    /// The referenced account does not exist
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// A row that must be unique already exists
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// The atomic unit lost a write race and was rolled back; retryable
    #[error("Write conflict: {0}")]
    Conflict(String),

    /// The backing store could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Any other adapter failure
    #[error("Internal store error: {0}")]
    Internal(String),
}

impl StoreError {
    pub fn conflict(message: impl Into<String>) -> Self {
        StoreError::Conflict(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        StoreError::Internal(message.into())
    }

    /// Returns true if retrying the whole atomic unit may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Conflict(_))
    }
}

/// Result of applying a deposit through the store
#[derive(Debug, Clone)]
pub enum DepositOutcome {
    /// First application: a transaction row was inserted and the balance
    /// moved, in one atomic unit
    Applied {
        balance: Money,
        transaction: Transaction,
    },
    /// The idempotency key had already been recorded; nothing was mutated.
    /// `transaction` is the previously committed entry (which may belong to
    /// a different account if the key was reused) and `balance` is the
    /// requested account's current balance.
    Replayed {
        balance: Money,
        transaction: Transaction,
    },
}

/// Durable, transactional record of accounts and their transactions
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Provisions the checking/savings pair for a dependent, both at zero
    ///
    /// Fails with [`StoreError::AlreadyExists`] if the pair was provisioned
    /// before.
    async fn open_accounts(&self, dependent_id: DependentId) -> Result<Vec<Account>, StoreError>;

    /// Looks up an account snapshot
    async fn find_account(&self, id: AccountId) -> Result<Option<Account>, StoreError>;

    /// Applies a deposit as one atomic unit
    ///
    /// Inserts the transaction row guarded by the idempotency-key
    /// uniqueness invariant and increments the balance, or detects the
    /// duplicate key and reports [`DepositOutcome::Replayed`] without
    /// mutating anything. Concurrent deposits on the same account serialize
    /// inside this call.
    async fn apply_deposit(
        &self,
        account_id: AccountId,
        amount: Money,
        kind: TransactionKind,
        idempotency_key: &str,
    ) -> Result<DepositOutcome, StoreError>;

    /// Returns up to `limit` transactions for an account, id-descending,
    /// restricted to ids strictly less than `before` when given
    ///
    /// The strict boundary on an immutable, monotonic id is what keeps
    /// pages stable while new transactions are inserted concurrently.
    async fn transactions_before(
        &self,
        account_id: AccountId,
        before: Option<TransactionId>,
        limit: i64,
    ) -> Result<Vec<Transaction>, StoreError>;
}
