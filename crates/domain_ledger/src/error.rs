//! Ledger domain errors
//!
//! This is the caller-facing taxonomy: every failure leaving the ledger is
//! one of these variants, never a raw storage error.

use thiserror::Error;

use crate::store::StoreError;
use core_kernel::AccountId;

/// Errors that can occur in the ledger domain
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Deposit amount was non-positive or outside the configured bounds
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Idempotency key was empty or already bound to another account
    #[error("Invalid idempotency key: {0}")]
    InvalidIdempotencyKey(String),

    /// Account does not exist
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Cursor could not be decoded or does not look like one we issued
    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),

    /// Accounts for this dependent were already provisioned
    #[error("Already exists: {0}")]
    AccountsAlreadyExist(String),

    /// Write conflicts persisted through every retry; nothing was applied
    #[error("Deposit conflicted with concurrent writes after {attempts} attempts")]
    RetryExhausted { attempts: u32 },

    /// Translated storage failure with no more specific meaning
    #[error("Ledger store error: {0}")]
    Store(String),
}

impl LedgerError {
    /// Returns true if the caller may safely resubmit with the same
    /// idempotency key
    pub fn is_retryable(&self) -> bool {
        matches!(self, LedgerError::RetryExhausted { .. } | LedgerError::Store(_))
    }
}

impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AccountNotFound(id) => LedgerError::AccountNotFound(id),
            StoreError::AlreadyExists(what) => LedgerError::AccountsAlreadyExist(what),
            other => LedgerError::Store(other.to_string()),
        }
    }
}
