//! The transaction reader
//!
//! Produces the stable, reverse-chronological view of an account's history.
//! Ordering is strictly by transaction id descending; the cursor is a
//! strict less-than boundary on that id, so concurrent inserts can neither
//! duplicate nor skip entries across pages.

use std::sync::Arc;

use crate::cursor::Cursor;
use crate::error::LedgerError;
use crate::store::LedgerStore;
use crate::transaction::Transaction;
use core_kernel::AccountId;

/// Page size used when the caller passes no limit, or a limit below 1
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Hard ceiling on the page size
pub const MAX_PAGE_SIZE: i64 = 100;

/// One page of an account's transaction history
#[derive(Debug, Clone)]
pub struct TransactionPage {
    /// Transactions in id-descending order
    pub transactions: Vec<Transaction>,
    /// Opaque cursor for the next page; present iff more rows exist
    pub next_cursor: Option<String>,
    /// True iff rows exist beyond this page
    pub has_more: bool,
}

/// Reads cursor-paginated transaction history from the ledger store
#[derive(Clone)]
pub struct TransactionReader {
    store: Arc<dyn LedgerStore>,
}

impl TransactionReader {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// Lists an account's transactions, most recent first
    ///
    /// `limit` defaults to [`DEFAULT_PAGE_SIZE`]; values below 1 fall back
    /// to the default and values above [`MAX_PAGE_SIZE`] are clamped down.
    /// `cursor` must be a value previously returned in `next_cursor`.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::AccountNotFound`] when the account does not exist
    /// - [`LedgerError::InvalidCursor`] when the cursor cannot be decoded
    pub async fn list(
        &self,
        account_id: AccountId,
        limit: Option<i64>,
        cursor: Option<&str>,
    ) -> Result<TransactionPage, LedgerError> {
        let limit = clamp_limit(limit);

        let before = cursor
            .map(Cursor::decode)
            .transpose()?
            .map(|cursor| cursor.last_id);

        // Distinguish an empty history from a missing account.
        if self.store.find_account(account_id).await?.is_none() {
            return Err(LedgerError::AccountNotFound(account_id));
        }

        // Fetch one extra row to learn whether another page exists.
        let mut transactions = self
            .store
            .transactions_before(account_id, before, limit + 1)
            .await?;

        let has_more = transactions.len() as i64 > limit;
        if has_more {
            transactions.truncate(limit as usize);
        }

        let next_cursor = if has_more {
            transactions
                .last()
                .map(|last| Cursor::new(last.id).encode())
        } else {
            None
        };

        Ok(TransactionPage {
            transactions,
            next_cursor,
            has_more,
        })
    }
}

fn clamp_limit(limit: Option<i64>) -> i64 {
    match limit {
        Some(value) if value >= 1 => value.min(MAX_PAGE_SIZE),
        _ => DEFAULT_PAGE_SIZE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_limit_default() {
        assert_eq!(clamp_limit(None), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_clamp_limit_non_positive_falls_back_to_default() {
        assert_eq!(clamp_limit(Some(0)), DEFAULT_PAGE_SIZE);
        assert_eq!(clamp_limit(Some(-5)), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_clamp_limit_ceiling() {
        assert_eq!(clamp_limit(Some(1_000)), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_clamp_limit_in_range_passes_through() {
        assert_eq!(clamp_limit(Some(1)), 1);
        assert_eq!(clamp_limit(Some(55)), 55);
    }
}
