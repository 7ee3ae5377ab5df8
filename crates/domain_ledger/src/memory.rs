//! In-memory ledger store
//!
//! An in-process [`LedgerStore`] adapter used by tests and local
//! development. A single mutex around the whole state makes every call one
//! atomic unit, mirroring the transactional guarantees the PostgreSQL
//! adapter gets from the database.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::account::{Account, AccountKind};
use crate::store::{DepositOutcome, LedgerStore, StoreError};
use crate::transaction::{Transaction, TransactionKind};
use core_kernel::{AccountId, DependentId, Money, TransactionId};

#[derive(Default)]
struct Inner {
    accounts: HashMap<AccountId, Account>,
    // BTreeMap keeps transactions in id order for the keyset scans.
    transactions: BTreeMap<TransactionId, Transaction>,
    by_idempotency_key: HashMap<String, TransactionId>,
    next_account_id: i64,
    next_transaction_id: i64,
}

impl Inner {
    fn next_account_id(&mut self) -> AccountId {
        self.next_account_id += 1;
        AccountId::new(self.next_account_id)
    }

    fn next_transaction_id(&mut self) -> TransactionId {
        self.next_transaction_id += 1;
        TransactionId::new(self.next_transaction_id)
    }
}

/// In-process ledger store with the same semantics as the durable adapter
#[derive(Default)]
pub struct MemoryLedgerStore {
    inner: Mutex<Inner>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of committed transactions, across all accounts
    pub fn transaction_count(&self) -> usize {
        self.inner.lock().expect("ledger lock").transactions.len()
    }
}

#[async_trait]
impl LedgerStore for MemoryLedgerStore {
    async fn open_accounts(&self, dependent_id: DependentId) -> Result<Vec<Account>, StoreError> {
        let mut inner = self.inner.lock().expect("ledger lock");

        if inner
            .accounts
            .values()
            .any(|account| account.dependent_id == dependent_id)
        {
            return Err(StoreError::AlreadyExists(format!(
                "accounts for dependent {dependent_id}"
            )));
        }

        let mut opened = Vec::with_capacity(2);
        for kind in AccountKind::all() {
            let id = inner.next_account_id();
            let account = Account::new(id, dependent_id, kind);
            inner.accounts.insert(id, account.clone());
            opened.push(account);
        }
        Ok(opened)
    }

    async fn find_account(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        let inner = self.inner.lock().expect("ledger lock");
        Ok(inner.accounts.get(&id).cloned())
    }

    async fn apply_deposit(
        &self,
        account_id: AccountId,
        amount: Money,
        kind: TransactionKind,
        idempotency_key: &str,
    ) -> Result<DepositOutcome, StoreError> {
        let mut inner = self.inner.lock().expect("ledger lock");

        let balance = inner
            .accounts
            .get(&account_id)
            .map(|account| account.balance)
            .ok_or(StoreError::AccountNotFound(account_id))?;

        // The idempotency guard: one committed transaction per key, ever.
        if let Some(existing_id) = inner.by_idempotency_key.get(idempotency_key) {
            let transaction = inner.transactions[existing_id].clone();
            return Ok(DepositOutcome::Replayed {
                balance,
                transaction,
            });
        }

        let new_balance = balance
            .checked_add_non_negative(&amount)
            .map_err(|err| StoreError::internal(err.to_string()))?;

        let transaction = Transaction {
            id: inner.next_transaction_id(),
            account_id,
            amount,
            kind,
            idempotency_key: idempotency_key.to_string(),
            created_at: Utc::now(),
        };

        inner
            .by_idempotency_key
            .insert(idempotency_key.to_string(), transaction.id);
        inner.transactions.insert(transaction.id, transaction.clone());

        let account = inner
            .accounts
            .get_mut(&account_id)
            .ok_or(StoreError::AccountNotFound(account_id))?;
        account.balance = new_balance;
        account.updated_at = Some(Utc::now());

        Ok(DepositOutcome::Applied {
            balance: new_balance,
            transaction,
        })
    }

    async fn transactions_before(
        &self,
        account_id: AccountId,
        before: Option<TransactionId>,
        limit: i64,
    ) -> Result<Vec<Transaction>, StoreError> {
        let inner = self.inner.lock().expect("ledger lock");

        let upper = match before {
            Some(id) => std::ops::Bound::Excluded(id),
            None => std::ops::Bound::Unbounded,
        };

        let page = inner
            .transactions
            .range((std::ops::Bound::Unbounded, upper))
            .rev()
            .filter(|(_, transaction)| transaction.account_id == account_id)
            .take(limit.max(0) as usize)
            .map(|(_, transaction)| transaction.clone())
            .collect();

        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_accounts_creates_checking_and_savings() {
        let store = MemoryLedgerStore::new();
        let accounts = store.open_accounts(DependentId::new(7)).await.unwrap();

        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].kind, AccountKind::Checking);
        assert_eq!(accounts[1].kind, AccountKind::Savings);
        assert!(accounts.iter().all(|account| account.balance.is_zero()));
    }

    #[tokio::test]
    async fn test_open_accounts_twice_fails() {
        let store = MemoryLedgerStore::new();
        store.open_accounts(DependentId::new(7)).await.unwrap();
        let second = store.open_accounts(DependentId::new(7)).await;
        assert!(matches!(second, Err(StoreError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_apply_deposit_moves_balance_and_records_transaction() {
        let store = MemoryLedgerStore::new();
        let accounts = store.open_accounts(DependentId::new(1)).await.unwrap();
        let account_id = accounts[0].id;

        let outcome = store
            .apply_deposit(account_id, Money::from_minor(500), TransactionKind::Deposit, "k1")
            .await
            .unwrap();

        match outcome {
            DepositOutcome::Applied {
                balance,
                transaction,
            } => {
                assert_eq!(balance.minor_units(), 500);
                assert_eq!(transaction.account_id, account_id);
                assert_eq!(transaction.idempotency_key, "k1");
            }
            DepositOutcome::Replayed { .. } => panic!("first application must not replay"),
        }
    }

    #[tokio::test]
    async fn test_duplicate_key_replays_without_mutation() {
        let store = MemoryLedgerStore::new();
        let accounts = store.open_accounts(DependentId::new(1)).await.unwrap();
        let account_id = accounts[0].id;

        store
            .apply_deposit(account_id, Money::from_minor(500), TransactionKind::Deposit, "k1")
            .await
            .unwrap();
        let replay = store
            .apply_deposit(account_id, Money::from_minor(500), TransactionKind::Deposit, "k1")
            .await
            .unwrap();

        assert!(matches!(replay, DepositOutcome::Replayed { balance, .. } if balance.minor_units() == 500));
        assert_eq!(store.transaction_count(), 1);
    }

    #[tokio::test]
    async fn test_transaction_ids_are_monotonic() {
        let store = MemoryLedgerStore::new();
        let accounts = store.open_accounts(DependentId::new(1)).await.unwrap();
        let account_id = accounts[0].id;

        for i in 0..5 {
            store
                .apply_deposit(
                    account_id,
                    Money::from_minor(100),
                    TransactionKind::Deposit,
                    &format!("k{i}"),
                )
                .await
                .unwrap();
        }

        let page = store.transactions_before(account_id, None, 10).await.unwrap();
        let ids: Vec<i64> = page.iter().map(|t| t.id.value()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(ids, sorted);
    }
}
