//! Ledger repository implementation
//!
//! Durable `LedgerStore` backed by PostgreSQL. Every deposit is one
//! database transaction: the account row is taken `FOR UPDATE`, the
//! idempotency key is checked under that lock, and the transaction insert
//! and balance update commit together or not at all. Unique-key races
//! between accounts surface as SQLSTATE 23505 and are reported as
//! retryable conflicts; the retried attempt finds the committed row and
//! replays it.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

use crate::error::DatabaseError;
use core_kernel::{AccountId, DependentId, Money, TransactionId};
use domain_ledger::{
    Account, AccountKind, DepositOutcome, LedgerStore, StoreError, Transaction, TransactionKind,
};

/// Repository for the allowance ledger
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    pool: PgPool,
}

impl LedgerRepository {
    /// Creates a new LedgerRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerStore for LedgerRepository {
    async fn open_accounts(&self, dependent_id: DependentId) -> Result<Vec<Account>, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(DatabaseError::from)
            .map_err(StoreError::from)?;

        let mut opened = Vec::with_capacity(2);
        for kind in AccountKind::all() {
            let row = sqlx::query_as::<_, AccountRow>(
                r#"
                INSERT INTO accounts (dependent_id, kind)
                VALUES ($1, $2)
                RETURNING id, dependent_id, kind, balance_minor_units, created_at, updated_at
                "#,
            )
            .bind(dependent_id.value())
            .bind(kind.as_str())
            .fetch_one(&mut *tx)
            .await
            .map_err(|err| match DatabaseError::from(err) {
                DatabaseError::DuplicateEntry(_) => StoreError::AlreadyExists(format!(
                    "accounts for dependent {dependent_id}"
                )),
                other => other.into(),
            })?;
            opened.push(row.into_account()?);
        }

        tx.commit()
            .await
            .map_err(DatabaseError::from)
            .map_err(StoreError::from)?;

        debug!(dependent_id = %dependent_id, "account pair provisioned");
        Ok(opened)
    }

    async fn find_account(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, dependent_id, kind, balance_minor_units, created_at, updated_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from)
        .map_err(StoreError::from)?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn apply_deposit(
        &self,
        account_id: AccountId,
        amount: Money,
        kind: TransactionKind,
        idempotency_key: &str,
    ) -> Result<DepositOutcome, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(DatabaseError::from)
            .map_err(StoreError::from)?;

        // Lock the account row; concurrent deposits on the same account
        // serialize here.
        let account = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, dependent_id, kind, balance_minor_units, created_at, updated_at
            FROM accounts
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(account_id.value())
        .fetch_optional(&mut *tx)
        .await
        .map_err(DatabaseError::from)
        .map_err(StoreError::from)?
        .ok_or(StoreError::AccountNotFound(account_id))?;

        // The idempotency guard: a committed row under this key means the
        // logical deposit already happened.
        let existing = sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT id, account_id, amount_minor_units, kind, idempotency_key, created_at
            FROM transactions
            WHERE idempotency_key = $1
            "#,
        )
        .bind(idempotency_key)
        .fetch_optional(&mut *tx)
        .await
        .map_err(DatabaseError::from)
        .map_err(StoreError::from)?;

        if let Some(row) = existing {
            return Ok(DepositOutcome::Replayed {
                balance: Money::from_minor(account.balance_minor_units),
                transaction: row.into_transaction()?,
            });
        }

        let inserted = sqlx::query_as::<_, TransactionRow>(
            r#"
            INSERT INTO transactions (account_id, amount_minor_units, kind, idempotency_key)
            VALUES ($1, $2, $3, $4)
            RETURNING id, account_id, amount_minor_units, kind, idempotency_key, created_at
            "#,
        )
        .bind(account_id.value())
        .bind(amount.minor_units())
        .bind(kind.as_str())
        .bind(idempotency_key)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| match DatabaseError::from(err) {
            // A racing writer on another account committed this key between
            // our guard check and the insert; retrying replays their row.
            DatabaseError::DuplicateEntry(message) => StoreError::conflict(message),
            other => other.into(),
        })?;

        let new_balance: (i64,) = sqlx::query_as(
            r#"
            UPDATE accounts
            SET balance_minor_units = balance_minor_units + $2, updated_at = NOW()
            WHERE id = $1
            RETURNING balance_minor_units
            "#,
        )
        .bind(account_id.value())
        .bind(amount.minor_units())
        .fetch_one(&mut *tx)
        .await
        .map_err(DatabaseError::from)
        .map_err(StoreError::from)?;

        tx.commit()
            .await
            .map_err(DatabaseError::from)
            .map_err(StoreError::from)?;

        debug!(
            account_id = %account_id,
            transaction_id = inserted.id,
            "deposit committed"
        );

        Ok(DepositOutcome::Applied {
            balance: Money::from_minor(new_balance.0),
            transaction: inserted.into_transaction()?,
        })
    }

    async fn transactions_before(
        &self,
        account_id: AccountId,
        before: Option<TransactionId>,
        limit: i64,
    ) -> Result<Vec<Transaction>, StoreError> {
        let rows = match before {
            Some(before) => {
                sqlx::query_as::<_, TransactionRow>(
                    r#"
                    SELECT id, account_id, amount_minor_units, kind, idempotency_key, created_at
                    FROM transactions
                    WHERE account_id = $1 AND id < $2
                    ORDER BY id DESC
                    LIMIT $3
                    "#,
                )
                .bind(account_id.value())
                .bind(before.value())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, TransactionRow>(
                    r#"
                    SELECT id, account_id, amount_minor_units, kind, idempotency_key, created_at
                    FROM transactions
                    WHERE account_id = $1
                    ORDER BY id DESC
                    LIMIT $2
                    "#,
                )
                .bind(account_id.value())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(DatabaseError::from)
        .map_err(StoreError::from)?;

        rows.into_iter()
            .map(TransactionRow::into_transaction)
            .collect()
    }
}

/// Database row for an account
#[derive(Debug, Clone, sqlx::FromRow)]
struct AccountRow {
    id: i64,
    dependent_id: i64,
    kind: String,
    balance_minor_units: i64,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl AccountRow {
    fn into_account(self) -> Result<Account, StoreError> {
        let kind = AccountKind::from_str(&self.kind).map_err(StoreError::internal)?;
        Ok(Account {
            id: AccountId::new(self.id),
            dependent_id: DependentId::new(self.dependent_id),
            kind,
            balance: Money::from_minor(self.balance_minor_units),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Database row for a ledger transaction
#[derive(Debug, Clone, sqlx::FromRow)]
struct TransactionRow {
    id: i64,
    account_id: i64,
    amount_minor_units: i64,
    kind: String,
    idempotency_key: String,
    created_at: DateTime<Utc>,
}

impl TransactionRow {
    fn into_transaction(self) -> Result<Transaction, StoreError> {
        let kind = TransactionKind::from_str(&self.kind).map_err(StoreError::internal)?;
        Ok(Transaction {
            id: TransactionId::new(self.id),
            account_id: AccountId::new(self.account_id),
            amount: Money::from_minor(self.amount_minor_units),
            kind,
            idempotency_key: self.idempotency_key,
            created_at: self.created_at,
        })
    }
}
