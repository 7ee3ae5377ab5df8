//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible
//! defaults. These builders allow tests to specify only the relevant
//! fields while using defaults for everything else.

use chrono::{DateTime, Utc};

use core_kernel::{AccountId, DependentId, Money, TransactionId};
use domain_ledger::{Account, AccountKind, Transaction, TransactionKind};

use crate::fixtures::{MoneyFixtures, StringFixtures};

/// Builder for constructing test accounts
pub struct TestAccountBuilder {
    id: AccountId,
    dependent_id: DependentId,
    kind: AccountKind,
    balance: Money,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl Default for TestAccountBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAccountBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            id: AccountId::new(1),
            dependent_id: DependentId::new(1),
            kind: AccountKind::Checking,
            balance: Money::ZERO,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Sets the account ID
    pub fn with_id(mut self, id: AccountId) -> Self {
        self.id = id;
        self
    }

    /// Sets the owning dependent
    pub fn with_dependent_id(mut self, dependent_id: DependentId) -> Self {
        self.dependent_id = dependent_id;
        self
    }

    /// Sets the account kind
    pub fn with_kind(mut self, kind: AccountKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the balance
    pub fn with_balance(mut self, balance: Money) -> Self {
        self.balance = balance;
        self
    }

    /// Builds the account
    pub fn build(self) -> Account {
        Account {
            id: self.id,
            dependent_id: self.dependent_id,
            kind: self.kind,
            balance: self.balance,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Builder for constructing test transactions
pub struct TestTransactionBuilder {
    id: TransactionId,
    account_id: AccountId,
    amount: Money,
    kind: TransactionKind,
    idempotency_key: String,
    created_at: DateTime<Utc>,
}

impl Default for TestTransactionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTransactionBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            id: TransactionId::new(1),
            account_id: AccountId::new(1),
            amount: MoneyFixtures::weekly_allowance(),
            kind: TransactionKind::Deposit,
            idempotency_key: StringFixtures::idempotency_key(),
            created_at: Utc::now(),
        }
    }

    /// Sets the transaction ID
    pub fn with_id(mut self, id: TransactionId) -> Self {
        self.id = id;
        self
    }

    /// Sets the owning account
    pub fn with_account_id(mut self, account_id: AccountId) -> Self {
        self.account_id = account_id;
        self
    }

    /// Sets the amount
    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = amount;
        self
    }

    /// Sets the idempotency key
    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = key.into();
        self
    }

    /// Builds the transaction
    pub fn build(self) -> Transaction {
        Transaction {
            id: self.id,
            account_id: self.account_id,
            amount: self.amount,
            kind: self.kind,
            idempotency_key: self.idempotency_key,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_builder_defaults() {
        let account = TestAccountBuilder::new().build();
        assert_eq!(account.kind, AccountKind::Checking);
        assert!(account.balance.is_zero());
    }

    #[test]
    fn test_transaction_builder_overrides() {
        let transaction = TestTransactionBuilder::new()
            .with_amount(Money::from_minor(250))
            .with_idempotency_key("k1")
            .build();
        assert_eq!(transaction.amount.minor_units(), 250);
        assert_eq!(transaction.idempotency_key, "k1");
    }
}
