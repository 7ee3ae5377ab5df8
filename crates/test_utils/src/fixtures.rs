//! Test Fixtures
//!
//! Pre-built test data for common entities, grouped by concern so tests
//! read as intent rather than magic numbers.

use core_kernel::{AccountId, DependentId, Money, TransactionId};
use uuid::Uuid;

/// Money amounts used throughout the test suite, in minor units
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// The smallest deposit the processor accepts
    pub fn minimum_deposit() -> Money {
        Money::from_minor(1)
    }

    /// The largest deposit the processor accepts
    pub fn maximum_deposit() -> Money {
        Money::from_minor(1_000_000)
    }

    /// A typical weekly allowance deposit (5.00)
    pub fn weekly_allowance() -> Money {
        Money::from_minor(500)
    }

    /// A typical birthday deposit (25.00)
    pub fn birthday_deposit() -> Money {
        Money::from_minor(2_500)
    }
}

/// Identifier values used throughout the test suite
pub struct IdFixtures;

impl IdFixtures {
    pub fn guardian_dependent_id() -> DependentId {
        DependentId::new(1)
    }

    pub fn account_id() -> AccountId {
        AccountId::new(1)
    }

    pub fn unknown_account_id() -> AccountId {
        AccountId::new(999_999)
    }

    pub fn transaction_id() -> TransactionId {
        TransactionId::new(1)
    }
}

/// String values used throughout the test suite
pub struct StringFixtures;

impl StringFixtures {
    /// A fresh, globally unique idempotency key
    pub fn idempotency_key() -> String {
        Uuid::new_v4().to_string()
    }

    /// A fixed idempotency key for replay scenarios
    pub fn fixed_idempotency_key() -> &'static str {
        "test-deposit-0001"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deposit_fixtures_are_within_bounds() {
        assert!(MoneyFixtures::weekly_allowance() >= MoneyFixtures::minimum_deposit());
        assert!(MoneyFixtures::birthday_deposit() <= MoneyFixtures::maximum_deposit());
    }

    #[test]
    fn test_idempotency_keys_are_unique() {
        assert_ne!(
            StringFixtures::idempotency_key(),
            StringFixtures::idempotency_key()
        );
    }
}
