//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use core_kernel::{AccountId, Money, TransactionId};
use domain_ledger::AccountKind;
use proptest::prelude::*;

/// Strategy for generating deposit amounts inside the accepted bounds
pub fn valid_deposit_minor_strategy() -> impl Strategy<Value = i64> {
    1i64..=1_000_000i64
}

/// Strategy for generating amounts the deposit processor must reject
pub fn invalid_deposit_minor_strategy() -> impl Strategy<Value = i64> {
    prop_oneof![
        i64::MIN..=0i64,
        1_000_001i64..i64::MAX,
    ]
}

/// Strategy for generating valid Money deposit values
pub fn deposit_money_strategy() -> impl Strategy<Value = Money> {
    valid_deposit_minor_strategy().prop_map(Money::from_minor)
}

/// Strategy for generating non-empty idempotency keys
pub fn idempotency_key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_-]{1,64}"
}

/// Strategy for generating account identifiers
pub fn account_id_strategy() -> impl Strategy<Value = AccountId> {
    (1i64..1_000_000i64).prop_map(AccountId::new)
}

/// Strategy for generating transaction identifiers
pub fn transaction_id_strategy() -> impl Strategy<Value = TransactionId> {
    (1i64..i64::MAX).prop_map(TransactionId::new)
}

/// Strategy for generating account kinds
pub fn account_kind_strategy() -> impl Strategy<Value = AccountKind> {
    prop_oneof![Just(AccountKind::Checking), Just(AccountKind::Savings)]
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn prop_valid_deposits_are_positive_and_bounded(amount in valid_deposit_minor_strategy()) {
            prop_assert!(amount >= 1);
            prop_assert!(amount <= 1_000_000);
        }

        #[test]
        fn prop_invalid_deposits_are_out_of_bounds(amount in invalid_deposit_minor_strategy()) {
            prop_assert!(amount < 1 || amount > 1_000_000);
        }

        #[test]
        fn prop_generated_keys_are_non_empty(key in idempotency_key_strategy()) {
            prop_assert!(!key.trim().is_empty());
        }
    }
}
