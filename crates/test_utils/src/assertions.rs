//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use core_kernel::Money;
use domain_ledger::{Account, Transaction};

/// Asserts that a Money value is positive
pub fn assert_money_positive(money: &Money) {
    assert!(money.is_positive(), "Expected positive money, got {}", money);
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: &Money) {
    assert!(money.is_zero(), "Expected zero money, got {}", money);
}

/// Asserts the conservation invariant: the account balance equals the sum
/// of its committed transaction amounts
///
/// # Panics
///
/// Panics if a transaction belongs to a different account, if the sum
/// overflows, or if the balance and the sum disagree
pub fn assert_balance_conserved(account: &Account, transactions: &[Transaction]) {
    let mut sum = Money::ZERO;
    for transaction in transactions {
        assert_eq!(
            transaction.account_id, account.id,
            "Transaction {} belongs to account {}, not {}",
            transaction.id, transaction.account_id, account.id
        );
        sum = sum
            .checked_add(&transaction.amount)
            .expect("transaction sum overflow");
    }

    assert_eq!(
        account.balance, sum,
        "Balance {} does not equal transaction sum {}",
        account.balance, sum
    );
}

/// Asserts that a page of transactions is strictly id-descending
pub fn assert_page_descending(transactions: &[Transaction]) {
    for window in transactions.windows(2) {
        assert!(
            window[0].id > window[1].id,
            "Page out of order: {} then {}",
            window[0].id,
            window[1].id
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::{TestAccountBuilder, TestTransactionBuilder};
    use core_kernel::TransactionId;

    #[test]
    fn test_conservation_holds_for_matching_sum() {
        let account = TestAccountBuilder::new()
            .with_balance(Money::from_minor(750))
            .build();
        let transactions = vec![
            TestTransactionBuilder::new()
                .with_id(TransactionId::new(1))
                .with_amount(Money::from_minor(500))
                .build(),
            TestTransactionBuilder::new()
                .with_id(TransactionId::new(2))
                .with_amount(Money::from_minor(250))
                .build(),
        ];

        assert_balance_conserved(&account, &transactions);
    }

    #[test]
    #[should_panic(expected = "does not equal")]
    fn test_conservation_catches_drift() {
        let account = TestAccountBuilder::new()
            .with_balance(Money::from_minor(999))
            .build();
        let transactions = vec![TestTransactionBuilder::new()
            .with_amount(Money::from_minor(500))
            .build()];

        assert_balance_conserved(&account, &transactions);
    }

    #[test]
    #[should_panic(expected = "out of order")]
    fn test_page_order_catches_ascending() {
        let page = vec![
            TestTransactionBuilder::new()
                .with_id(TransactionId::new(1))
                .build(),
            TestTransactionBuilder::new()
                .with_id(TransactionId::new(2))
                .build(),
        ];
        assert_page_descending(&page);
    }
}
