//! Money as integer minor currency units
//!
//! This module provides a type-safe representation of monetary values as a
//! whole number of minor units (cents). Using integers end to end avoids
//! floating-point rounding errors in ledger arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};
use thiserror::Error;

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Amount would become negative")]
    Negative,

    #[error("Overflow during calculation")]
    Overflow,
}

/// A monetary amount in minor currency units (cents)
///
/// All ledger arithmetic happens on this type. The wrapped value is a signed
/// count of minor units; whether a negative value is acceptable depends on
/// context (a balance must never be negative, a ledger delta may be).
///
/// Serializes as a bare integer, matching the wire format
/// (`amount_minor_units`, `balance_minor_units`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// The zero amount
    pub const ZERO: Money = Money(0);

    /// Creates a Money value from a count of minor units
    pub const fn from_minor(minor_units: i64) -> Self {
        Self(minor_units)
    }

    /// Returns the amount as minor units
    pub const fn minor_units(&self) -> i64 {
        self.0
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns true if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Checked addition that errors on overflow
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or(MoneyError::Overflow)
    }

    /// Checked subtraction that errors on overflow
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        self.0
            .checked_sub(other.0)
            .map(Money)
            .ok_or(MoneyError::Overflow)
    }

    /// Checked addition that additionally rejects a negative result
    ///
    /// Used for balance mutations, where the balance invariant forbids
    /// going below zero.
    pub fn checked_add_non_negative(&self, other: &Money) -> Result<Money, MoneyError> {
        let sum = self.checked_add(other)?;
        if sum.is_negative() {
            return Err(MoneyError::Negative);
        }
        Ok(sum)
    }
}

impl From<i64> for Money {
    fn from(minor_units: i64) -> Self {
        Money(minor_units)
    }
}

impl From<Money> for i64 {
    fn from(money: Money) -> i64 {
        money.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl fmt::Display for Money {
    /// Formats as major.minor, e.g. `12.34` for 1234 minor units
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_minor_roundtrip() {
        let money = Money::from_minor(1234);
        assert_eq!(money.minor_units(), 1234);
    }

    #[test]
    fn test_zero() {
        assert!(Money::ZERO.is_zero());
        assert!(!Money::ZERO.is_positive());
        assert!(!Money::ZERO.is_negative());
    }

    #[test]
    fn test_checked_add() {
        let a = Money::from_minor(500);
        let b = Money::from_minor(250);
        assert_eq!(a.checked_add(&b).unwrap(), Money::from_minor(750));
    }

    #[test]
    fn test_checked_add_overflow() {
        let a = Money::from_minor(i64::MAX);
        let b = Money::from_minor(1);
        assert_eq!(a.checked_add(&b), Err(MoneyError::Overflow));
    }

    #[test]
    fn test_checked_add_non_negative_rejects_negative_result() {
        let balance = Money::from_minor(100);
        let delta = Money::from_minor(-200);
        assert_eq!(
            balance.checked_add_non_negative(&delta),
            Err(MoneyError::Negative)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor(1234).to_string(), "12.34");
        assert_eq!(Money::from_minor(5).to_string(), "0.05");
        assert_eq!(Money::from_minor(-150).to_string(), "-1.50");
    }

    #[test]
    fn test_serde_transparent() {
        let money = Money::from_minor(500);
        let json = serde_json::to_string(&money).unwrap();
        assert_eq!(json, "500");

        let parsed: Money = serde_json::from_str("500").unwrap();
        assert_eq!(parsed, money);
    }

    proptest! {
        #[test]
        fn prop_add_then_sub_roundtrips(a in -1_000_000_000i64..1_000_000_000, b in -1_000_000_000i64..1_000_000_000) {
            let x = Money::from_minor(a);
            let y = Money::from_minor(b);
            let sum = x.checked_add(&y).unwrap();
            prop_assert_eq!(sum.checked_sub(&y).unwrap(), x);
        }

        #[test]
        fn prop_positive_sums_stay_non_negative(a in 0i64..1_000_000_000, b in 0i64..1_000_000_000) {
            let sum = Money::from_minor(a)
                .checked_add_non_negative(&Money::from_minor(b))
                .unwrap();
            prop_assert!(!sum.is_negative());
        }
    }
}
