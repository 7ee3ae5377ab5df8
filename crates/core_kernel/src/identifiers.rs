//! Strongly-typed identifiers for domain entities
//!
//! Using newtype wrappers around the database's 64-bit sequence values
//! provides type safety and prevents accidental mixing of different
//! identifier types. Transaction ids double as the pagination sort key, so
//! the wrapped integer must preserve the sequence's total order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates an identifier from a raw sequence value
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the underlying sequence value
            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

// Ownership identifiers
define_id!(DependentId);

// Ledger identifiers
define_id!(AccountId);
define_id!(TransactionId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_display() {
        let id = AccountId::new(42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_id_parsing() {
        let parsed: TransactionId = "17".parse().unwrap();
        assert_eq!(parsed, TransactionId::new(17));
    }

    #[test]
    fn test_id_parsing_rejects_garbage() {
        assert!("not-a-number".parse::<AccountId>().is_err());
    }

    #[test]
    fn test_transaction_id_ordering() {
        // Pagination relies on ids comparing in sequence order.
        assert!(TransactionId::new(2) > TransactionId::new(1));
    }

    #[test]
    fn test_i64_conversion() {
        let id = DependentId::from(7);
        let back: i64 = id.into();
        assert_eq!(back, 7);
    }

    #[test]
    fn test_serde_transparent() {
        let id = AccountId::new(5);
        assert_eq!(serde_json::to_string(&id).unwrap(), "5");
    }
}
