//! Ledger transaction records
//!
//! A transaction is created exactly once per unique idempotency key and is
//! immutable from the moment it commits. The monotonically increasing id is
//! the total order the Transaction Reader pages over.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{AccountId, Money, TransactionId};

/// Kind tag recorded on every transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// A guardian deposit of virtual funds
    Deposit,
}

impl TransactionKind {
    /// Returns the stable string form used in storage and on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "deposit",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deposit" => Ok(TransactionKind::Deposit),
            other => Err(format!("unknown transaction kind: {other}")),
        }
    }
}

/// A committed, immutable ledger entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Monotonically increasing identifier; the pagination sort key
    pub id: TransactionId,
    /// Account this entry belongs to
    pub account_id: AccountId,
    /// Signed amount in minor units; positive for deposits
    pub amount: Money,
    /// Kind tag
    pub kind: TransactionKind,
    /// Caller-supplied key identifying the logical operation
    pub idempotency_key: String,
    /// When the entry committed
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_string_roundtrip() {
        let parsed: TransactionKind = TransactionKind::Deposit.as_str().parse().unwrap();
        assert_eq!(parsed, TransactionKind::Deposit);
    }

    #[test]
    fn test_kind_rejects_unknown() {
        assert!("withdrawal".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn test_serializes_kind_as_snake_case() {
        let json = serde_json::to_string(&TransactionKind::Deposit).unwrap();
        assert_eq!(json, "\"deposit\"");
    }
}
