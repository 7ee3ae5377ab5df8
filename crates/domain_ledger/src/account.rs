//! Account types for dependent-owned virtual accounts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{AccountId, DependentId, Money};

/// The two account kinds every dependent owns
///
/// Exactly one of each is created when the owning dependent profile is
/// created; both start at a zero balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    /// Day-to-day spending account
    Checking,
    /// Long-term savings account
    Savings,
}

impl AccountKind {
    /// Returns the stable string form used in storage and on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Checking => "checking",
            AccountKind::Savings => "savings",
        }
    }

    /// Both kinds, in provisioning order
    pub fn all() -> [AccountKind; 2] {
        [AccountKind::Checking, AccountKind::Savings]
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "checking" => Ok(AccountKind::Checking),
            "savings" => Ok(AccountKind::Savings),
            other => Err(format!("unknown account kind: {other}")),
        }
    }
}

/// A dependent-owned virtual account
///
/// # Invariants
///
/// - `balance` equals the sum of all committed transaction amounts for this
///   account and never goes negative.
/// - Mutated only through the ledger's atomic deposit unit; never deleted
///   independently of the owning dependent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,
    /// Owning dependent
    pub dependent_id: DependentId,
    /// Account kind
    pub kind: AccountKind,
    /// Current balance in minor units
    pub balance: Money,
    /// When the account was created
    pub created_at: DateTime<Utc>,
    /// Last balance mutation, if any
    pub updated_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Creates a fresh zero-balance account
    pub fn new(id: AccountId, dependent_id: DependentId, kind: AccountKind) -> Self {
        Self {
            id,
            dependent_id,
            kind,
            balance: Money::ZERO,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}
