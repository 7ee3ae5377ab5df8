//! Account DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use domain_ledger::Account;

#[derive(Debug, Deserialize)]
pub struct OpenAccountsRequest {
    pub dependent_id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: i64,
    pub dependent_id: i64,
    pub kind: String,
    pub balance_minor_units: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id.value(),
            dependent_id: account.dependent_id.value(),
            kind: account.kind.as_str().to_string(),
            balance_minor_units: account.balance.minor_units(),
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}
