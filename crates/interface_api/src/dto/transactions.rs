//! Deposit and transaction history DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use domain_ledger::{Transaction, TransactionPage};

#[derive(Debug, Deserialize)]
pub struct DepositRequest {
    pub amount_minor_units: i64,
    pub idempotency_key: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub id: i64,
    pub account_id: i64,
    pub amount_minor_units: i64,
    pub kind: String,
    pub idempotency_key: String,
    pub created_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id.value(),
            account_id: transaction.account_id.value(),
            amount_minor_units: transaction.amount.minor_units(),
            kind: transaction.kind.as_str().to_string(),
            idempotency_key: transaction.idempotency_key,
            created_at: transaction.created_at,
        }
    }
}

/// Response to a deposit; identical whether the deposit was applied or
/// replayed from an earlier application of the same idempotency key
#[derive(Debug, Serialize, Deserialize)]
pub struct BalanceUpdateResponse {
    pub new_balance_minor_units: i64,
    pub transaction: TransactionResponse,
}

/// Query parameters for the transaction history listing
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    pub limit: Option<i64>,
    pub cursor: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionListResponse {
    pub transactions: Vec<TransactionResponse>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

impl From<TransactionPage> for TransactionListResponse {
    fn from(page: TransactionPage) -> Self {
        Self {
            transactions: page
                .transactions
                .into_iter()
                .map(TransactionResponse::from)
                .collect(),
            next_cursor: page.next_cursor,
            has_more: page.has_more,
        }
    }
}
