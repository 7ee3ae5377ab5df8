//! Account handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use core_kernel::{AccountId, DependentId};

use crate::auth::{can_access_account, Claims};
use crate::dto::accounts::{AccountResponse, OpenAccountsRequest};
use crate::dto::transactions::{BalanceUpdateResponse, DepositRequest};
use crate::error::ApiError;
use crate::AppState;

/// Provisions the checking/savings pair for a dependent
pub async fn open_accounts(
    State(state): State<AppState>,
    Json(request): Json<OpenAccountsRequest>,
) -> Result<(StatusCode, Json<Vec<AccountResponse>>), ApiError> {
    let accounts = state
        .store
        .open_accounts(DependentId::new(request.dependent_id))
        .await
        .map_err(domain_ledger::LedgerError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(accounts.into_iter().map(AccountResponse::from).collect()),
    ))
}

/// Gets an account by ID
pub async fn get_account(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<Json<AccountResponse>, ApiError> {
    let account_id = AccountId::new(id);
    ensure_access(&claims, account_id)?;

    let account = state
        .store
        .find_account(account_id)
        .await
        .map_err(domain_ledger::LedgerError::from)?
        .ok_or_else(|| ApiError::NotFound(format!("Account {account_id} not found")))?;

    Ok(Json(account.into()))
}

/// Applies a deposit to an account
pub async fn create_deposit(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(request): Json<DepositRequest>,
) -> Result<Json<BalanceUpdateResponse>, ApiError> {
    let account_id = AccountId::new(id);
    ensure_access(&claims, account_id)?;

    let receipt = state
        .processor
        .deposit(
            account_id,
            request.amount_minor_units,
            &request.idempotency_key,
        )
        .await?;

    Ok(Json(BalanceUpdateResponse {
        new_balance_minor_units: receipt.new_balance.minor_units(),
        transaction: receipt.transaction.into(),
    }))
}

/// The account access gate, shared by every account-scoped handler
///
/// Unauthorized accounts read as nonexistent rather than forbidden.
pub(crate) fn ensure_access(claims: &Claims, account_id: AccountId) -> Result<(), ApiError> {
    if can_access_account(claims, account_id) {
        Ok(())
    } else {
        Err(ApiError::NotFound(format!(
            "Account {account_id} not found"
        )))
    }
}
