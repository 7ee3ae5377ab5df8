//! Transaction history handlers

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};

use core_kernel::AccountId;

use crate::auth::Claims;
use crate::dto::transactions::{ListTransactionsQuery, TransactionListResponse};
use crate::error::ApiError;
use crate::handlers::accounts::ensure_access;
use crate::AppState;

/// Lists an account's transactions, most recent first
///
/// Pagination is cursor-based: pass the `next_cursor` from one page as
/// the `cursor` query parameter of the next.
pub async fn list_transactions(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Query(query): Query<ListTransactionsQuery>,
) -> Result<Json<TransactionListResponse>, ApiError> {
    let account_id = AccountId::new(id);
    ensure_access(&claims, account_id)?;

    let page = state
        .reader
        .list(account_id, query.limit, query.cursor.as_deref())
        .await?;

    Ok(Json(page.into()))
}
