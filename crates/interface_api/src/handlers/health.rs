//! Health check handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use core_kernel::AccountId;
use domain_ledger::StoreError;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check (includes the ledger store)
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, StatusCode> {
    // Any answer from the store, hit or miss, means it is reachable.
    match state.store.find_account(AccountId::new(1)).await {
        Ok(_) => {}
        Err(StoreError::Unavailable(_)) | Err(StoreError::Internal(_)) => {
            return Err(StatusCode::SERVICE_UNAVAILABLE)
        }
        Err(_) => {}
    }

    Ok(Json(HealthResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
