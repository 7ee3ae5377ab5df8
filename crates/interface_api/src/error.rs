//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use domain_ledger::LedgerError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Unauthorized".to_string(),
            ),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone())
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

/// Maps ledger failures onto HTTP semantics: validation problems are 400,
/// missing accounts are 404, exhausted write retries and duplicate
/// provisioning are 409, and store faults stay opaque 500s.
impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InvalidAmount(msg)
            | LedgerError::InvalidIdempotencyKey(msg)
            | LedgerError::InvalidCursor(msg) => ApiError::BadRequest(msg),
            LedgerError::AccountNotFound(id) => {
                ApiError::NotFound(format!("Account {id} not found"))
            }
            LedgerError::AccountsAlreadyExist(msg) => ApiError::Conflict(msg),
            LedgerError::RetryExhausted { .. } => {
                ApiError::Conflict("Deposit conflicted with concurrent writes; retry".to_string())
            }
            LedgerError::Store(_) => ApiError::Internal("Ledger store failure".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::AccountId;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_validation_failures_map_to_bad_request() {
        let err = ApiError::from(LedgerError::InvalidAmount("too small".to_string()));
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);

        let err = ApiError::from(LedgerError::InvalidCursor("garbage".to_string()));
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_missing_account_maps_to_not_found() {
        let err = ApiError::from(LedgerError::AccountNotFound(AccountId::new(9)));
        assert_eq!(status_of(err), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_retry_exhaustion_maps_to_conflict() {
        let err = ApiError::from(LedgerError::RetryExhausted { attempts: 3 });
        assert_eq!(status_of(err), StatusCode::CONFLICT);
    }

    #[test]
    fn test_store_faults_stay_opaque() {
        let err = ApiError::from(LedgerError::Store("connection reset".to_string()));
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
