//! HTTP API Layer
//!
//! This crate provides the REST API for the allowance ledger using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for accounts and transaction history
//! - **Middleware**: Authentication, account access gating, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! The router is built over the `LedgerStore` port rather than a concrete
//! database pool, so the full HTTP surface can be exercised in tests
//! against the in-memory store.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(store, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_ledger::{DepositLimits, DepositProcessor, LedgerStore, TransactionReader};

use crate::config::ApiConfig;
use crate::handlers::{accounts, health, transactions};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LedgerStore>,
    pub processor: DepositProcessor,
    pub reader: TransactionReader,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `store` - The ledger store backing all account operations
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(store: Arc<dyn LedgerStore>, config: ApiConfig) -> Router {
    let processor = DepositProcessor::new(store.clone()).with_limits(DepositLimits::new(
        config.min_deposit_minor_units,
        config.max_deposit_minor_units,
    ));
    let reader = TransactionReader::new(store.clone());
    let state = AppState {
        store,
        processor,
        reader,
        config,
    };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Account routes
    let account_routes = Router::new()
        .route("/", post(accounts::open_accounts))
        .route("/:id", get(accounts::get_account))
        .route("/:id/deposits", post(accounts::create_deposit))
        .route("/:id/transactions", get(transactions::list_transactions));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/accounts", account_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
