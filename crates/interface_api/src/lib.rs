//! HTTP API Layer
//!
//! This crate provides the REST API for the quota ledger using Axum. The
//! routes keep the original service's paths and wire formats:
//!
//! - `GET  /api/v1/carteira` - portfolio summary
//! - `POST /api/v1/carteira` - create a fund
//! - `POST /api/v1/movimentacoes` - record a deposit or withdrawal
//!
//! All errors render as `{ "error": message }` with the status code of the
//! failure category; see [`error::ApiError`].

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use infra_db::{FundRepository, TransactionRepository};

use crate::config::ApiConfig;
use crate::handlers::{health, movement, portfolio};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub funds: FundRepository,
    pub transactions: TransactionRepository,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `config` - API configuration
pub fn create_router(pool: PgPool, config: ApiConfig) -> Router {
    let state = AppState {
        funds: FundRepository::new(pool.clone()),
        transactions: TransactionRepository::new(pool.clone()),
        pool,
        config,
    };

    let api_routes = Router::new()
        .route(
            "/carteira",
            get(portfolio::get_portfolio).post(portfolio::create_fund),
        )
        .route("/movimentacoes", post(movement::record_movement));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
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
