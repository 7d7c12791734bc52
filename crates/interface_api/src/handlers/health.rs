//! Liveness and readiness probes for the ledger service
//!
//! `/health` only says the process is up. `/health/ready` also pings
//! PostgreSQL, since every ledger endpoint reads or writes the database.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use infra_db::DatabaseError;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    fn with_status(status: &str) -> Self {
        Self {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// The ledger process is running
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::with_status("healthy"))
}

/// The ledger can reach its database
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, StatusCode> {
    sqlx::query("SELECT 1")
        .execute(&state.pool)
        .await
        .map_err(|e| {
            let db_err = DatabaseError::from(e);
            tracing::warn!(error = %db_err, "Ledger database unreachable, reporting not ready");
            StatusCode::SERVICE_UNAVAILABLE
        })?;

    Ok(Json(HealthResponse::with_status("ready")))
}
