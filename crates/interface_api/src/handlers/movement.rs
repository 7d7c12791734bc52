//! Movement handler: deposit and withdrawal recording

use axum::{extract::State, http::StatusCode, Json};

use core_kernel::FundId;
use domain_ledger::LedgerError;

use crate::dto::movement::{MovementResponse, RecordMovementRequest};
use crate::error::{ApiError, ApiJson};
use crate::AppState;

/// `POST /api/v1/movimentacoes`
///
/// Validates in the contract order (fields present, fund exists, quantity,
/// amount, kind, sufficient balance) and applies the movement atomically.
/// Returns the created record plus the fund's post-update balances.
pub async fn record_movement(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RecordMovementRequest>,
) -> Result<(StatusCode, Json<MovementResponse>), ApiError> {
    let fund_id = request
        .carteira_id
        .ok_or_else(|| LedgerError::missing_field("carteira_id"))?;
    let tipo = request
        .tipo
        .ok_or_else(|| LedgerError::missing_field("tipo"))?;
    let quantidade = request
        .quantidade
        .ok_or_else(|| LedgerError::missing_field("quantidade"))?;
    let valor = request
        .valor
        .ok_or_else(|| LedgerError::missing_field("valor"))?;

    let (record, fund) = state
        .transactions
        .record(FundId::from_uuid(fund_id), &tipo, quantidade, valor)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MovementResponse::from_parts(record, &fund)),
    ))
}
