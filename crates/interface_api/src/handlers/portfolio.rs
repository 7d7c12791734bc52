//! Portfolio handlers: summary read and fund creation

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use tracing::info;

use domain_ledger::{Fund, LedgerError};

use crate::dto::portfolio::{CreateFundRequest, FundCreatedResponse, PortfolioResponse};
use crate::error::{ApiError, ApiJson};
use crate::AppState;

/// `GET /api/v1/carteira`
///
/// Returns the total invested value, every fund ordered by name, and the
/// five most recent transactions, all from one read snapshot.
pub async fn get_portfolio(
    State(state): State<AppState>,
) -> Result<Json<PortfolioResponse>, ApiError> {
    let summary = state.funds.summary().await?;
    Ok(Json(summary.into()))
}

/// `POST /api/v1/carteira`
///
/// Creates a fund with zero balances. 400 on validation failure or a
/// duplicate ticker, 201 with the created snapshot otherwise.
pub async fn create_fund(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateFundRequest>,
) -> Result<(StatusCode, Json<FundCreatedResponse>), ApiError> {
    let name = request
        .name
        .ok_or_else(|| LedgerError::missing_field("name"))?;
    let ticker = request
        .ticker
        .ok_or_else(|| LedgerError::missing_field("ticker"))?;
    let kind = request
        .kind
        .ok_or_else(|| LedgerError::missing_field("type"))?;
    let quote_value = request
        .quote_value
        .ok_or_else(|| LedgerError::missing_field("quoteValue"))?;

    let fund = Fund::create(name, ticker, kind, quote_value, Utc::now())?;
    state.funds.insert(&fund).await?;

    info!(fund_id = %fund.id, ticker = %fund.ticker, "Fund created");
    Ok((StatusCode::CREATED, Json(fund.into())))
}
