//! DTOs for the /api/v1/carteira endpoint

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domain_ledger::{Fund, PortfolioSummary, RecentTransaction};

/// Timestamp format of `createdAt`/`updatedAt` in fund responses
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Body of `POST /api/v1/carteira`
///
/// Fields are optional so a missing field is reported as a validation error
/// rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct CreateFundRequest {
    pub name: Option<String>,
    pub ticker: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(rename = "quoteValue")]
    pub quote_value: Option<Decimal>,
}

/// 201 body of `POST /api/v1/carteira`
#[derive(Debug, Serialize)]
pub struct FundCreatedResponse {
    pub id: Uuid,
    pub name: String,
    pub ticker: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "quoteValue", with = "rust_decimal::serde::float")]
    pub quote_value: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

impl From<Fund> for FundCreatedResponse {
    fn from(fund: Fund) -> Self {
        Self {
            id: *fund.id.as_uuid(),
            name: fund.name,
            ticker: fund.ticker,
            kind: fund.kind,
            quote_value: fund.quote_value,
            quantity: fund.quota_balance,
            amount: fund.invested_value,
            created_at: fund.created_at.format(DATETIME_FORMAT).to_string(),
            updated_at: fund.updated_at.format(DATETIME_FORMAT).to_string(),
        }
    }
}

/// One row of the portfolio or recent-transactions lists
///
/// Funds and transactions share this shape: for a fund, `date` is the day of
/// the last update and `quantity`/`amount` are its balances; for a
/// transaction they are the operation date and the moved values.
#[derive(Debug, Serialize)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    #[serde(rename = "fundName")]
    pub fund_name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl From<&Fund> for LedgerEntry {
    fn from(fund: &Fund) -> Self {
        Self {
            id: *fund.id.as_uuid(),
            date: fund.updated_at.date_naive(),
            fund_name: fund.name.clone(),
            kind: fund.kind.clone(),
            quantity: fund.quota_balance,
            amount: fund.invested_value,
        }
    }
}

impl From<&RecentTransaction> for LedgerEntry {
    fn from(recent: &RecentTransaction) -> Self {
        Self {
            id: *recent.transaction.id.as_uuid(),
            date: recent.transaction.operation_date,
            fund_name: recent.fund_name.clone(),
            kind: recent.transaction.kind.as_str().to_string(),
            quantity: recent.transaction.quota_amount,
            amount: recent.transaction.amount,
        }
    }
}

/// Invested total wrapper of the summary response
#[derive(Debug, Serialize)]
pub struct InvestedSummary {
    #[serde(with = "rust_decimal::serde::float")]
    pub invested: Decimal,
}

/// 200 body of `GET /api/v1/carteira`
#[derive(Debug, Serialize)]
pub struct PortfolioResponse {
    #[serde(rename = "portfolioSummary")]
    pub portfolio_summary: InvestedSummary,
    pub portfolio: Vec<LedgerEntry>,
    #[serde(rename = "recentTransactions")]
    pub recent_transactions: Vec<LedgerEntry>,
}

impl From<PortfolioSummary> for PortfolioResponse {
    fn from(summary: PortfolioSummary) -> Self {
        Self {
            portfolio_summary: InvestedSummary {
                invested: summary.total_invested,
            },
            portfolio: summary.funds.iter().map(LedgerEntry::from).collect(),
            recent_transactions: summary
                .recent_transactions
                .iter()
                .map(LedgerEntry::from)
                .collect(),
        }
    }
}
