//! Portfolio summary read-model
//!
//! The summary aggregates the whole ledger into one snapshot: total invested
//! value, each fund with its current balances, and the most recent
//! transactions annotated with their fund's name.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fund::Fund;
use crate::transaction::Transaction;

/// How many transactions the summary reports
pub const RECENT_TRANSACTIONS_LIMIT: i64 = 5;

/// A transaction annotated with the name of the fund it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentTransaction {
    pub transaction: Transaction,
    pub fund_name: String,
}

/// A consistent snapshot of the whole ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Sum of `invested_value` over all funds, zero when the ledger is empty
    pub total_invested: Decimal,
    /// Every fund, ordered by name ascending
    pub funds: Vec<Fund>,
    /// The most recent transactions, ordered by operation date descending
    /// with creation order as tie-break
    pub recent_transactions: Vec<RecentTransaction>,
}

impl PortfolioSummary {
    /// The summary of an empty ledger
    pub fn empty() -> Self {
        Self {
            total_invested: Decimal::ZERO,
            funds: Vec::new(),
            recent_transactions: Vec::new(),
        }
    }
}

impl Default for PortfolioSummary {
    fn default() -> Self {
        Self::empty()
    }
}
