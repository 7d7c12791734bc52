//! Ledger Domain
//!
//! This crate implements the accounting core of the quota ledger: fund
//! holdings, deposit/withdrawal transactions, and the proportional-redemption
//! rule that keeps the cost basis of a holding consistent across partial
//! withdrawals.
//!
//! # Key Concepts
//!
//! - **Fund**: a tracked investment holding with a unique ticker, a running
//!   quota balance, and an invested value (cost basis)
//! - **Transaction**: an immutable deposit or withdrawal record against a fund
//! - **Proportional redemption**: withdrawing a fraction of the held quotas
//!   removes the same fraction of the cost basis, so the per-quota cost basis
//!   of the remainder is unchanged (average-cost accounting)
//!
//! # Monetary Precision
//!
//! Amounts and quota quantities are decimals with 2 decimal places, matching
//! the `NUMERIC(10,2)` columns of the persisted store.

pub mod error;
pub mod fund;
pub mod summary;
pub mod transaction;

pub use error::LedgerError;
pub use fund::Fund;
pub use summary::{PortfolioSummary, RecentTransaction, RECENT_TRANSACTIONS_LIMIT};
pub use transaction::{validate_movement, Transaction, TransactionKind};

use rust_decimal::Decimal;

/// Decimal places used for monetary values and quota quantities
pub const LEDGER_PRECISION: u32 = 2;

/// Rounds a value to ledger precision
pub fn round_amount(value: Decimal) -> Decimal {
    value.round_dp(LEDGER_PRECISION)
}
