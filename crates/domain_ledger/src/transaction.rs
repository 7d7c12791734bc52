//! Immutable transaction records

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{FundId, TransactionId};

use crate::error::LedgerError;

/// Kind of ledger transaction
///
/// The wire and store representation keeps the original Portuguese values
/// (`APORTE` = deposit, `RESGATE` = withdrawal) for compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Money in: quotas and invested value increase
    #[serde(rename = "APORTE")]
    Deposit,
    /// Money out: quotas decrease, cost basis removed proportionally
    #[serde(rename = "RESGATE")]
    Withdrawal,
}

impl TransactionKind {
    /// Returns the wire/store representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "APORTE",
            TransactionKind::Withdrawal => "RESGATE",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "APORTE" => Ok(TransactionKind::Deposit),
            "RESGATE" => Ok(TransactionKind::Withdrawal),
            other => Err(LedgerError::Validation(format!(
                "tipo must be APORTE or RESGATE, got '{}'",
                other
            ))),
        }
    }
}

/// Validates the value fields of a movement request in the order the API
/// contract promises: quota quantity first, then amount, then kind.
///
/// Each check short-circuits with its own `LedgerError::Validation`, so a
/// request with several bad fields reports the first one. The balance
/// sufficiency check is not part of this function; it belongs to
/// [`crate::Fund::apply`], which sees the pre-transaction balance.
pub fn validate_movement(
    quota_amount: Decimal,
    amount: Decimal,
    kind: &str,
) -> Result<TransactionKind, LedgerError> {
    if quota_amount <= Decimal::ZERO {
        return Err(LedgerError::not_positive("quantidade"));
    }
    if amount <= Decimal::ZERO {
        return Err(LedgerError::not_positive("valor"));
    }
    kind.parse()
}

/// An immutable deposit or withdrawal record against a fund
///
/// Transactions are append-only: once created they are never mutated or
/// deleted, and a transaction never changes fund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, assigned at creation
    pub id: TransactionId,
    /// The fund this transaction affects
    pub fund_id: FundId,
    /// Calendar date of the operation
    pub operation_date: NaiveDate,
    /// Deposit or withdrawal
    pub kind: TransactionKind,
    /// Monetary value moved, positive
    pub amount: Decimal,
    /// Quota quantity moved, positive
    pub quota_amount: Decimal,
    /// Record creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Creates a new transaction record dated `now`
    ///
    /// The operation date defaults to the calendar date of `now`. Value
    /// validation happens in [`crate::Fund::apply`], which is always invoked
    /// with the same inputs before the record is persisted.
    pub fn new(
        fund_id: FundId,
        kind: TransactionKind,
        quota_amount: Decimal,
        amount: Decimal,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            fund_id,
            operation_date: now.date_naive(),
            kind,
            amount,
            quota_amount,
            created_at: now,
        }
    }
}
