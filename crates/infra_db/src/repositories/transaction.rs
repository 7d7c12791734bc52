//! Transaction repository
//!
//! Recording a movement is the one write path that touches two tables. The
//! fund row is locked `FOR UPDATE` for the duration of the SQL transaction:
//! the sufficient-balance check, the transaction insert, and the balance
//! update all see and produce one consistent state, and concurrent
//! withdrawals against the same fund serialize on the row lock.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;
use tracing::{debug, info};

use core_kernel::FundId;
use domain_ledger::{validate_movement, Fund, LedgerError, Transaction};

use crate::error::DatabaseError;
use crate::repositories::fund::FundRow;

/// Errors from recording a transaction
///
/// Domain rejections (validation, unknown fund, insufficient balance) are
/// kept apart from storage failures so the API layer can map them to the
/// right status codes.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<sqlx::Error> for RecordError {
    fn from(error: sqlx::Error) -> Self {
        RecordError::Database(DatabaseError::from(error))
    }
}

/// Repository for the append-only transaction log
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: PgPool,
}

impl TransactionRepository {
    /// Creates a new repository backed by the given pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Validates and records a deposit or withdrawal against a fund
    ///
    /// Validation short-circuits in the contract order: fund existence,
    /// quota quantity, amount, kind, and (for withdrawals) sufficient
    /// balance against the pre-transaction quota balance. The transaction
    /// insert and the fund balance update commit atomically; any rejection
    /// or storage failure rolls both back.
    ///
    /// # Arguments
    ///
    /// * `fund_id` - The fund the movement applies to
    /// * `kind` - Wire value, `APORTE` or `RESGATE`
    /// * `quota_amount` - Quota quantity moved, must be positive
    /// * `amount` - Monetary value moved, must be positive
    ///
    /// # Returns
    ///
    /// The created transaction record together with the fund's post-update
    /// balances.
    pub async fn record(
        &self,
        fund_id: FundId,
        kind: &str,
        quota_amount: Decimal,
        amount: Decimal,
    ) -> Result<(Transaction, Fund), RecordError> {
        let mut tx = self.pool.begin().await?;

        // Lock the fund row so concurrent movements serialize here
        let row = sqlx::query_as::<_, FundRow>(
            r#"
            SELECT id, name, ticker, kind, quote_value, quota_balance,
                   invested_value, created_at, updated_at
            FROM funds
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(fund_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?;

        let mut fund: Fund = row.ok_or(LedgerError::FundNotFound(fund_id))?.into();

        let kind = validate_movement(quota_amount, amount, kind)?;

        let now = Utc::now();
        fund.apply(kind, quota_amount, amount, now)?;
        let record = Transaction::new(fund_id, kind, quota_amount, amount, now);

        debug!(
            transaction_id = %record.id,
            fund_id = %fund_id,
            kind = %record.kind,
            %amount,
            %quota_amount,
            "Recording transaction"
        );

        sqlx::query(
            r#"
            INSERT INTO fund_transactions (id, fund_id, operation_date, kind,
                                           amount, quota_amount, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.fund_id.as_uuid())
        .bind(record.operation_date)
        .bind(record.kind.as_str())
        .bind(record.amount)
        .bind(record.quota_amount)
        .bind(record.created_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE funds
            SET quota_balance = $2, invested_value = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(fund.id.as_uuid())
        .bind(fund.quota_balance)
        .bind(fund.invested_value)
        .bind(fund.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            transaction_id = %record.id,
            fund_id = %fund_id,
            quota_balance = %fund.quota_balance,
            invested_value = %fund.invested_value,
            "Transaction recorded"
        );

        Ok((record, fund))
    }
}
