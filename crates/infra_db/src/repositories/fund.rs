//! Fund repository
//!
//! Owns fund creation and the portfolio summary read. The summary runs its
//! three queries inside one read-only SQL transaction so the total, the fund
//! list, and the recent transactions reflect a single snapshot.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use core_kernel::{FundId, TransactionId};
use domain_ledger::{
    Fund, PortfolioSummary, RecentTransaction, Transaction, RECENT_TRANSACTIONS_LIMIT,
};

use crate::error::DatabaseError;

/// Database row for a fund
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FundRow {
    pub id: Uuid,
    pub name: String,
    pub ticker: String,
    pub kind: String,
    pub quote_value: Decimal,
    pub quota_balance: Decimal,
    pub invested_value: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FundRow> for Fund {
    fn from(row: FundRow) -> Self {
        Fund {
            id: FundId::from_uuid(row.id),
            name: row.name,
            ticker: row.ticker,
            kind: row.kind,
            quote_value: row.quote_value,
            quota_balance: row.quota_balance,
            invested_value: row.invested_value,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Database row for a recent transaction joined with its fund's name
#[derive(Debug, Clone, sqlx::FromRow)]
struct RecentTransactionRow {
    id: Uuid,
    fund_id: Uuid,
    operation_date: NaiveDate,
    kind: String,
    amount: Decimal,
    quota_amount: Decimal,
    created_at: DateTime<Utc>,
    fund_name: String,
}

impl TryFrom<RecentTransactionRow> for RecentTransaction {
    type Error = DatabaseError;

    fn try_from(row: RecentTransactionRow) -> Result<Self, Self::Error> {
        let kind = row
            .kind
            .parse()
            .map_err(|e: domain_ledger::LedgerError| DatabaseError::CorruptRow(e.to_string()))?;
        Ok(RecentTransaction {
            transaction: Transaction {
                id: TransactionId::from_uuid(row.id),
                fund_id: FundId::from_uuid(row.fund_id),
                operation_date: row.operation_date,
                kind,
                amount: row.amount,
                quota_amount: row.quota_amount,
                created_at: row.created_at,
            },
            fund_name: row.fund_name,
        })
    }
}

const SELECT_FUND_COLUMNS: &str = "SELECT id, name, ticker, kind, quote_value, quota_balance, \
                                   invested_value, created_at, updated_at FROM funds";

/// Repository for fund rows and the portfolio summary
#[derive(Debug, Clone)]
pub struct FundRepository {
    pool: PgPool,
}

impl FundRepository {
    /// Creates a new repository backed by the given pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persists a newly created fund
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::DuplicateEntry` when the ticker is already
    /// taken (unique constraint), other `DatabaseError` variants otherwise.
    pub async fn insert(&self, fund: &Fund) -> Result<(), DatabaseError> {
        debug!(fund_id = %fund.id, ticker = %fund.ticker, "Inserting fund");

        sqlx::query(
            r#"
            INSERT INTO funds (id, name, ticker, kind, quote_value, quota_balance,
                               invested_value, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(fund.id.as_uuid())
        .bind(&fund.name)
        .bind(&fund.ticker)
        .bind(&fund.kind)
        .bind(fund.quote_value)
        .bind(fund.quota_balance)
        .bind(fund.invested_value)
        .bind(fund.created_at)
        .bind(fund.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let err = DatabaseError::from(e);
            if err.is_duplicate() {
                DatabaseError::duplicate("Fund", "ticker", &fund.ticker)
            } else {
                err
            }
        })?;

        Ok(())
    }

    /// Fetches a fund by id
    pub async fn get(&self, fund_id: FundId) -> Result<Option<Fund>, DatabaseError> {
        let row = sqlx::query_as::<_, FundRow>(&format!("{} WHERE id = $1", SELECT_FUND_COLUMNS))
            .bind(fund_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Fund::from))
    }

    /// Computes the portfolio summary from a single read snapshot
    ///
    /// Returns the total invested value, all funds ordered by name, and the
    /// most recent transactions (operation date descending, creation order as
    /// tie-break) annotated with their fund's name.
    pub async fn summary(&self) -> Result<PortfolioSummary, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        // Must run before any other statement in the transaction. Under the
        // default READ COMMITTED level each query would take its own snapshot,
        // so a movement committing mid-summary could make the total diverge
        // from the fund list.
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let total_invested: Decimal =
            sqlx::query_scalar("SELECT COALESCE(SUM(invested_value), 0) FROM funds")
                .fetch_one(&mut *tx)
                .await?;

        let funds = sqlx::query_as::<_, FundRow>(&format!("{} ORDER BY name ASC", SELECT_FUND_COLUMNS))
            .fetch_all(&mut *tx)
            .await?
            .into_iter()
            .map(Fund::from)
            .collect();

        let recent_rows = sqlx::query_as::<_, RecentTransactionRow>(
            r#"
            SELECT t.id, t.fund_id, t.operation_date, t.kind, t.amount,
                   t.quota_amount, t.created_at, f.name AS fund_name
            FROM fund_transactions t
            JOIN funds f ON f.id = t.fund_id
            ORDER BY t.operation_date DESC, t.created_at DESC, t.id DESC
            LIMIT $1
            "#,
        )
        .bind(RECENT_TRANSACTIONS_LIMIT)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let recent_transactions = recent_rows
            .into_iter()
            .map(RecentTransaction::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PortfolioSummary {
            total_invested,
            funds,
            recent_transactions,
        })
    }
}
