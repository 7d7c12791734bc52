//! DTOs for the /api/v1/movimentacoes endpoint

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domain_ledger::{Fund, Transaction, TransactionKind};

/// Body of `POST /api/v1/movimentacoes`
#[derive(Debug, Deserialize)]
pub struct RecordMovementRequest {
    pub carteira_id: Option<Uuid>,
    pub tipo: Option<String>,
    pub quantidade: Option<Decimal>,
    pub valor: Option<Decimal>,
}

/// Post-update fund balances
#[derive(Debug, Serialize)]
pub struct CurrentBalance {
    #[serde(with = "rust_decimal::serde::float")]
    pub quantidade_cotas: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub valor_investido: Decimal,
}

/// 201 body of `POST /api/v1/movimentacoes`
#[derive(Debug, Serialize)]
pub struct MovementResponse {
    pub id: Uuid,
    pub carteira_id: Uuid,
    pub data_operacao: NaiveDate,
    pub tipo: TransactionKind,
    #[serde(with = "rust_decimal::serde::float")]
    pub valor: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantidade_cotas: Decimal,
    pub saldo_atual: CurrentBalance,
}

impl MovementResponse {
    /// Builds the response from the created record and the updated fund
    pub fn from_parts(record: Transaction, fund: &Fund) -> Self {
        Self {
            id: *record.id.as_uuid(),
            carteira_id: *record.fund_id.as_uuid(),
            data_operacao: record.operation_date,
            tipo: record.kind,
            valor: record.amount,
            quantidade_cotas: record.quota_amount,
            saldo_atual: CurrentBalance {
                quantidade_cotas: fund.quota_balance,
                valor_investido: fund.invested_value,
            },
        }
    }
}
