//! Builders for domain entities in known states

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use domain_ledger::{Fund, TransactionKind};

/// Builds funds with sensible defaults for tests
///
/// # Example
///
/// ```rust
/// use test_utils::FundBuilder;
/// use rust_decimal_macros::dec;
///
/// let fund = FundBuilder::new()
///     .ticker("HGLG11")
///     .balances(dec!(100), dec!(1000))
///     .build();
/// assert_eq!(fund.quota_balance, dec!(100));
/// ```
#[derive(Debug, Clone)]
pub struct FundBuilder {
    name: String,
    ticker: String,
    kind: String,
    quote_value: Decimal,
    quota_balance: Decimal,
    invested_value: Decimal,
}

impl FundBuilder {
    pub fn new() -> Self {
        Self {
            name: "Fundo de Teste".to_string(),
            ticker: "TEST11".to_string(),
            kind: "FII".to_string(),
            quote_value: dec!(100.00),
            quota_balance: Decimal::ZERO,
            invested_value: Decimal::ZERO,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn ticker(mut self, ticker: impl Into<String>) -> Self {
        self.ticker = ticker.into();
        self
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn quote_value(mut self, quote_value: Decimal) -> Self {
        self.quote_value = quote_value;
        self
    }

    /// Seeds the fund with a starting quota balance and invested value
    pub fn balances(mut self, quota_balance: Decimal, invested_value: Decimal) -> Self {
        self.quota_balance = quota_balance;
        self.invested_value = invested_value;
        self
    }

    pub fn build(self) -> Fund {
        let mut fund = Fund::create(self.name, self.ticker, self.kind, self.quote_value, Utc::now())
            .expect("FundBuilder produced an invalid fund");
        if self.quota_balance > Decimal::ZERO {
            fund.apply(
                TransactionKind::Deposit,
                self.quota_balance,
                self.invested_value,
                fund.created_at,
            )
            .expect("FundBuilder seed deposit failed");
        }
        fund
    }
}

impl Default for FundBuilder {
    fn default() -> Self {
        Self::new()
    }
}
