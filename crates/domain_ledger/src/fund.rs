//! Fund holdings and the balance-update rule
//!
//! A `Fund` tracks a quota-based holding: how many quotas are held and how
//! much money was invested to acquire them. Balances change only through
//! [`Fund::apply`], which implements the deposit and proportional-redemption
//! arithmetic.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::FundId;

use crate::error::LedgerError;
use crate::round_amount;
use crate::transaction::TransactionKind;

/// Maximum length of a fund name
pub const MAX_NAME_LEN: usize = 100;
/// Maximum length of a ticker code
pub const MAX_TICKER_LEN: usize = 10;
/// Maximum length of a fund category label
pub const MAX_KIND_LEN: usize = 50;

/// A tracked investment holding
///
/// Invariants: `quota_balance >= 0` and `invested_value >= 0` at all times.
/// When the quota balance reaches zero the invested value is zero as well,
/// up to rounding at ledger precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fund {
    /// Unique identifier, assigned at creation
    pub id: FundId,
    /// Display label
    pub name: String,
    /// Short code, globally unique
    pub ticker: String,
    /// Free-form category label
    pub kind: String,
    /// Price per quota at creation time. Captured for compatibility; it does
    /// not participate in any balance computation.
    pub quote_value: Decimal,
    /// Current quantity of quotas held
    pub quota_balance: Decimal,
    /// Current total amount invested (cost basis)
    pub invested_value: Decimal,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Refreshed on every transaction affecting this fund
    pub updated_at: DateTime<Utc>,
}

impl Fund {
    /// Creates a new fund with zero balances
    ///
    /// # Arguments
    ///
    /// * `name` - Display label, at most 100 characters
    /// * `ticker` - Short code, at most 10 characters
    /// * `kind` - Category label, at most 50 characters
    /// * `quote_value` - Price per quota, must be positive
    /// * `now` - Creation timestamp
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Validation` if any field is empty, over-long,
    /// or if `quote_value` is not positive. Ticker uniqueness is enforced by
    /// the store, not here.
    pub fn create(
        name: impl Into<String>,
        ticker: impl Into<String>,
        kind: impl Into<String>,
        quote_value: Decimal,
        now: DateTime<Utc>,
    ) -> Result<Self, LedgerError> {
        let name = name.into();
        let ticker = ticker.into();
        let kind = kind.into();

        if name.trim().is_empty() {
            return Err(LedgerError::missing_field("name"));
        }
        if ticker.trim().is_empty() {
            return Err(LedgerError::missing_field("ticker"));
        }
        if kind.trim().is_empty() {
            return Err(LedgerError::missing_field("type"));
        }
        if quote_value <= Decimal::ZERO {
            return Err(LedgerError::not_positive("quoteValue"));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(LedgerError::too_long("name", MAX_NAME_LEN));
        }
        if ticker.chars().count() > MAX_TICKER_LEN {
            return Err(LedgerError::too_long("ticker", MAX_TICKER_LEN));
        }
        if kind.chars().count() > MAX_KIND_LEN {
            return Err(LedgerError::too_long("type", MAX_KIND_LEN));
        }

        Ok(Self {
            id: FundId::new(),
            name,
            ticker,
            kind,
            quote_value,
            quota_balance: Decimal::ZERO,
            invested_value: Decimal::ZERO,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies a deposit or withdrawal to the balances
    ///
    /// Deposits add `quota_amount` quotas and `amount` to the invested value.
    /// Withdrawals remove `quota_amount` quotas and the proportional share of
    /// the invested value:
    ///
    /// ```text
    /// proportional = quota_amount / (new_balance + quota_amount) * invested_value
    /// ```
    ///
    /// The denominator is the pre-transaction balance, so withdrawing a
    /// fraction of the quotas removes that same fraction of the cost basis
    /// and the per-quota cost basis of the remainder is unchanged. A full
    /// withdrawal degenerates to `proportional = invested_value`, driving
    /// both balances to zero with no division by zero (the denominator is
    /// `quota_amount`, which is positive).
    ///
    /// # Errors
    ///
    /// * `LedgerError::Validation` if `quota_amount` or `amount` is not
    ///   positive
    /// * `LedgerError::InsufficientBalance` if a withdrawal exceeds the held
    ///   quota balance; the fund is left untouched
    pub fn apply(
        &mut self,
        kind: TransactionKind,
        quota_amount: Decimal,
        amount: Decimal,
        now: DateTime<Utc>,
    ) -> Result<(), LedgerError> {
        if quota_amount <= Decimal::ZERO {
            return Err(LedgerError::not_positive("quantidade"));
        }
        if amount <= Decimal::ZERO {
            return Err(LedgerError::not_positive("valor"));
        }

        match kind {
            TransactionKind::Deposit => {
                self.quota_balance += quota_amount;
                self.invested_value += amount;
            }
            TransactionKind::Withdrawal => {
                if quota_amount > self.quota_balance {
                    return Err(LedgerError::InsufficientBalance {
                        requested: quota_amount,
                        available: self.quota_balance,
                    });
                }
                let new_balance = self.quota_balance - quota_amount;
                let proportional =
                    quota_amount / (new_balance + quota_amount) * self.invested_value;
                self.quota_balance = new_balance;
                self.invested_value = round_amount(self.invested_value - proportional);
            }
        }

        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn fund() -> Fund {
        Fund::create("Tesouro Selic", "SELIC11", "Renda Fixa", dec!(120.55), Utc::now()).unwrap()
    }

    #[test]
    fn test_create_starts_with_zero_balances() {
        let fund = fund();
        assert_eq!(fund.quota_balance, Decimal::ZERO);
        assert_eq!(fund.invested_value, Decimal::ZERO);
        assert_eq!(fund.created_at, fund.updated_at);
    }

    #[test]
    fn test_create_rejects_blank_fields() {
        let now = Utc::now();
        assert_eq!(
            Fund::create("", "TCK", "FII", dec!(1), now),
            Err(LedgerError::missing_field("name"))
        );
        assert_eq!(
            Fund::create("Fund", "  ", "FII", dec!(1), now),
            Err(LedgerError::missing_field("ticker"))
        );
        assert_eq!(
            Fund::create("Fund", "TCK", "", dec!(1), now),
            Err(LedgerError::missing_field("type"))
        );
    }

    #[test]
    fn test_create_rejects_non_positive_quote_value() {
        let now = Utc::now();
        assert!(Fund::create("Fund", "TCK", "FII", Decimal::ZERO, now).is_err());
        assert!(Fund::create("Fund", "TCK", "FII", dec!(-3.10), now).is_err());
    }

    #[test]
    fn test_create_enforces_field_lengths() {
        let now = Utc::now();
        let long_name = "x".repeat(MAX_NAME_LEN + 1);
        assert_eq!(
            Fund::create(long_name, "TCK", "FII", dec!(1), now),
            Err(LedgerError::too_long("name", MAX_NAME_LEN))
        );
        assert!(Fund::create("Fund", "TOOLONGTICKER", "FII", dec!(1), now).is_err());
        let long_kind = "k".repeat(MAX_KIND_LEN + 1);
        assert!(Fund::create("Fund", "TCK", long_kind, dec!(1), now).is_err());
    }

    #[test]
    fn test_deposit_adds_exactly() {
        let mut fund = fund();
        fund.apply(TransactionKind::Deposit, dec!(10.5), dec!(1266.02), Utc::now())
            .unwrap();
        assert_eq!(fund.quota_balance, dec!(10.5));
        assert_eq!(fund.invested_value, dec!(1266.02));
    }

    #[test]
    fn test_partial_withdrawal_removes_proportional_cost_basis() {
        let mut fund = fund();
        fund.apply(TransactionKind::Deposit, dec!(100), dec!(1000), Utc::now())
            .unwrap();
        // Worked example: withdraw 40 of 100 quotas -> 400 of the 1000 leaves
        fund.apply(TransactionKind::Withdrawal, dec!(40), dec!(480), Utc::now())
            .unwrap();
        assert_eq!(fund.quota_balance, dec!(60));
        assert_eq!(fund.invested_value, dec!(600.00));
    }

    #[test]
    fn test_withdrawal_amount_does_not_enter_balance_math() {
        let mut a = fund();
        let mut b = fund();
        a.apply(TransactionKind::Deposit, dec!(100), dec!(1000), Utc::now())
            .unwrap();
        b.apply(TransactionKind::Deposit, dec!(100), dec!(1000), Utc::now())
            .unwrap();
        a.apply(TransactionKind::Withdrawal, dec!(40), dec!(1.00), Utc::now())
            .unwrap();
        b.apply(TransactionKind::Withdrawal, dec!(40), dec!(9999.99), Utc::now())
            .unwrap();
        assert_eq!(a.invested_value, b.invested_value);
        assert_eq!(a.quota_balance, b.quota_balance);
    }

    #[test]
    fn test_full_withdrawal_zeroes_both_balances() {
        let mut fund = fund();
        fund.apply(TransactionKind::Deposit, dec!(33.33), dec!(712.47), Utc::now())
            .unwrap();
        fund.apply(TransactionKind::Withdrawal, dec!(33.33), dec!(800), Utc::now())
            .unwrap();
        assert_eq!(fund.quota_balance, Decimal::ZERO);
        assert_eq!(fund.invested_value, dec!(0.00));
    }

    #[test]
    fn test_overdraw_is_rejected_without_state_change() {
        let mut fund = fund();
        fund.apply(TransactionKind::Deposit, dec!(10), dec!(100), Utc::now())
            .unwrap();
        let before = fund.clone();
        let err = fund
            .apply(TransactionKind::Withdrawal, dec!(10.01), dec!(50), Utc::now())
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
        assert_eq!(fund, before);
    }

    #[test]
    fn test_non_positive_movement_values_rejected() {
        let mut fund = fund();
        assert!(fund
            .apply(TransactionKind::Deposit, Decimal::ZERO, dec!(10), Utc::now())
            .is_err());
        assert!(fund
            .apply(TransactionKind::Deposit, dec!(1), dec!(-10), Utc::now())
            .is_err());
    }

    #[test]
    fn test_apply_refreshes_updated_at() {
        let mut fund = fund();
        let later = fund.created_at + chrono::Duration::seconds(90);
        fund.apply(TransactionKind::Deposit, dec!(1), dec!(10), later)
            .unwrap();
        assert_eq!(fund.updated_at, later);
        assert!(fund.created_at < fund.updated_at);
    }
}
