//! Ledger domain errors

use core_kernel::FundId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur in the ledger domain
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Missing, malformed, or out-of-range input
    #[error("{0}")]
    Validation(String),

    /// Referenced fund does not exist
    #[error("Fund not found: {0}")]
    FundNotFound(FundId),

    /// Withdrawal exceeds the held quota balance
    #[error("Insufficient quota balance: requested {requested}, held {available}")]
    InsufficientBalance {
        requested: Decimal,
        available: Decimal,
    },
}

impl LedgerError {
    /// Creates a validation error for a missing required field
    pub fn missing_field(field: &str) -> Self {
        LedgerError::Validation(format!("Field {} is required", field))
    }

    /// Creates a validation error for a non-positive numeric field
    pub fn not_positive(field: &str) -> Self {
        LedgerError::Validation(format!("{} must be a positive number", field))
    }

    /// Creates a validation error for an over-long text field
    pub fn too_long(field: &str, max: usize) -> Self {
        LedgerError::Validation(format!(
            "{} exceeds the maximum length of {} characters",
            field, max
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validation_message_passthrough() {
        let err = LedgerError::missing_field("ticker");
        assert_eq!(err.to_string(), "Field ticker is required");
    }

    #[test]
    fn test_insufficient_balance_display() {
        let err = LedgerError::InsufficientBalance {
            requested: dec!(50),
            available: dec!(10),
        };
        assert!(err.to_string().contains("requested 50"));
        assert!(err.to_string().contains("held 10"));
    }
}
