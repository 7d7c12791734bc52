//! Assertion helpers for decimal values

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Default tolerance for balance comparisons: one cent, the rounding unit of
/// the ledger
pub const CENT_TOLERANCE: Decimal = dec!(0.01);

/// Asserts that two decimals are equal within the given tolerance
pub fn assert_decimal_close(actual: Decimal, expected: Decimal, tolerance: Decimal) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "expected {} within {} of {}, but difference was {}",
        actual,
        tolerance,
        expected,
        diff
    );
}

/// Asserts that two balances agree within one cent
pub fn assert_balance_eq(actual: Decimal, expected: Decimal) {
    assert_decimal_close(actual, expected, CENT_TOLERANCE);
}
