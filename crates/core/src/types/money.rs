//! Money helpers for rupee amounts.
//!
//! Prices are stored as `NUMERIC` rupee amounts ([`rust_decimal::Decimal`]).
//! The payment gateway operates in paise (minor units), so checkout converts
//! with [`to_paise`] at the API boundary.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Currency code used throughout the store.
pub const CURRENCY: &str = "INR";

/// Errors converting a rupee amount to paise.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MoneyError {
    /// Amount is negative.
    #[error("amount cannot be negative: {0}")]
    Negative(Decimal),
    /// Amount does not fit in an i64 paise value.
    #[error("amount out of range: {0}")]
    OutOfRange(Decimal),
}

/// Convert a rupee amount to paise for the payment gateway.
///
/// Rounds to the nearest paisa (banker's rounding), e.g. ₹180.00 → 18000.
///
/// # Errors
///
/// Returns `MoneyError::Negative` for negative amounts and
/// `MoneyError::OutOfRange` if the result overflows i64.
pub fn to_paise(amount: Decimal) -> Result<i64, MoneyError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(MoneyError::Negative(amount));
    }

    (amount * Decimal::ONE_HUNDRED)
        .round_dp(0)
        .to_i64()
        .ok_or(MoneyError::OutOfRange(amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_to_paise_whole_rupees() {
        assert_eq!(to_paise(Decimal::new(180, 0)).expect("in range"), 18_000);
        assert_eq!(to_paise(Decimal::ZERO).expect("in range"), 0);
    }

    #[test]
    fn test_to_paise_fractional() {
        // ₹99.50 → 9950 paise
        assert_eq!(to_paise(Decimal::new(9950, 2)).expect("in range"), 9_950);
    }

    #[test]
    fn test_to_paise_negative() {
        assert!(matches!(
            to_paise(Decimal::new(-1, 0)),
            Err(MoneyError::Negative(_))
        ));
    }
}
