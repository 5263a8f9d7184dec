//! Numeric foundation for resource arithmetic.
//!
//! All quantities in the progression system are [`rust_decimal::Decimal`]
//! values: finite by construction, exact for the additive bookkeeping the
//! resource invariants depend on, with sqrt available for conversion
//! formulas. Arithmetic that could overflow uses the saturating forms so a
//! runaway gain curve pins at the numeric ceiling instead of panicking.

mod format;

pub use format::{format, format_time};
pub use rust_decimal::Decimal;

use rust_decimal::MathematicalOps;

/// Square root with the non-negative guard the formula policy requires.
///
/// Negative inputs yield zero rather than an error; callers that need to
/// surface the condition use [`crate::formula::Formula::try_evaluate`].
pub fn sqrt_or_zero(value: Decimal) -> Decimal {
    if value.is_sign_negative() {
        return Decimal::ZERO;
    }
    value.sqrt().unwrap_or(Decimal::ZERO)
}

/// Clamps a candidate gain to zero when negative.
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn sqrt_of_nine_is_three() {
        assert_eq!(sqrt_or_zero(dec!(9)), dec!(3));
    }

    #[test]
    fn sqrt_guards_negative_input() {
        assert_eq!(sqrt_or_zero(dec!(-4)), Decimal::ZERO);
    }

    #[test]
    fn sqrt_of_zero_is_zero() {
        assert_eq!(sqrt_or_zero(Decimal::ZERO), Decimal::ZERO);
    }
}
