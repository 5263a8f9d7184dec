//! Formula evaluation.
//!
//! Two entry points share one interpreter:
//!
//! - [`evaluate`] is total: malformed inputs clamp to zero per the recovery
//!   policy, so per-tick paths never fail.
//! - [`try_evaluate`] is strict: validation paths use it to surface the
//!   condition that `evaluate` would have papered over.

use crate::formula::{Formula, FormulaError};
use crate::num::{self, Decimal};

/// Evaluate a formula, recovering from malformed input by clamping to zero.
///
/// A negative input is treated as zero before interpretation, matching the
/// recovery policy for invalid formula inputs.
pub fn evaluate(formula: &Formula, input: Decimal) -> Decimal {
    let input = num::non_negative(input);
    eval(formula, input)
}

/// Evaluate a formula, surfacing malformed input instead of clamping.
pub fn try_evaluate(formula: &Formula, input: Decimal) -> Result<Decimal, FormulaError> {
    if input.is_sign_negative() {
        return Err(FormulaError::NegativeInput { input });
    }
    check(formula)?;
    Ok(eval(formula, input))
}

fn eval(formula: &Formula, input: Decimal) -> Decimal {
    match formula {
        Formula::Constant(value) => *value,

        Formula::Input => input,

        Formula::DivThenSqrt { divisor } => {
            if divisor.is_sign_negative() || divisor.is_zero() {
                return Decimal::ZERO;
            }
            num::sqrt_or_zero(input / divisor)
        }

        Formula::Scale { factor, inner } => factor.saturating_mul(eval(inner, input)),

        Formula::Sum(formulas) => formulas
            .iter()
            .fold(Decimal::ZERO, |acc, f| acc.saturating_add(eval(f, input))),

        Formula::Product(formulas) => {
            if formulas.is_empty() {
                return Decimal::ZERO;
            }
            formulas
                .iter()
                .fold(Decimal::ONE, |acc, f| acc.saturating_mul(eval(f, input)))
        }

        Formula::Min(formulas) => formulas
            .iter()
            .map(|f| eval(f, input))
            .min()
            .unwrap_or(Decimal::ZERO),

        Formula::Max(formulas) => formulas
            .iter()
            .map(|f| eval(f, input))
            .max()
            .unwrap_or(Decimal::ZERO),
    }
}

/// Structural validity: positive divisors, no empty composites.
///
/// Content construction runs this over every conversion formula so runtime
/// evaluation never meets a malformed tree.
pub(crate) fn check(formula: &Formula) -> Result<(), FormulaError> {
    match formula {
        Formula::Constant(_) | Formula::Input => Ok(()),

        Formula::DivThenSqrt { divisor } => {
            if divisor.is_sign_negative() || divisor.is_zero() {
                Err(FormulaError::NonPositiveDivisor { divisor: *divisor })
            } else {
                Ok(())
            }
        }

        Formula::Scale { inner, .. } => check(inner),

        Formula::Sum(formulas)
        | Formula::Product(formulas)
        | Formula::Min(formulas)
        | Formula::Max(formulas) => {
            if formulas.is_empty() {
                return Err(FormulaError::EmptyComposite);
            }
            formulas.iter().try_for_each(check)
        }
    }
}
