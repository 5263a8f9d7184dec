//! Formula system for conversion and gain calculation.
//!
//! Formulas are data: content files describe how a base resource maps to a
//! prestige gain, and the evaluator interprets the description. Every
//! formula is a pure, monotonically non-decreasing transform over
//! non-negative inputs.
//!
//! ## Examples
//!
//! ```ignore
//! // sqrt(crumbs / 10) — the standard prestige curve
//! Formula::DivThenSqrt { divisor: dec!(10) }
//!
//! // 3 + x/2
//! Formula::Sum(vec![
//!     Formula::Constant(dec!(3)),
//!     Formula::Scale { factor: dec!(0.5), inner: Box::new(Formula::Input) },
//! ])
//! ```

mod evaluate;

pub use evaluate::{evaluate, try_evaluate};
pub(crate) use evaluate::check;

use crate::num::Decimal;

/// Formula for mapping a base quantity to a derived quantity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Formula {
    /// Fixed constant value, independent of the input.
    Constant(Decimal),

    /// The input itself.
    Input,

    /// Divide the input by a constant, then take the square root.
    ///
    /// The divisor must be positive; content validation rejects anything
    /// else. A negative intermediate (only reachable through a negative
    /// input) evaluates to zero.
    DivThenSqrt { divisor: Decimal },

    /// A constant multiple of an inner formula.
    Scale { factor: Decimal, inner: Box<Formula> },

    /// Sum of sub-formulas.
    Sum(Vec<Formula>),

    /// Product of sub-formulas.
    Product(Vec<Formula>),

    /// Minimum of sub-formulas.
    Min(Vec<Formula>),

    /// Maximum of sub-formulas.
    Max(Vec<Formula>),
}

/// Errors surfaced by the strict evaluation path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormulaError {
    #[error("negative input {input} to a root formula")]
    NegativeInput { input: Decimal },

    #[error("division by a non-positive divisor {divisor}")]
    NonPositiveDivisor { divisor: Decimal },

    #[error("empty composite formula")]
    EmptyComposite,
}
