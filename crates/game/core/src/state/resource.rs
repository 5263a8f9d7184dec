//! A scalar resource with historical bookkeeping.

use crate::num::{self, Decimal};

/// Current amount of a layer's resource plus its running records.
///
/// Invariants, maintained by the mutation methods:
/// - `best` is the maximum value ever observed
/// - `total` accumulates positive gains only, and survives resets unless
///   the owning layer's reset policy explicitly clears records
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resource {
    value: Decimal,
    best: Decimal,
    total: Decimal,
}

impl Resource {
    /// A fresh resource. The starting amount counts toward `best` and
    /// `total`, matching a new game where the opening balance is a grant.
    pub fn new(initial: Decimal) -> Self {
        Self {
            value: initial,
            best: initial,
            total: initial,
        }
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn best(&self) -> Decimal {
        self.best
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Sets the value directly, keeping the `best` record current.
    pub fn set_value(&mut self, value: Decimal) {
        self.value = value;
        self.best = self.best.max(value);
    }

    /// Applies a gain (or decay, when negative).
    ///
    /// `total` picks up only the positive part; a negative delta is decay
    /// or a cost, neither of which was ever "earned".
    pub fn add_gain(&mut self, delta: Decimal) {
        self.value = self.value.saturating_add(delta);
        self.best = self.best.max(self.value);
        self.total = self.total.saturating_add(num::non_negative(delta));
    }

    /// Rewrites value and records together; used by record-clearing resets.
    pub(crate) fn reset_all(&mut self, baseline: Decimal) {
        self.value = baseline;
        self.best = baseline;
        self.total = baseline;
    }

    /// Restores persisted fields verbatim (no invariant re-derivation:
    /// the save already held a consistent triple).
    pub fn restore(value: Decimal, best: Decimal, total: Decimal) -> Self {
        Self { value, best, total }
    }
}
