//! Conversion gain computation.
//!
//! Pure: the candidate gain is a function of the base resource's current
//! value and nothing else. Applying the gain is the job of
//! [`crate::action::ConvertAction`].

use crate::def::{LayerId, Rounding};
use crate::env::LayerOracle;
use crate::formula;
use crate::num::Decimal;
use crate::state::GameState;

/// Candidate gain for `layer`'s conversion at the current base value.
///
/// Returns `None` when the layer has no conversion. The result honors the
/// gain resource's rounding policy.
pub fn compute_gain<L: LayerOracle + ?Sized>(
    layers: &L,
    state: &GameState,
    layer: LayerId,
) -> Option<Decimal> {
    let def = layers.layer(layer)?;
    let conversion = def.conversion.as_ref()?;
    let base_value = state
        .layer(conversion.base)
        .map(|l| l.resource.value())
        .unwrap_or_default();

    let raw = formula::evaluate(&conversion.formula, base_value);
    Some(match def.resource.rounding {
        Rounding::Continuous => raw,
        Rounding::Floor => raw.floor(),
    })
}
