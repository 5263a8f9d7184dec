//! Passive gain rate computation.
//!
//! A layer's rate folds bought upgrade effects over its base rate:
//! additive contributions first, then multipliers. The fold walks layers
//! in id order and each layer's upgrades in declared order, so the result
//! is deterministic even though plain multiplication would not need the
//! tie-break.

use crate::def::{EffectDef, LayerId};
use crate::env::LayerOracle;
use crate::num::Decimal;
use crate::state::GameState;

/// Current passive gain per second for `target`.
///
/// `(base_rate + Σ additive effects) × Π multiplier effects`, counting
/// only bought upgrades whose effect points at `target`. Unknown targets
/// rate at zero.
pub fn passive_rate<L: LayerOracle + ?Sized>(
    layers: &L,
    state: &GameState,
    target: LayerId,
) -> Decimal {
    let Some(base) = layers.layer(target).map(|def| def.base_rate) else {
        return Decimal::ZERO;
    };

    let mut additive = Decimal::ZERO;
    let mut multiplier = Decimal::ONE;

    for id in layers.iter_ids() {
        let Some(def) = layers.layer(id) else {
            continue;
        };
        let Some(layer_state) = state.layer(id) else {
            continue;
        };
        for (index, upgrade) in def.upgrades.iter().enumerate() {
            if !layer_state.bought(index) {
                continue;
            }
            match upgrade.effect {
                EffectDef::RateAdd { target: t, amount } if t == target => {
                    additive = additive.saturating_add(amount);
                }
                EffectDef::RateMultiply { target: t, factor } if t == target => {
                    multiplier = multiplier.saturating_mul(factor);
                }
                _ => {}
            }
        }
    }

    base.saturating_add(additive).saturating_mul(multiplier)
}
