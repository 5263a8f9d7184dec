//! Upgrade purchase phases.
//!
//! The phase is computed, never stored: affordability is re-derived from
//! the cost resource on every query, so there is no cached flag to fall
//! out of date.

use crate::def::{LayerId, UpgradeDef};
use crate::env::LayerOracle;
use crate::state::GameState;

/// Lifecycle of an upgrade slot.
///
/// `Locked → Affordable` happens by the cost resource growing;
/// `Affordable → Bought` only by an explicit purchase; `Bought` holds
/// until a reset clears the slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UpgradePhase {
    Locked,
    Affordable,
    Bought,
}

/// Computes the phase of one upgrade slot.
///
/// Returns `None` when the layer or index does not resolve.
pub fn phase<L: LayerOracle + ?Sized>(
    layers: &L,
    state: &GameState,
    layer: LayerId,
    index: usize,
) -> Option<UpgradePhase> {
    let def = layers.layer(layer)?.upgrades.get(index)?;
    let layer_state = state.layer(layer)?;
    if layer_state.bought(index) {
        return Some(UpgradePhase::Bought);
    }
    Some(phase_against(def, state))
}

fn phase_against(def: &UpgradeDef, state: &GameState) -> UpgradePhase {
    let available = state
        .layer(def.cost_layer)
        .map(|l| l.resource.value())
        .unwrap_or_default();
    if available >= def.cost {
        UpgradePhase::Affordable
    } else {
        UpgradePhase::Locked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::def::{Content, EffectDef, LayerDef, LayerId, TreeDef, UpgradeDef};
    use crate::{GameConfig, GameState};
    use rust_decimal_macros::dec;

    const ONLY: LayerId = LayerId(0);

    fn content() -> Content {
        let mut layer = LayerDef::new(ONLY, "only", "Only");
        layer.upgrades.push(UpgradeDef {
            title: "Test".into(),
            description: String::new(),
            cost: dec!(5),
            cost_layer: ONLY,
            cost_policy: None,
            effect: EffectDef::RateAdd {
                target: ONLY,
                amount: dec!(1),
            },
        });
        Content::new(vec![layer], TreeDef::default(), GameConfig::default()).unwrap()
    }

    #[test]
    fn phase_follows_the_cost_resource() {
        let content = content();
        let mut state = GameState::new(&content);

        assert_eq!(phase(&content, &state, ONLY, 0), Some(UpgradePhase::Locked));

        state
            .layer_mut(ONLY)
            .unwrap()
            .resource
            .add_gain(dec!(5));
        assert_eq!(
            phase(&content, &state, ONLY, 0),
            Some(UpgradePhase::Affordable)
        );

        state.layer_mut(ONLY).unwrap().upgrades[0].bought = true;
        assert_eq!(phase(&content, &state, ONLY, 0), Some(UpgradePhase::Bought));
    }

    #[test]
    fn unknown_slots_have_no_phase() {
        let content = content();
        let state = GameState::new(&content);
        assert_eq!(phase(&content, &state, ONLY, 7), None);
        assert_eq!(phase(&content, &state, LayerId(3), 0), None);
    }
}
