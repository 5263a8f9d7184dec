//! Layer reset with branched propagation.

use crate::action::ActionTransition;
use crate::def::{
    LayerId, ResetParticipation, ResetPropagation, reachable_from,
};
use crate::env::GameEnv;
use crate::num::Decimal;
use crate::state::GameState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResetError {
    #[error("layer oracle not available")]
    MissingContent,

    #[error("tree oracle not available")]
    MissingTree,

    #[error("layer {0} not found")]
    UnknownLayer(LayerId),
}

/// Resets a layer and cascades over the tree's branch edges.
///
/// The affected set is: the triggering layer, every layer reachable from
/// it over declared branch edges (when propagation is `Branched`), and
/// every layer whose reset policy participates in all resets. Each
/// affected layer returns to the baseline its policy picks for the way it
/// was reached, and its upgrades revert to unbought.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResetAction {
    pub layer: LayerId,
}

impl ResetAction {
    pub fn new(layer: LayerId) -> Self {
        Self { layer }
    }

    fn affected(&self, env: &GameEnv<'_>) -> Result<Vec<LayerId>, ResetError> {
        let layers = env.layers().map_err(|_| ResetError::MissingContent)?;
        let tree = env.tree().map_err(|_| ResetError::MissingTree)?;

        let mut affected = vec![self.layer];
        if tree.propagation() == ResetPropagation::Branched {
            for id in reachable_from(tree.branches(), self.layer, layers.layer_count()) {
                if !affected.contains(&id) {
                    affected.push(id);
                }
            }
        }
        for id in layers.iter_ids() {
            let Some(def) = layers.layer(id) else {
                continue;
            };
            if def.reset.participation == ResetParticipation::Always && !affected.contains(&id) {
                affected.push(id);
            }
        }
        Ok(affected)
    }
}

impl ActionTransition for ResetAction {
    type Error = ResetError;

    fn pre_validate(&self, _state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let layers = env.layers().map_err(|_| ResetError::MissingContent)?;
        env.tree().map_err(|_| ResetError::MissingTree)?;
        layers
            .layer(self.layer)
            .ok_or(ResetError::UnknownLayer(self.layer))?;
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let layers = env.layers().map_err(|_| ResetError::MissingContent)?;

        // The trigger's conversion base was just consumed by the prestige;
        // its baseline differs from an ordinary cascade sweep.
        let drained = layers
            .layer(self.layer)
            .and_then(|def| def.conversion.as_ref())
            .map(|conversion| conversion.base);

        for id in self.affected(env)? {
            let Some(def) = layers.layer(id) else {
                continue;
            };
            let baseline: Decimal = if id == self.layer {
                def.reset.on_self
            } else if Some(id) == drained {
                def.reset.on_drain
            } else {
                def.reset.on_cascade
            };

            let Some(layer_state) = state.layer_mut(id) else {
                continue;
            };
            if def.reset.reset_records {
                layer_state.resource.reset_all(baseline);
            } else {
                layer_state.resource.set_value(baseline);
            }
            for upgrade in &mut layer_state.upgrades {
                upgrade.bought = false;
            }
        }
        Ok(())
    }
}
