//! Upgrade purchase.

use crate::action::ActionTransition;
use crate::def::{CostPolicy, EffectDef, LayerId};
use crate::env::GameEnv;
use crate::num::Decimal;
use crate::state::GameState;
use crate::upgrade::{self, UpgradePhase};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum PurchaseError {
    #[error("layer oracle not available")]
    MissingContent,

    #[error("layer {0} not found")]
    UnknownLayer(LayerId),

    #[error("layer {layer} has no upgrade {index}")]
    UnknownUpgrade { layer: LayerId, index: usize },

    #[error("upgrade {index} on layer {layer} is already bought")]
    AlreadyBought { layer: LayerId, index: usize },

    #[error("insufficient resource: need {needed}, have {available}")]
    InsufficientResource { needed: Decimal, available: Decimal },

    #[error("cost resource on layer {layer} went negative after purchase")]
    NegativeBalance { layer: LayerId },
}

/// Buys one upgrade slot. All-or-nothing: a failed attempt leaves both the
/// bought flag and the cost resource untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PurchaseAction {
    pub layer: LayerId,
    pub index: usize,
}

impl PurchaseAction {
    pub fn new(layer: LayerId, index: usize) -> Self {
        Self { layer, index }
    }
}

impl ActionTransition for PurchaseAction {
    type Error = PurchaseError;

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let layers = env.layers().map_err(|_| PurchaseError::MissingContent)?;
        let def = layers
            .layer(self.layer)
            .ok_or(PurchaseError::UnknownLayer(self.layer))?;
        let upgrade = def
            .upgrades
            .get(self.index)
            .ok_or(PurchaseError::UnknownUpgrade {
                layer: self.layer,
                index: self.index,
            })?;

        match upgrade::phase(layers, state, self.layer, self.index) {
            Some(UpgradePhase::Affordable) => Ok(()),
            Some(UpgradePhase::Bought) => Err(PurchaseError::AlreadyBought {
                layer: self.layer,
                index: self.index,
            }),
            Some(UpgradePhase::Locked) => {
                let available = state
                    .layer(upgrade.cost_layer)
                    .map(|l| l.resource.value())
                    .unwrap_or_default();
                Err(PurchaseError::InsufficientResource {
                    needed: upgrade.cost,
                    available,
                })
            }
            None => Err(PurchaseError::UnknownUpgrade {
                layer: self.layer,
                index: self.index,
            }),
        }
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let layers = env.layers().map_err(|_| PurchaseError::MissingContent)?;
        let def = layers
            .layer(self.layer)
            .ok_or(PurchaseError::UnknownLayer(self.layer))?;
        let upgrade = def
            .upgrades
            .get(self.index)
            .ok_or(PurchaseError::UnknownUpgrade {
                layer: self.layer,
                index: self.index,
            })?;

        let policy = upgrade.cost_policy.unwrap_or(
            env.config()
                .map(|c| c.game_config().default_cost_policy)
                .unwrap_or_default(),
        );

        // Deduction goes through add_gain so best/total stay untouched:
        // spending is not un-earning.
        if policy == CostPolicy::Deduct {
            let cost_state = state
                .layer_mut(upgrade.cost_layer)
                .ok_or(PurchaseError::UnknownLayer(upgrade.cost_layer))?;
            cost_state.resource.add_gain(-upgrade.cost);
        }

        let layer_state = state
            .layer_mut(self.layer)
            .ok_or(PurchaseError::UnknownLayer(self.layer))?;
        layer_state.upgrades[self.index].bought = true;

        if let EffectDef::GrantOnPurchase { target, amount } = upgrade.effect {
            if let Some(target_state) = state.layer_mut(target) {
                target_state.resource.add_gain(amount);
            }
        }

        Ok(())
    }

    fn post_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let layers = env.layers().map_err(|_| PurchaseError::MissingContent)?;
        let Some(def) = layers.layer(self.layer) else {
            return Err(PurchaseError::UnknownLayer(self.layer));
        };
        let Some(upgrade) = def.upgrades.get(self.index) else {
            return Err(PurchaseError::UnknownUpgrade {
                layer: self.layer,
                index: self.index,
            });
        };

        let cost_layer = layers
            .layer(upgrade.cost_layer)
            .ok_or(PurchaseError::UnknownLayer(upgrade.cost_layer))?;
        if !cost_layer.resource.allow_negative {
            let value = state
                .layer(upgrade.cost_layer)
                .map(|l| l.resource.value())
                .unwrap_or_default();
            if value.is_sign_negative() {
                return Err(PurchaseError::NegativeBalance {
                    layer: upgrade.cost_layer,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::def::{Content, LayerDef, TreeDef, UpgradeDef};
    use crate::engine::ProgressionEngine;
    use crate::{Action, ExecuteError, GameConfig, GameState};
    use rust_decimal_macros::dec;

    const MAIN: LayerId = LayerId(0);
    const SIDE: LayerId = LayerId(1);

    fn content(policy: Option<CostPolicy>) -> Content {
        let mut main = LayerDef::new(MAIN, "main", "Main");
        main.upgrades.push(UpgradeDef {
            title: "Faster".into(),
            description: String::new(),
            cost: dec!(5),
            cost_layer: MAIN,
            cost_policy: policy,
            effect: EffectDef::RateMultiply {
                target: MAIN,
                factor: dec!(2),
            },
        });
        main.upgrades.push(UpgradeDef {
            title: "Mastery".into(),
            description: String::new(),
            cost: dec!(10),
            cost_layer: MAIN,
            cost_policy: policy,
            effect: EffectDef::GrantOnPurchase {
                target: SIDE,
                amount: dec!(1),
            },
        });
        let side = LayerDef::new(SIDE, "side", "Side");
        Content::new(vec![main, side], TreeDef::default(), GameConfig::default()).unwrap()
    }

    fn buy(
        content: &Content,
        state: &mut GameState,
        index: usize,
    ) -> Result<(), ExecuteError> {
        let mut engine = ProgressionEngine::new(state);
        engine
            .execute(
                content.env(),
                &Action::Purchase(PurchaseAction::new(MAIN, index)),
            )
            .map(|_| ())
    }

    #[test]
    fn failed_purchase_changes_nothing() {
        let content = content(None);
        let mut state = GameState::new(&content);
        state.layer_mut(MAIN).unwrap().resource.set_value(dec!(4));

        let err = buy(&content, &mut state, 0).unwrap_err();
        assert!(matches!(err, ExecuteError::Purchase(_)));
        assert_eq!(state.layer(MAIN).unwrap().resource.value(), dec!(4));
        assert!(!state.layer(MAIN).unwrap().bought(0));
    }

    #[test]
    fn purchase_deducts_cost_and_sets_bought() {
        let content = content(None);
        let mut state = GameState::new(&content);
        state.layer_mut(MAIN).unwrap().resource.set_value(dec!(7));

        buy(&content, &mut state, 0).unwrap();

        let resource = &state.layer(MAIN).unwrap().resource;
        assert_eq!(resource.value(), dec!(2));
        assert_eq!(resource.best(), dec!(7));
        assert!(state.layer(MAIN).unwrap().bought(0));
    }

    #[test]
    fn bought_is_terminal() {
        let content = content(None);
        let mut state = GameState::new(&content);
        state.layer_mut(MAIN).unwrap().resource.set_value(dec!(20));

        buy(&content, &mut state, 0).unwrap();
        let err = buy(&content, &mut state, 0).unwrap_err();
        assert!(matches!(err, ExecuteError::Purchase(_)));
        assert!(state.layer(MAIN).unwrap().bought(0));
    }

    #[test]
    fn gate_only_policy_leaves_the_resource() {
        let content = content(Some(CostPolicy::GateOnly));
        let mut state = GameState::new(&content);
        state.layer_mut(MAIN).unwrap().resource.set_value(dec!(7));

        buy(&content, &mut state, 0).unwrap();
        assert_eq!(state.layer(MAIN).unwrap().resource.value(), dec!(7));
        assert!(state.layer(MAIN).unwrap().bought(0));
    }

    #[test]
    fn grant_effects_pay_out_once_at_purchase() {
        let content = content(None);
        let mut state = GameState::new(&content);
        state.layer_mut(MAIN).unwrap().resource.set_value(dec!(10));

        buy(&content, &mut state, 1).unwrap();
        assert_eq!(state.layer(SIDE).unwrap().resource.value(), dec!(1));
        assert_eq!(state.layer(MAIN).unwrap().resource.value(), dec!(0));
    }
}
