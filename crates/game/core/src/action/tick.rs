//! Per-frame time integration.

use crate::action::ActionTransition;
use crate::env::GameEnv;
use crate::gain;
use crate::num::Decimal;
use crate::state::GameState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TickError {
    #[error("layer oracle not available")]
    MissingContent,

    #[error("negative tick delta {delta}")]
    NegativeDelta { delta: Decimal },
}

/// One simulation step over an externally supplied time delta.
///
/// The delta is an opaque non-negative multiplier: zero while paused,
/// scaled under dev speed, possibly large after an offline catch-up. The
/// core makes no wall-clock assumptions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickAction {
    /// Elapsed scaled time in seconds.
    pub delta: Decimal,
}

impl TickAction {
    pub fn new(delta: Decimal) -> Self {
        Self { delta }
    }
}

impl ActionTransition for TickAction {
    type Error = TickError;

    fn pre_validate(&self, _state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        env.layers().map_err(|_| TickError::MissingContent)?;
        if self.delta.is_sign_negative() {
            return Err(TickError::NegativeDelta { delta: self.delta });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let layers = env.layers().map_err(|_| TickError::MissingContent)?;

        state.clock.ticks += 1;
        state.clock.time_played = state.clock.time_played.saturating_add(self.delta);

        for id in layers.iter_ids() {
            let rate = gain::passive_rate(layers, state, id);
            if rate.is_zero() {
                continue;
            }
            let Some(def) = layers.layer(id) else {
                continue;
            };
            let allow_negative = def.resource.allow_negative;
            if let Some(layer_state) = state.layer_mut(id) {
                layer_state.resource.add_gain(rate.saturating_mul(self.delta));
                if !allow_negative && layer_state.resource.value().is_sign_negative() {
                    layer_state.resource.set_value(Decimal::ZERO);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::def::{Content, LayerDef, LayerId, TreeDef};
    use crate::engine::ProgressionEngine;
    use crate::{Action, GameConfig, GameState};
    use rust_decimal_macros::dec;

    const MAIN: LayerId = LayerId(0);

    fn content(base_rate: Decimal) -> Content {
        let mut main = LayerDef::new(MAIN, "main", "Main");
        main.starting_value = dec!(10);
        main.base_rate = base_rate;
        Content::new(vec![main], TreeDef::default(), GameConfig::default()).unwrap()
    }

    #[test]
    fn zero_rate_leaves_the_resource_alone() {
        let content = content(dec!(0));
        let mut state = GameState::new(&content);
        let mut engine = ProgressionEngine::new(&mut state);
        engine
            .execute(content.env(), &Action::Tick(TickAction::new(dec!(1))))
            .unwrap();
        assert_eq!(state.layer(MAIN).unwrap().resource.value(), dec!(10));
    }

    #[test]
    fn gain_integrates_rate_times_delta() {
        let content = content(dec!(5));
        let mut state = GameState::new(&content);
        let mut engine = ProgressionEngine::new(&mut state);
        engine
            .execute(content.env(), &Action::Tick(TickAction::new(dec!(1))))
            .unwrap();

        let resource = &state.layer(MAIN).unwrap().resource;
        assert_eq!(resource.value(), dec!(15));
        assert_eq!(resource.best(), dec!(15));
        assert!(resource.total() >= dec!(5));
    }

    #[test]
    fn zero_delta_is_a_valid_paused_tick() {
        let content = content(dec!(5));
        let mut state = GameState::new(&content);
        let mut engine = ProgressionEngine::new(&mut state);
        engine
            .execute(content.env(), &Action::Tick(TickAction::new(dec!(0))))
            .unwrap();
        assert_eq!(state.layer(MAIN).unwrap().resource.value(), dec!(10));
        assert_eq!(state.clock.ticks, 1);
    }

    #[test]
    fn negative_delta_is_rejected() {
        let content = content(dec!(5));
        let mut state = GameState::new(&content);
        let mut engine = ProgressionEngine::new(&mut state);
        let err = engine
            .execute(content.env(), &Action::Tick(TickAction::new(dec!(-1))))
            .unwrap_err();
        assert!(matches!(err, crate::ExecuteError::Tick(_)));
        assert_eq!(state.clock.ticks, 0);
    }

    #[test]
    fn decay_clamps_at_zero_unless_allowed() {
        let mut main = LayerDef::new(MAIN, "main", "Main");
        main.starting_value = dec!(1);
        main.base_rate = dec!(-5);
        let content =
            Content::new(vec![main], TreeDef::default(), GameConfig::default()).unwrap();

        let mut state = GameState::new(&content);
        let mut engine = ProgressionEngine::new(&mut state);
        engine
            .execute(content.env(), &Action::Tick(TickAction::new(dec!(1))))
            .unwrap();
        assert_eq!(state.layer(MAIN).unwrap().resource.value(), dec!(0));
    }
}
