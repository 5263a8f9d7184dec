//! Conversion of a base resource into a layer's own resource.

use crate::action::ActionTransition;
use crate::conversion;
use crate::def::{ConversionKind, LayerId};
use crate::env::GameEnv;
use crate::state::GameState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("layer oracle not available")]
    MissingContent,

    #[error("layer {0} not found")]
    UnknownLayer(LayerId),

    #[error("layer {0} has no conversion")]
    NoConversion(LayerId),
}

/// Applies a layer's conversion at the current base value.
///
/// Cumulative conversions add the gain on top of what is already there;
/// replacing conversions keep the larger of gain and current value. The
/// base resource is not consumed here — resetting it is the reset action's
/// job, which is why the reset button issues both.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvertAction {
    pub layer: LayerId,
}

impl ConvertAction {
    pub fn new(layer: LayerId) -> Self {
        Self { layer }
    }
}

impl ActionTransition for ConvertAction {
    type Error = ConvertError;

    fn pre_validate(&self, _state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let layers = env.layers().map_err(|_| ConvertError::MissingContent)?;
        let def = layers
            .layer(self.layer)
            .ok_or(ConvertError::UnknownLayer(self.layer))?;
        if def.conversion.is_none() {
            return Err(ConvertError::NoConversion(self.layer));
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let layers = env.layers().map_err(|_| ConvertError::MissingContent)?;
        let def = layers
            .layer(self.layer)
            .ok_or(ConvertError::UnknownLayer(self.layer))?;
        let kind = def
            .conversion
            .as_ref()
            .map(|c| c.kind)
            .ok_or(ConvertError::NoConversion(self.layer))?;

        let gain = conversion::compute_gain(layers, state, self.layer)
            .ok_or(ConvertError::NoConversion(self.layer))?;

        let layer_state = state
            .layer_mut(self.layer)
            .ok_or(ConvertError::UnknownLayer(self.layer))?;
        match kind {
            ConversionKind::Cumulative => layer_state.resource.add_gain(gain),
            ConversionKind::Replacing => {
                if gain > layer_state.resource.value() {
                    layer_state.resource.set_value(gain);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::def::{Content, ConversionDef, LayerDef, TreeDef};
    use crate::engine::ProgressionEngine;
    use crate::formula::Formula;
    use crate::{Action, ExecuteError, GameConfig, GameState};
    use rust_decimal_macros::dec;

    const BASE: LayerId = LayerId(0);
    const GAIN: LayerId = LayerId(1);

    fn content(kind: ConversionKind) -> Content {
        let base = LayerDef::new(BASE, "base", "Base");
        let mut gain = LayerDef::new(GAIN, "gain", "Gain");
        gain.conversion = Some(ConversionDef {
            formula: Formula::DivThenSqrt { divisor: dec!(10) },
            base: BASE,
            kind,
        });
        Content::new(
            vec![base, gain],
            TreeDef::new(vec![vec![GAIN]], vec![]),
            GameConfig::default(),
        )
        .unwrap()
    }

    fn convert(content: &Content, state: &mut GameState) -> Result<(), ExecuteError> {
        let mut engine = ProgressionEngine::new(state);
        engine
            .execute(content.env(), &Action::Convert(ConvertAction::new(GAIN)))
            .map(|_| ())
    }

    #[test]
    fn cumulative_conversion_stacks() {
        let content = content(ConversionKind::Cumulative);
        let mut state = GameState::new(&content);
        state.layer_mut(BASE).unwrap().resource.set_value(dec!(90));

        convert(&content, &mut state).unwrap();
        convert(&content, &mut state).unwrap();
        assert_eq!(state.layer(GAIN).unwrap().resource.value(), dec!(6));
    }

    #[test]
    fn replacing_conversion_keeps_the_larger() {
        let content = content(ConversionKind::Replacing);
        let mut state = GameState::new(&content);
        state.layer_mut(GAIN).unwrap().resource.set_value(dec!(5));
        state.layer_mut(BASE).unwrap().resource.set_value(dec!(90));

        convert(&content, &mut state).unwrap();
        assert_eq!(state.layer(GAIN).unwrap().resource.value(), dec!(5));

        state.layer_mut(BASE).unwrap().resource.set_value(dec!(1000));
        convert(&content, &mut state).unwrap();
        assert_eq!(state.layer(GAIN).unwrap().resource.value(), dec!(10));
    }

    #[test]
    fn layers_without_conversion_reject() {
        let content = content(ConversionKind::Cumulative);
        let mut state = GameState::new(&content);
        let mut engine = ProgressionEngine::new(&mut state);
        let err = engine
            .execute(content.env(), &Action::Convert(ConvertAction::new(BASE)))
            .unwrap_err();
        assert!(matches!(err, ExecuteError::Convert(_)));
    }
}
