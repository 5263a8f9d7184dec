//! Action execution pipeline.
//!
//! [`ProgressionEngine`] is the authoritative reducer for
//! [`GameState`]: every mutation — ticks, purchases, conversions, resets —
//! flows through the same pre_validate → apply → post_validate pipeline
//! and reports its observable impact as a [`StateDelta`].

mod errors;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

use crate::action::{Action, ActionTransition};
use crate::env::GameEnv;
use crate::state::{GameState, StateDelta};

/// Complete outcome of action execution.
#[derive(Clone, Debug, PartialEq)]
pub struct ExecutionOutcome {
    /// State change metadata (which fields changed).
    pub delta: StateDelta,
}

/// Progression engine that routes actions through their transitions.
///
/// Transitions are atomic from the caller's perspective: a failure in any
/// phase restores the pre-action state, so observers never see a partial
/// cascade or a half-applied purchase.
pub struct ProgressionEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> ProgressionEngine<'a> {
    /// Creates a new engine over the given state.
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    /// Executes an action by routing it through its transition pipeline.
    ///
    /// Returns an [`ExecutionOutcome`] whose delta captures every field
    /// the action changed; the runtime publishes events from it.
    pub fn execute(
        &mut self,
        env: GameEnv<'_>,
        action: &Action,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        let before = self.state.clone();

        let result = match action {
            Action::Tick(tick) => run(tick, self.state, &env).map_err(ExecuteError::Tick),
            Action::Purchase(purchase) => {
                run(purchase, self.state, &env).map_err(ExecuteError::Purchase)
            }
            Action::Convert(convert) => {
                run(convert, self.state, &env).map_err(ExecuteError::Convert)
            }
            Action::Reset(reset) => run(reset, self.state, &env).map_err(ExecuteError::Reset),
        };

        if let Err(error) = result {
            *self.state = before;
            return Err(error);
        }

        Ok(ExecutionOutcome {
            delta: StateDelta::from_states(action.clone(), &before, self.state),
        })
    }
}

fn run<T: ActionTransition>(
    action: &T,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<(), TransitionPhaseError<T::Error>> {
    action
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;
    action
        .apply(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;
    action
        .post_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{PurchaseAction, TickAction};
    use crate::def::{Content, LayerDef, LayerId, TreeDef};
    use crate::state::ResourceFields;
    use crate::{GameConfig, GameState};
    use rust_decimal_macros::dec;

    const MAIN: LayerId = LayerId(0);

    fn content() -> Content {
        let mut main = LayerDef::new(MAIN, "main", "Main");
        main.starting_value = dec!(10);
        main.base_rate = dec!(5);
        Content::new(vec![main], TreeDef::default(), GameConfig::default()).unwrap()
    }

    #[test]
    fn outcome_delta_lists_changed_fields() {
        let content = content();
        let mut state = GameState::new(&content);
        let mut engine = ProgressionEngine::new(&mut state);

        let outcome = engine
            .execute(
                content.env(),
                &Action::Tick(TickAction::new(dec!(1))),
            )
            .unwrap();

        assert_eq!(outcome.delta.layers.len(), 1);
        let changes = &outcome.delta.layers[0];
        assert_eq!(changes.layer, MAIN);
        assert!(changes.resource.contains(ResourceFields::VALUE));
        assert!(changes.resource.contains(ResourceFields::BEST));
        assert!(changes.resource.contains(ResourceFields::TOTAL));
    }

    #[test]
    fn failed_actions_leave_state_untouched() {
        let content = content();
        let mut state = GameState::new(&content);
        let snapshot = state.clone();
        let mut engine = ProgressionEngine::new(&mut state);

        let err = engine
            .execute(
                content.env(),
                &Action::Purchase(PurchaseAction::new(LayerId(9), 0)),
            )
            .unwrap_err();
        assert!(matches!(err, ExecuteError::Purchase(_)));
        assert_eq!(state, snapshot);
    }

    #[test]
    fn zero_delta_tick_still_reports_clock_change() {
        let content = content();
        let mut state = GameState::new(&content);
        let mut engine = ProgressionEngine::new(&mut state);

        let outcome = engine
            .execute(content.env(), &Action::Tick(TickAction::new(dec!(0))))
            .unwrap();
        assert!(!outcome.delta.is_empty());
        assert!(outcome.delta.layers.is_empty());
    }
}
