//! Action domain: every state mutation as a validated transition.
//!
//! Four actions cover the whole command surface — the per-frame tick, an
//! upgrade purchase, a conversion, and a layer reset. Each one implements
//! [`ActionTransition`] so the engine can route them through the same
//! pre_validate → apply → post_validate pipeline.

mod convert;
mod purchase;
mod reset;
mod tick;

pub use convert::{ConvertAction, ConvertError};
pub use purchase::{PurchaseAction, PurchaseError};
pub use reset::{ResetAction, ResetError};
pub use tick::{TickAction, TickError};

use crate::env::GameEnv;
use crate::state::GameState;

/// Defines how a concrete action variant mutates game state.
///
/// Implementors can override the validation hooks to surface pre- and
/// post-conditions that must hold around the state mutation. All hooks
/// receive read-only access to content facts via the environment and must
/// stay side-effect free.
pub trait ActionTransition {
    type Error;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action by mutating the game state directly.
    /// Implementations should assume that `pre_validate` has already run
    /// successfully.
    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<(), Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Top-level action enum routed by the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Tick(TickAction),
    Purchase(PurchaseAction),
    Convert(ConvertAction),
    Reset(ResetAction),
}

impl Action {
    /// Snake_case tag for logging and event routing.
    pub fn as_snake_case(&self) -> &'static str {
        match self {
            Action::Tick(_) => "tick",
            Action::Purchase(_) => "purchase",
            Action::Convert(_) => "convert",
            Action::Reset(_) => "reset",
        }
    }
}

impl From<TickAction> for Action {
    fn from(action: TickAction) -> Self {
        Self::Tick(action)
    }
}

impl From<PurchaseAction> for Action {
    fn from(action: PurchaseAction) -> Self {
        Self::Purchase(action)
    }
}

impl From<ConvertAction> for Action {
    fn from(action: ConvertAction) -> Self {
        Self::Convert(action)
    }
}

impl From<ResetAction> for Action {
    fn from(action: ResetAction) -> Self {
        Self::Reset(action)
    }
}
