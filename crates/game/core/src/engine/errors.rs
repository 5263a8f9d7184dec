//! Error types for the action execution pipeline.

use crate::action::{
    ActionTransition, ConvertAction, PurchaseAction, ResetAction, TickAction,
};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while executing an action through the engine.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ExecuteError {
    #[error("tick failed: {0}")]
    Tick(TransitionPhaseError<<TickAction as ActionTransition>::Error>),

    #[error("purchase failed: {0}")]
    Purchase(TransitionPhaseError<<PurchaseAction as ActionTransition>::Error>),

    #[error("conversion failed: {0}")]
    Convert(TransitionPhaseError<<ConvertAction as ActionTransition>::Error>),

    #[error("reset failed: {0}")]
    Reset(TransitionPhaseError<<ResetAction as ActionTransition>::Error>),
}
