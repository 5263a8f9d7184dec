//! Deterministic progression rules shared across the runtime and tools.
//!
//! `crumbs-core` defines the canonical rules of the incremental game:
//! resources, gain formulas, conversions, upgrades, and the layer tree with
//! its reset propagation. All state mutation flows through
//! [`engine::ProgressionEngine`]; supporting crates depend on the types
//! re-exported here and observe state only through [`state::StateDelta`] and
//! [`view::GameView`].
pub mod action;
pub mod config;
pub mod conversion;
pub mod def;
pub mod engine;
pub mod env;
pub mod formula;
pub mod gain;
pub mod num;
pub mod state;
pub mod upgrade;
pub mod view;

pub use action::{
    Action, ConvertAction, ConvertError, PurchaseAction, PurchaseError, ResetAction, ResetError,
    TickAction, TickError,
};
pub use config::GameConfig;
pub use def::{
    Branch, Content, ContentError, ConversionDef, ConversionKind, CostPolicy, EffectDef, LayerDef,
    LayerId, ResetParticipation, ResetPolicy, ResetPropagation, ResourceDef, Rounding, TreeDef,
    UpgradeDef,
};
pub use engine::{ExecuteError, ExecutionOutcome, ProgressionEngine, TransitionPhase};
pub use env::{ConfigOracle, Env, GameEnv, LayerOracle, OracleError, TreeOracle};
pub use formula::{Formula, FormulaError};
pub use num::Decimal;
pub use state::{ClockState, GameState, LayerState, Resource, StateDelta, UpgradeState};
pub use upgrade::UpgradePhase;
pub use view::{GameView, LayerSnapshot, UpgradeSnapshot};
