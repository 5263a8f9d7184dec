//! Game configuration constants and tunable parameters.

use crate::def::CostPolicy;

/// Tunable rule parameters, loadable from data files.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Cost policy applied to upgrades that do not declare their own.
    pub default_cost_policy: CostPolicy,
}

impl GameConfig {
    /// Upper bound on layers per game; [`crate::def::LayerId`] is a u16.
    pub const MAX_LAYERS: usize = u16::MAX as usize;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cost_policy(default_cost_policy: CostPolicy) -> Self {
        Self {
            default_cost_policy,
        }
    }
}
