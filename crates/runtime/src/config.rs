//! Runtime tunables.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Driver and persistence parameters, loadable alongside the game config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Milliseconds between driver ticks.
    pub tick_interval_ms: u64,
    /// Cap on offline catch-up; wall time beyond this is forfeited.
    pub max_offline_seconds: u64,
    /// Fraction of capped offline time actually credited (0..=1).
    pub offline_efficiency: Decimal,
}

impl RuntimeConfig {
    pub const DEFAULT_TICK_INTERVAL_MS: u64 = 50;
    /// Eight hours.
    pub const DEFAULT_MAX_OFFLINE_SECONDS: u64 = 8 * 60 * 60;

    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: Self::DEFAULT_TICK_INTERVAL_MS,
            max_offline_seconds: Self::DEFAULT_MAX_OFFLINE_SECONDS,
            offline_efficiency: Decimal::ONE,
        }
    }
}
