//! Authoritative mutable game state.
//!
//! This module owns the per-layer progress (resource amounts, bought
//! upgrades) and clock bookkeeping. Runtime layers clone or query this
//! state but mutate it exclusively through the engine.

mod delta;
mod resource;

pub use delta::{ClockFields, LayerChanges, ResourceFields, StateDelta};
pub use resource::Resource;

use crate::def::LayerId;
use crate::env::LayerOracle;
use crate::num::Decimal;

/// Purchase state of a single upgrade slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpgradeState {
    pub bought: bool,
}

/// Mutable progress of one layer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerState {
    pub resource: Resource,
    /// One slot per declared upgrade, same order as the definition.
    pub upgrades: Vec<UpgradeState>,
}

impl LayerState {
    pub fn bought(&self, index: usize) -> bool {
        self.upgrades.get(index).is_some_and(|u| u.bought)
    }
}

/// Simulation clock bookkeeping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClockState {
    /// Ticks executed this session plus any restored from a save.
    pub ticks: u64,
    /// Integrated delta time in seconds (scaled time, not wall clock).
    pub time_played: Decimal,
}

/// Canonical snapshot of all mutable progress.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Indexed by [`LayerId`]; same order as the layer definitions.
    layers: Vec<LayerState>,
    pub clock: ClockState,
}

impl GameState {
    /// A fresh game: every resource at its starting value, nothing bought.
    pub fn new<L: LayerOracle + ?Sized>(layers: &L) -> Self {
        let layers = layers
            .iter_ids()
            .filter_map(|id| layers.layer(id))
            .map(|def| LayerState {
                resource: Resource::new(def.starting_value),
                upgrades: vec![UpgradeState::default(); def.upgrades.len()],
            })
            .collect();
        Self {
            layers,
            clock: ClockState::default(),
        }
    }

    /// Rebuilds state from restored parts; the caller (persistence) is
    /// responsible for matching the layer order to the content.
    pub fn from_parts(layers: Vec<LayerState>, clock: ClockState) -> Self {
        Self { layers, clock }
    }

    pub fn layer(&self, id: LayerId) -> Option<&LayerState> {
        self.layers.get(id.index())
    }

    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut LayerState> {
        self.layers.get_mut(id.index())
    }

    pub fn layers(&self) -> &[LayerState] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}
