//! Bitmask-based change tracking for executed actions.
//!
//! A delta captures *which* fields changed, not their values: consumers
//! that need the numbers read them from the post-action state. This keeps
//! the publish step cheap while still letting observers skip layers they
//! do not care about.

use bitflags::bitflags;

use crate::action::Action;
use crate::def::LayerId;
use crate::state::{GameState, LayerState};

bitflags! {
    /// Tracks which fields of a [`crate::state::Resource`] changed.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ResourceFields: u8 {
        const VALUE = 1 << 0;
        const BEST  = 1 << 1;
        const TOTAL = 1 << 2;
    }
}

bitflags! {
    /// Tracks which fields of [`crate::state::ClockState`] changed.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ClockFields: u8 {
        const TICKS       = 1 << 0;
        const TIME_PLAYED = 1 << 1;
    }
}

/// Changes observed on a single layer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerChanges {
    pub layer: LayerId,
    pub resource: ResourceFields,
    /// Indices of upgrades whose bought flag flipped.
    pub upgrades: Vec<usize>,
}

impl LayerChanges {
    fn from_states(layer: LayerId, before: &LayerState, after: &LayerState) -> Option<Self> {
        let mut resource = ResourceFields::empty();
        if before.resource.value() != after.resource.value() {
            resource |= ResourceFields::VALUE;
        }
        if before.resource.best() != after.resource.best() {
            resource |= ResourceFields::BEST;
        }
        if before.resource.total() != after.resource.total() {
            resource |= ResourceFields::TOTAL;
        }

        let upgrades: Vec<usize> = before
            .upgrades
            .iter()
            .zip(&after.upgrades)
            .enumerate()
            .filter(|(_, (b, a))| b.bought != a.bought)
            .map(|(index, _)| index)
            .collect();

        if resource.is_empty() && upgrades.is_empty() {
            return None;
        }
        Some(Self {
            layer,
            resource,
            upgrades,
        })
    }
}

/// Minimal description of an executed action's impact on game state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateDelta {
    /// The action that caused this transition.
    pub action: Action,
    pub clock: ClockFields,
    /// Only layers with at least one changed field appear here.
    pub layers: Vec<LayerChanges>,
}

impl StateDelta {
    /// Creates a delta by field-by-field comparison of two states.
    pub fn from_states(action: Action, before: &GameState, after: &GameState) -> Self {
        let mut clock = ClockFields::empty();
        if before.clock.ticks != after.clock.ticks {
            clock |= ClockFields::TICKS;
        }
        if before.clock.time_played != after.clock.time_played {
            clock |= ClockFields::TIME_PLAYED;
        }

        let layers = before
            .layers()
            .iter()
            .zip(after.layers())
            .enumerate()
            .filter_map(|(index, (b, a))| {
                LayerChanges::from_states(LayerId(index as u16), b, a)
            })
            .collect();

        Self {
            action,
            clock,
            layers,
        }
    }

    /// True if the action was a no-op on observable state.
    pub fn is_empty(&self) -> bool {
        self.clock.is_empty() && self.layers.is_empty()
    }

    /// The layers an observer should refresh.
    pub fn changed_layers(&self) -> impl Iterator<Item = LayerId> + '_ {
        self.layers.iter().map(|change| change.layer)
    }
}
