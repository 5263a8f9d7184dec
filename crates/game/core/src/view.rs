//! Read-only snapshots for the UI boundary.
//!
//! Rendering technology is out of scope here: any frontend polls these
//! snapshots (or refreshes them when the runtime's event bus says a layer
//! changed) and never mutates state directly.

use crate::conversion;
use crate::def::LayerId;
use crate::env::{GameEnv, OracleError};
use crate::gain;
use crate::num::Decimal;
use crate::state::GameState;
use crate::upgrade::{self, UpgradePhase};

/// Snapshot of one upgrade slot.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpgradeSnapshot {
    pub title: String,
    pub description: String,
    pub cost: Decimal,
    pub phase: UpgradePhase,
}

/// Snapshot of one layer's observable state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerSnapshot {
    pub id: LayerId,
    pub slug: String,
    pub name: String,
    pub resource_name: String,
    pub value: Decimal,
    pub best: Decimal,
    pub total: Decimal,
    /// Current passive gain per second, upgrade effects folded in.
    pub rate: Decimal,
    /// What the layer's conversion would currently yield.
    pub conversion_preview: Option<Decimal>,
    pub upgrades: Vec<UpgradeSnapshot>,
}

/// Full read-only view of a game.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameView {
    pub layers: Vec<LayerSnapshot>,
    pub ticks: u64,
    pub time_played: Decimal,
}

impl GameView {
    /// Captures the current state through the environment's oracles.
    pub fn capture(env: &GameEnv<'_>, state: &GameState) -> Result<Self, OracleError> {
        let layers_oracle = env.layers()?;

        let mut layers = Vec::with_capacity(layers_oracle.layer_count());
        for id in layers_oracle.iter_ids() {
            let Some(def) = layers_oracle.layer(id) else {
                continue;
            };
            let Some(layer_state) = state.layer(id) else {
                continue;
            };

            let upgrades = def
                .upgrades
                .iter()
                .enumerate()
                .map(|(index, u)| UpgradeSnapshot {
                    title: u.title.clone(),
                    description: u.description.clone(),
                    cost: u.cost,
                    phase: upgrade::phase(layers_oracle, state, id, index)
                        .unwrap_or(UpgradePhase::Locked),
                })
                .collect();

            layers.push(LayerSnapshot {
                id,
                slug: def.slug.clone(),
                name: def.name.clone(),
                resource_name: def.resource.name.clone(),
                value: layer_state.resource.value(),
                best: layer_state.resource.best(),
                total: layer_state.resource.total(),
                rate: gain::passive_rate(layers_oracle, state, id),
                conversion_preview: conversion::compute_gain(layers_oracle, state, id),
                upgrades,
            });
        }

        Ok(Self {
            layers,
            ticks: state.clock.ticks,
            time_played: state.clock.time_played,
        })
    }

    pub fn layer(&self, slug: &str) -> Option<&LayerSnapshot> {
        self.layers.iter().find(|layer| layer.slug == slug)
    }
}
