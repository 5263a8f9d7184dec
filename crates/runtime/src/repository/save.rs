//! The save format: a flat, tolerant field mapping.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use crumbs_core::{
    ClockState, Content, GameState, LayerDef, LayerOracle, LayerState, Resource, UpgradeState,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Current save format version. Bump when the mapping changes shape and
/// add a [`super::SaveMigration`] for the old one.
pub const SAVE_VERSION: &str = "1";

/// Serialized progress: `layer-slug → field → value`, all values strings.
///
/// Fields per layer: `value`, `best`, `total`, and `upgrade_<n>` for each
/// bought slot. Decoding tolerates missing layers and fields (content
/// defaults apply) and ignores fields it does not know.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub version: String,
    pub saved_at: DateTime<Utc>,
    pub layers: BTreeMap<String, BTreeMap<String, String>>,
    pub clock: BTreeMap<String, String>,
}

impl SaveData {
    /// Flattens live state into the save mapping.
    pub fn encode(content: &Content, state: &GameState, saved_at: DateTime<Utc>) -> Self {
        let mut layers = BTreeMap::new();
        for def in content.layers() {
            let Some(layer_state) = state.layer(def.id) else {
                continue;
            };
            let mut fields = BTreeMap::new();
            fields.insert("value".into(), layer_state.resource.value().to_string());
            fields.insert("best".into(), layer_state.resource.best().to_string());
            fields.insert("total".into(), layer_state.resource.total().to_string());
            for (index, upgrade) in layer_state.upgrades.iter().enumerate() {
                if upgrade.bought {
                    fields.insert(format!("upgrade_{index}"), "true".into());
                }
            }
            layers.insert(def.slug.clone(), fields);
        }

        let mut clock = BTreeMap::new();
        clock.insert("ticks".into(), state.clock.ticks.to_string());
        clock.insert("time_played".into(), state.clock.time_played.to_string());

        Self {
            version: SAVE_VERSION.into(),
            saved_at,
            layers,
            clock,
        }
    }

    /// Rebuilds state against the given content, defaulting anything the
    /// save does not carry.
    pub fn decode(&self, content: &Content) -> GameState {
        let layers = content
            .iter_ids()
            .filter_map(|id| content.layer(id))
            .map(|def| self.decode_layer(def))
            .collect();

        let clock = ClockState {
            ticks: self
                .clock
                .get("ticks")
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(0),
            time_played: self
                .clock
                .get("time_played")
                .and_then(|raw| Decimal::from_str(raw).ok())
                .unwrap_or_default(),
        };

        GameState::from_parts(layers, clock)
    }

    fn decode_layer(&self, def: &LayerDef) -> LayerState {
        let fields = self.layers.get(&def.slug);
        let decimal = |name: &str, fallback: Decimal| {
            fields
                .and_then(|f| f.get(name))
                .and_then(|raw| {
                    Decimal::from_str(raw)
                        .inspect_err(|_| {
                            tracing::warn!(layer = %def.slug, field = name, %raw,
                                "unparseable save field, using default");
                        })
                        .ok()
                })
                .unwrap_or(fallback)
        };

        let value = decimal("value", def.starting_value);
        let best = decimal("best", value).max(value);
        let total = decimal("total", value);

        let upgrades = (0..def.upgrades.len())
            .map(|index| UpgradeState {
                bought: fields
                    .and_then(|f| f.get(&format!("upgrade_{index}")))
                    .is_some_and(|raw| raw == "true"),
            })
            .collect();

        LayerState {
            resource: Resource::restore(value, best, total),
            upgrades,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crumbs_content::{CRUMBS, DIVINITY, standard_game};
    use rust_decimal_macros::dec;

    #[test]
    fn round_trip_preserves_progress() {
        let content = standard_game();
        let mut state = GameState::new(&content);
        state.layer_mut(CRUMBS).unwrap().resource.add_gain(dec!(90));
        state
            .layer_mut(DIVINITY)
            .unwrap()
            .resource
            .add_gain(dec!(3));
        state.layer_mut(DIVINITY).unwrap().upgrades[0].bought = true;
        state.clock.ticks = 42;

        let save = SaveData::encode(&content, &state, Utc::now());
        let restored = save.decode(&content);

        assert_eq!(restored, state);
    }

    #[test]
    fn missing_layer_falls_back_to_defaults() {
        let content = standard_game();
        let state = GameState::new(&content);
        let mut save = SaveData::encode(&content, &state, Utc::now());
        save.layers.remove("divinity");

        let restored = save.decode(&content);
        let divinity = restored.layer(DIVINITY).unwrap();
        assert_eq!(divinity.resource.value(), dec!(0));
        assert!(divinity.upgrades.iter().all(|u| !u.bought));
    }

    #[test]
    fn unknown_and_garbage_fields_are_tolerated() {
        let content = standard_game();
        let state = GameState::new(&content);
        let mut save = SaveData::encode(&content, &state, Utc::now());
        let crumbs = save.layers.get_mut("crumbs").unwrap();
        crumbs.insert("wibble".into(), "wobble".into());
        crumbs.insert("value".into(), "not a number".into());

        let restored = save.decode(&content);
        // garbage value falls back to the starting amount
        assert_eq!(
            restored.layer(CRUMBS).unwrap().resource.value(),
            dec!(10)
        );
    }
}
