//! Static definitions of layers, upgrades, and conversions.
//!
//! Definitions are the read-only half of the game: validated once at
//! construction into a [`Content`] bundle, then consumed by the engine
//! through the oracle traits in [`crate::env`]. Mutable progress lives in
//! [`crate::state::GameState`], indexed by the same [`LayerId`]s.

mod content;
mod error;
mod tree;

pub use content::Content;
pub use error::ContentError;
pub use tree::{Branch, ResetPropagation, TreeDef, reachable_from};

use std::fmt;

use crate::formula::Formula;
use crate::num::Decimal;

/// Dense identifier of a layer; index into the definition and state tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerId(pub u16);

impl LayerId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Rounding policy applied to conversion output for a resource.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Rounding {
    /// Fractional amounts are kept as-is.
    #[default]
    Continuous,
    /// Conversion output is floored to a whole amount.
    Floor,
}

/// Static description of a layer's resource.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceDef {
    /// Display name ("crumbs", "divinity").
    pub name: String,
    pub rounding: Rounding,
    /// Whether the value may go below zero (decay mechanics).
    pub allow_negative: bool,
}

impl ResourceDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rounding: Rounding::default(),
            allow_negative: false,
        }
    }
}

/// How conversion output lands in the gain resource.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConversionKind {
    /// Each conversion adds its gain to the current amount.
    #[default]
    Cumulative,
    /// The gain replaces the current amount when larger.
    Replacing,
}

/// Rule for transforming an accumulated base resource into this layer's
/// resource.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConversionDef {
    pub formula: Formula,
    /// Layer whose resource feeds the formula.
    pub base: LayerId,
    pub kind: ConversionKind,
}

/// Whether purchasing an upgrade consumes its cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CostPolicy {
    /// Cost is deducted from the cost resource at purchase.
    #[default]
    Deduct,
    /// Cost only gates the purchase; the resource is left untouched.
    GateOnly,
}

/// Permanent effect granted by a bought upgrade.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectDef {
    /// Adds to the passive gain rate of the target layer.
    RateAdd { target: LayerId, amount: Decimal },
    /// Multiplies the passive gain rate of the target layer.
    RateMultiply { target: LayerId, factor: Decimal },
    /// One-time grant paid into the target layer's resource at purchase.
    GrantOnPurchase { target: LayerId, amount: Decimal },
}

/// A purchasable, one-time upgrade.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpgradeDef {
    pub title: String,
    pub description: String,
    pub cost: Decimal,
    /// Layer whose resource pays for (or gates) the purchase.
    pub cost_layer: LayerId,
    /// Overrides [`crate::config::GameConfig::default_cost_policy`] when set.
    pub cost_policy: Option<CostPolicy>,
    pub effect: EffectDef,
}

/// Which resets sweep a layer along.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResetParticipation {
    /// Reset only when this layer triggers, or is reached over branch edges.
    #[default]
    Triggered,
    /// Reset by every tree reset, connected or not. The root resource layer
    /// uses this: any prestige anywhere restarts its accumulation.
    Always,
}

/// Per-layer reset baselines.
///
/// The baseline depends on why the layer is resetting: its own reset, a
/// reset whose conversion just drained this layer, or an unrelated cascade
/// it is swept into.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResetPolicy {
    pub on_self: Decimal,
    pub on_drain: Decimal,
    pub on_cascade: Decimal,
    /// When true, `best` and `total` follow the baseline as well.
    pub reset_records: bool,
    pub participation: ResetParticipation,
}

impl Default for ResetPolicy {
    fn default() -> Self {
        Self {
            on_self: Decimal::ZERO,
            on_drain: Decimal::ZERO,
            on_cascade: Decimal::ZERO,
            reset_records: false,
            participation: ResetParticipation::default(),
        }
    }
}

/// One tier of progression: a resource, an optional conversion into it,
/// and an ordered row of upgrades.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerDef {
    pub id: LayerId,
    /// Stable string key used in save files.
    pub slug: String,
    /// Display name of the layer itself ("Divinity").
    pub name: String,
    pub resource: ResourceDef,
    /// Value the resource holds at the start of a fresh game.
    pub starting_value: Decimal,
    /// Passive gain per second before upgrade effects.
    pub base_rate: Decimal,
    pub conversion: Option<ConversionDef>,
    /// Declared order matters: effects fold in this sequence.
    pub upgrades: Vec<UpgradeDef>,
    pub reset: ResetPolicy,
}

impl LayerDef {
    /// A layer with no conversion, no upgrades, and default reset policy.
    pub fn new(id: LayerId, slug: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id,
            slug: slug.into(),
            resource: ResourceDef::new(name.to_lowercase()),
            name,
            starting_value: Decimal::ZERO,
            base_rate: Decimal::ZERO,
            conversion: None,
            upgrades: Vec::new(),
            reset: ResetPolicy::default(),
        }
    }
}
