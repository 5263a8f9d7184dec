//! The root layer: crumbs.

use crumbs_core::{LayerDef, LayerId, ResetParticipation, ResetPolicy};
use rust_decimal_macros::dec;

pub const CRUMBS: LayerId = LayerId(0);

/// Crumbs accumulate passively once divinity upgrades provide a rate.
///
/// Every prestige anywhere restarts this layer: to zero when the
/// resetting layer just converted crumbs away, back to the opening ten
/// otherwise. Records follow the baseline — a fresh run starts its own
/// history.
pub fn layer() -> LayerDef {
    let mut layer = LayerDef::new(CRUMBS, "crumbs", "Tree");
    layer.resource.name = "crumbs".into();
    layer.starting_value = dec!(10);
    layer.reset = ResetPolicy {
        on_self: dec!(0),
        on_drain: dec!(0),
        on_cascade: dec!(10),
        reset_records: true,
        participation: ResetParticipation::Always,
    };
    layer
}
