//! The divinity layer.

use crumbs_core::{
    ConversionDef, ConversionKind, EffectDef, Formula, LayerDef, LayerId, UpgradeDef,
};
use rust_decimal_macros::dec;

use super::{CRUMBS, CULTIVATION};

pub const DIVINITY: LayerId = LayerId(2);

/// Upgrade slots, in purchase-row order.
pub const ABSORBING_POINTS: usize = 0;
pub const POINTS_BUT_FASTER: usize = 1;
pub const CULTIVATION_POINT: usize = 2;

/// Divinity prestiges out of crumbs with the `sqrt(x/10)` curve and feeds
/// the crumb rate through its upgrades.
pub fn layer() -> LayerDef {
    let mut layer = LayerDef::new(DIVINITY, "divinity", "Divinity");
    layer.conversion = Some(ConversionDef {
        formula: Formula::DivThenSqrt { divisor: dec!(10) },
        base: CRUMBS,
        kind: ConversionKind::Cumulative,
    });
    layer.upgrades = vec![
        UpgradeDef {
            title: "Absorbing points".into(),
            description: "Absorb 1 point every second from your surroundings".into(),
            cost: dec!(1),
            cost_layer: DIVINITY,
            cost_policy: None,
            effect: EffectDef::RateAdd {
                target: CRUMBS,
                amount: dec!(1),
            },
        },
        UpgradeDef {
            title: "Points, but faster".into(),
            description: "Multiply point gain by 2".into(),
            cost: dec!(5),
            cost_layer: DIVINITY,
            cost_policy: None,
            effect: EffectDef::RateMultiply {
                target: CRUMBS,
                factor: dec!(2),
            },
        },
        UpgradeDef {
            title: "Cultivation Point".into(),
            description: "Master Divinity and get 1 Cultivation Point".into(),
            cost: dec!(10000),
            cost_layer: DIVINITY,
            cost_policy: None,
            effect: EffectDef::GrantOnPurchase {
                target: CULTIVATION,
                amount: dec!(1),
            },
        },
    ];
    layer
}
