//! The cultivation layer.

use crumbs_core::{LayerDef, LayerId};

pub const CULTIVATION: LayerId = LayerId(1);

/// Cultivation points are earned by mastering lower layers; the layer has
/// no conversion of its own.
pub fn layer() -> LayerDef {
    LayerDef::new(CULTIVATION, "cultivation", "Cultivation")
}
