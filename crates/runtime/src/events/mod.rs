//! Event surface of the runtime.
//!
//! The bus replaces any global event channel: sessions publish after each
//! engine execution, observers subscribe per topic and re-read snapshots
//! when told something they display has changed.

mod bus;
mod types;

pub use bus::{EventBus, Topic};
pub use types::{Event, ResetApplied, ResourceChanged, UpgradePurchased};
