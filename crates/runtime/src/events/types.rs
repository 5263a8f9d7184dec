//! Typed events published by a session.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::bus::Topic;

/// A layer's resource moved; carries the post-action readings so
/// subscribers can render without another query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceChanged {
    pub layer: String,
    pub value: Decimal,
    pub best: Decimal,
    pub total: Decimal,
}

/// An upgrade slot was bought.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradePurchased {
    pub layer: String,
    pub index: usize,
}

/// A reset cascade completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResetApplied {
    pub triggered_by: String,
    /// Every layer the cascade touched, the trigger included.
    pub affected: Vec<String>,
}

/// Event wrapper that carries the topic and typed event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Resource(ResourceChanged),
    Upgrade(UpgradePurchased),
    Reset(ResetApplied),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Resource(_) => Topic::Resource,
            Event::Upgrade(_) => Topic::Upgrade,
            Event::Reset(_) => Topic::Reset,
        }
    }
}
