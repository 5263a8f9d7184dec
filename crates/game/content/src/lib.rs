//! Data-driven content definitions and loaders.
//!
//! This crate houses the standard game content and provides loaders for
//! RON/TOML data files:
//! - the shipped layer set (crumbs, cultivation, divinity)
//! - layer sets from RON files, referenced by slug
//! - game configuration from TOML
//!
//! Content is consumed by the runtime through the core oracle traits and
//! never appears in game state.

pub mod layers;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use layers::{CRUMBS, CULTIVATION, DIVINITY, standard_game};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LayerSetLoader};
