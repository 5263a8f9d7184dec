//! Traits describing read-only content data.
//!
//! Oracles expose static layer definitions, the reset tree, and rule
//! configuration. The [`Env`] aggregate bundles them so the engine can
//! access everything it needs without hard coupling to a concrete content
//! store — this is the explicit context object that replaces any global
//! content registry.

use crate::config::GameConfig;
use crate::def::{Branch, LayerDef, LayerId, ResetPropagation};

/// Lookup over validated layer definitions.
pub trait LayerOracle {
    fn layer(&self, id: LayerId) -> Option<&LayerDef>;

    fn layer_count(&self) -> usize;

    fn by_slug(&self, slug: &str) -> Option<&LayerDef> {
        self.iter_ids()
            .filter_map(|id| self.layer(id))
            .find(|layer| layer.slug == slug)
    }

    fn iter_ids(&self) -> LayerIdIter {
        LayerIdIter {
            next: 0,
            count: self.layer_count() as u16,
        }
    }
}

/// All layer ids in definition order.
pub struct LayerIdIter {
    next: u16,
    count: u16,
}

impl Iterator for LayerIdIter {
    type Item = LayerId;

    fn next(&mut self) -> Option<LayerId> {
        if self.next < self.count {
            let id = LayerId(self.next);
            self.next += 1;
            Some(id)
        } else {
            None
        }
    }
}

/// Read-only view of the reset tree.
pub trait TreeOracle {
    fn rows(&self) -> &[Vec<LayerId>];

    fn branches(&self) -> &[Branch];

    fn propagation(&self) -> ResetPropagation;
}

/// Read-only rule configuration.
pub trait ConfigOracle {
    fn game_config(&self) -> &GameConfig;
}

/// An oracle the engine needed was not provided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("layer oracle not available")]
    LayersNotAvailable,

    #[error("tree oracle not available")]
    TreeNotAvailable,

    #[error("config oracle not available")]
    ConfigNotAvailable,
}

/// Aggregates the read-only oracles required by the action pipeline.
#[derive(Clone, Copy, Debug)]
pub struct Env<'a, L, T, C>
where
    L: LayerOracle + ?Sized,
    T: TreeOracle + ?Sized,
    C: ConfigOracle + ?Sized,
{
    layers: Option<&'a L>,
    tree: Option<&'a T>,
    config: Option<&'a C>,
}

pub type GameEnv<'a> = Env<'a, dyn LayerOracle + 'a, dyn TreeOracle + 'a, dyn ConfigOracle + 'a>;

impl<'a, L, T, C> Env<'a, L, T, C>
where
    L: LayerOracle + ?Sized,
    T: TreeOracle + ?Sized,
    C: ConfigOracle + ?Sized,
{
    pub fn new(layers: Option<&'a L>, tree: Option<&'a T>, config: Option<&'a C>) -> Self {
        Self {
            layers,
            tree,
            config,
        }
    }

    pub fn with_all(layers: &'a L, tree: &'a T, config: &'a C) -> Self {
        Self::new(Some(layers), Some(tree), Some(config))
    }

    pub fn empty() -> Self {
        Self {
            layers: None,
            tree: None,
            config: None,
        }
    }

    /// Returns the LayerOracle, or an error if not available.
    pub fn layers(&self) -> Result<&'a L, OracleError> {
        self.layers.ok_or(OracleError::LayersNotAvailable)
    }

    /// Returns the TreeOracle, or an error if not available.
    pub fn tree(&self) -> Result<&'a T, OracleError> {
        self.tree.ok_or(OracleError::TreeNotAvailable)
    }

    /// Returns the ConfigOracle, or an error if not available.
    pub fn config(&self) -> Result<&'a C, OracleError> {
        self.config.ok_or(OracleError::ConfigNotAvailable)
    }
}

impl<'a, L, T, C> Env<'a, L, T, C>
where
    L: LayerOracle + 'a,
    T: TreeOracle + 'a,
    C: ConfigOracle + 'a,
{
    /// Converts this environment into a trait-object based [`GameEnv`].
    pub fn into_game_env(self) -> GameEnv<'a> {
        let layers: Option<&'a dyn LayerOracle> = self.layers.map(|layers| layers as _);
        let tree: Option<&'a dyn TreeOracle> = self.tree.map(|tree| tree as _);
        let config: Option<&'a dyn ConfigOracle> = self.config.map(|config| config as _);
        Env::new(layers, tree, config)
    }
}
