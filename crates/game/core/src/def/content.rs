//! Validated content bundle.

use std::collections::BTreeSet;

use super::error::ContentError;
use super::tree::{Branch, ResetPropagation, TreeDef};
use super::{EffectDef, LayerDef, LayerId};
use crate::config::GameConfig;
use crate::env::{ConfigOracle, Env, GameEnv, LayerOracle, TreeOracle};
use crate::formula;

/// The full static description of a game: layers, tree, configuration.
///
/// `Content` can only be obtained through [`Content::new`], which validates
/// every cross-reference up front. Everything downstream (engine, views,
/// persistence) relies on that: lookups by a validated [`LayerId`] cannot
/// fail.
#[derive(Clone, Debug)]
pub struct Content {
    layers: Vec<LayerDef>,
    tree: TreeDef,
    config: GameConfig,
}

impl Content {
    pub fn new(
        layers: Vec<LayerDef>,
        tree: TreeDef,
        config: GameConfig,
    ) -> Result<Self, ContentError> {
        validate(&layers, &tree)?;
        Ok(Self {
            layers,
            tree,
            config,
        })
    }

    pub fn layers(&self) -> &[LayerDef] {
        &self.layers
    }

    pub fn tree(&self) -> &TreeDef {
        &self.tree
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Trait-object environment over this content, for the engine.
    pub fn env(&self) -> GameEnv<'_> {
        Env::with_all(self, self, self).into_game_env()
    }
}

impl LayerOracle for Content {
    fn layer(&self, id: LayerId) -> Option<&LayerDef> {
        self.layers.get(id.index())
    }

    fn layer_count(&self) -> usize {
        self.layers.len()
    }
}

impl TreeOracle for Content {
    fn rows(&self) -> &[Vec<LayerId>] {
        &self.tree.rows
    }

    fn branches(&self) -> &[Branch] {
        &self.tree.branches
    }

    fn propagation(&self) -> ResetPropagation {
        self.tree.propagation
    }
}

impl ConfigOracle for Content {
    fn game_config(&self) -> &GameConfig {
        &self.config
    }
}

fn validate(layers: &[LayerDef], tree: &TreeDef) -> Result<(), ContentError> {
    let count = layers.len();
    let in_range = |id: LayerId| id.index() < count;
    let slug_of = |id: LayerId| layers[id.index()].slug.clone();

    // Dense ids and unique slugs.
    let mut slugs = BTreeSet::new();
    for (position, layer) in layers.iter().enumerate() {
        let expected = LayerId(position as u16);
        if layer.id != expected {
            return Err(ContentError::LayerIdMismatch {
                expected,
                found: layer.id,
            });
        }
        if !slugs.insert(layer.slug.as_str()) {
            return Err(ContentError::DuplicateSlug {
                slug: layer.slug.clone(),
            });
        }
    }

    // Cross-references and formulas.
    for layer in layers {
        if let Some(conversion) = &layer.conversion {
            if !in_range(conversion.base) {
                return Err(ContentError::UnknownLayer {
                    context: "conversion base",
                    layer: conversion.base,
                });
            }
            formula::check(&conversion.formula).map_err(|source| {
                ContentError::InvalidFormula {
                    slug: layer.slug.clone(),
                    source,
                }
            })?;
        }

        for upgrade in &layer.upgrades {
            if !in_range(upgrade.cost_layer) {
                return Err(ContentError::UnknownLayer {
                    context: "upgrade cost",
                    layer: upgrade.cost_layer,
                });
            }
            let target = match upgrade.effect {
                EffectDef::RateAdd { target, .. }
                | EffectDef::RateMultiply { target, .. }
                | EffectDef::GrantOnPurchase { target, .. } => target,
            };
            if !in_range(target) {
                return Err(ContentError::UnknownLayer {
                    context: "upgrade effect",
                    layer: target,
                });
            }
        }
    }

    // Tree rows: valid, unique nodes.
    let mut nodes = BTreeSet::new();
    for node in tree.nodes() {
        if !in_range(node) {
            return Err(ContentError::UnknownLayer {
                context: "tree node",
                layer: node,
            });
        }
        if !nodes.insert(node) {
            return Err(ContentError::DuplicateTreeNode {
                slug: slug_of(node),
            });
        }
    }

    // Branch endpoints must be tree nodes.
    for branch in &tree.branches {
        for endpoint in [branch.from, branch.to] {
            if !in_range(endpoint) {
                return Err(ContentError::UnknownLayer {
                    context: "branch endpoint",
                    layer: endpoint,
                });
            }
            if !nodes.contains(&endpoint) {
                return Err(ContentError::BranchEndpointNotInTree {
                    slug: slug_of(endpoint),
                });
            }
        }
    }

    detect_cycles(layers, &tree.branches)
}

/// Depth-first cycle check over the branch graph.
///
/// A cycle would make reset propagation revisit its own trigger, so the
/// whole graph is rejected before any state exists.
fn detect_cycles(layers: &[LayerDef], branches: &[Branch]) -> Result<(), ContentError> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Unvisited,
        InProgress,
        Done,
    }

    fn visit(
        node: LayerId,
        branches: &[Branch],
        marks: &mut [Mark],
        layers: &[LayerDef],
    ) -> Result<(), ContentError> {
        match marks[node.index()] {
            Mark::Done => return Ok(()),
            Mark::InProgress => {
                return Err(ContentError::CyclicBranch {
                    slug: layers[node.index()].slug.clone(),
                });
            }
            Mark::Unvisited => {}
        }
        marks[node.index()] = Mark::InProgress;
        for branch in branches.iter().filter(|b| b.from == node) {
            visit(branch.to, branches, marks, layers)?;
        }
        marks[node.index()] = Mark::Done;
        Ok(())
    }

    let mut marks = vec![Mark::Unvisited; layers.len()];
    for layer in layers {
        visit(layer.id, branches, &mut marks, layers)?;
    }
    Ok(())
}
