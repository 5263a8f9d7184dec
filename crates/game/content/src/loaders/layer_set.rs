//! Layer set loader.
//!
//! RON layer files reference other layers by slug; ids are assigned by
//! declaration order during resolution. Everything structural is then
//! re-checked by [`Content::new`], so a file that parses but contradicts
//! itself (cyclic branches, dangling slugs) still fails to load.

use std::collections::BTreeMap;
use std::path::Path;

use crumbs_core::{
    Content, ConversionDef, ConversionKind, CostPolicy, EffectDef, Formula, GameConfig, LayerDef,
    LayerId, ResetParticipation, ResetPolicy, ResetPropagation, ResourceDef, Rounding, TreeDef,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Loader for layer sets from RON files.
pub struct LayerSetLoader;

impl LayerSetLoader {
    /// Load a layer set from a RON file.
    pub fn load(path: &Path) -> LoadResult<Content> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a layer set from a RON string.
    pub fn parse(content: &str) -> LoadResult<Content> {
        let spec: LayerSetSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse layer set RON: {}", e))?;
        spec.resolve()
    }
}

#[derive(Debug, Deserialize)]
struct LayerSetSpec {
    layers: Vec<LayerSpec>,
    tree: TreeSpec,
    #[serde(default)]
    config: GameConfig,
}

#[derive(Debug, Deserialize)]
struct LayerSpec {
    slug: String,
    name: String,
    #[serde(default)]
    resource: Option<ResourceSpec>,
    #[serde(default)]
    starting_value: Decimal,
    #[serde(default)]
    base_rate: Decimal,
    #[serde(default)]
    conversion: Option<ConversionSpec>,
    #[serde(default)]
    upgrades: Vec<UpgradeSpec>,
    #[serde(default)]
    reset: ResetSpec,
}

#[derive(Debug, Deserialize)]
struct ResourceSpec {
    name: String,
    #[serde(default)]
    rounding: Rounding,
    #[serde(default)]
    allow_negative: bool,
}

#[derive(Debug, Deserialize)]
struct ConversionSpec {
    formula: Formula,
    /// Slug of the base layer.
    base: String,
    #[serde(default)]
    kind: ConversionKind,
}

#[derive(Debug, Deserialize)]
struct UpgradeSpec {
    title: String,
    #[serde(default)]
    description: String,
    cost: Decimal,
    /// Slug of the paying layer; defaults to the owning layer.
    #[serde(default)]
    cost_layer: Option<String>,
    #[serde(default)]
    cost_policy: Option<CostPolicy>,
    effect: EffectSpec,
}

#[derive(Debug, Deserialize)]
enum EffectSpec {
    RateAdd { target: String, amount: Decimal },
    RateMultiply { target: String, factor: Decimal },
    GrantOnPurchase { target: String, amount: Decimal },
}

#[derive(Debug, Default, Deserialize)]
struct ResetSpec {
    #[serde(default)]
    on_self: Decimal,
    #[serde(default)]
    on_drain: Decimal,
    #[serde(default)]
    on_cascade: Decimal,
    #[serde(default)]
    reset_records: bool,
    #[serde(default)]
    participation: ResetParticipation,
}

#[derive(Debug, Deserialize)]
struct TreeSpec {
    rows: Vec<Vec<String>>,
    #[serde(default)]
    branches: Vec<(String, String)>,
    #[serde(default)]
    propagation: ResetPropagation,
}

impl LayerSetSpec {
    fn resolve(self) -> LoadResult<Content> {
        let ids: BTreeMap<String, LayerId> = self
            .layers
            .iter()
            .enumerate()
            .map(|(index, layer)| (layer.slug.clone(), LayerId(index as u16)))
            .collect();
        let lookup = |slug: &str| -> LoadResult<LayerId> {
            ids.get(slug)
                .copied()
                .ok_or_else(|| anyhow::anyhow!("unknown layer slug '{}'", slug))
        };

        let mut layers = Vec::with_capacity(self.layers.len());
        for (index, spec) in self.layers.into_iter().enumerate() {
            let own_id = LayerId(index as u16);

            let resource = match spec.resource {
                Some(r) => ResourceDef {
                    name: r.name,
                    rounding: r.rounding,
                    allow_negative: r.allow_negative,
                },
                None => ResourceDef::new(spec.name.to_lowercase()),
            };

            let conversion = spec
                .conversion
                .map(|c| {
                    Ok::<_, anyhow::Error>(ConversionDef {
                        formula: c.formula,
                        base: lookup(&c.base)?,
                        kind: c.kind,
                    })
                })
                .transpose()?;

            let mut upgrades = Vec::with_capacity(spec.upgrades.len());
            for upgrade in spec.upgrades {
                let cost_layer = match &upgrade.cost_layer {
                    Some(slug) => lookup(slug)?,
                    None => own_id,
                };
                let effect = match upgrade.effect {
                    EffectSpec::RateAdd { target, amount } => EffectDef::RateAdd {
                        target: lookup(&target)?,
                        amount,
                    },
                    EffectSpec::RateMultiply { target, factor } => EffectDef::RateMultiply {
                        target: lookup(&target)?,
                        factor,
                    },
                    EffectSpec::GrantOnPurchase { target, amount } => EffectDef::GrantOnPurchase {
                        target: lookup(&target)?,
                        amount,
                    },
                };
                upgrades.push(crumbs_core::UpgradeDef {
                    title: upgrade.title,
                    description: upgrade.description,
                    cost: upgrade.cost,
                    cost_layer,
                    cost_policy: upgrade.cost_policy,
                    effect,
                });
            }

            layers.push(LayerDef {
                id: own_id,
                slug: spec.slug,
                name: spec.name,
                resource,
                starting_value: spec.starting_value,
                base_rate: spec.base_rate,
                conversion,
                upgrades,
                reset: ResetPolicy {
                    on_self: spec.reset.on_self,
                    on_drain: spec.reset.on_drain,
                    on_cascade: spec.reset.on_cascade,
                    reset_records: spec.reset.reset_records,
                    participation: spec.reset.participation,
                },
            });
        }

        let mut rows = Vec::with_capacity(self.tree.rows.len());
        for row in &self.tree.rows {
            let mut resolved = Vec::with_capacity(row.len());
            for slug in row {
                resolved.push(lookup(slug)?);
            }
            rows.push(resolved);
        }
        let mut branches = Vec::with_capacity(self.tree.branches.len());
        for (from, to) in &self.tree.branches {
            branches.push(crumbs_core::Branch::new(lookup(from)?, lookup(to)?));
        }
        let tree = TreeDef {
            rows,
            branches,
            propagation: self.tree.propagation,
        };

        Content::new(layers, tree, self.config)
            .map_err(|e| anyhow::anyhow!("invalid layer set: {}", e))
    }
}
