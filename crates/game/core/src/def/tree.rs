//! Layer tree structure and reset reachability.

use super::LayerId;

/// Directed reset edge: resetting `from` also resets `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Branch {
    pub from: LayerId,
    pub to: LayerId,
}

impl Branch {
    pub fn new(from: LayerId, to: LayerId) -> Self {
        Self { from, to }
    }
}

/// How a reset travels across the tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResetPropagation {
    /// Follow declared branch edges transitively from the triggering node.
    /// The row structure plays no part; only edges carry resets.
    #[default]
    Branched,
    /// Resets never leave the triggering node.
    None,
}

/// The layer hierarchy: display rows plus the branch edges resets travel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeDef {
    /// Rows of layer nodes, top row first. Purely structural; reset
    /// behavior is governed by `branches`.
    pub rows: Vec<Vec<LayerId>>,
    pub branches: Vec<Branch>,
    pub propagation: ResetPropagation,
}

impl TreeDef {
    pub fn new(rows: Vec<Vec<LayerId>>, branches: Vec<Branch>) -> Self {
        Self {
            rows,
            branches,
            propagation: ResetPropagation::default(),
        }
    }

    /// All node ids in row order.
    pub fn nodes(&self) -> impl Iterator<Item = LayerId> + '_ {
        self.rows.iter().flatten().copied()
    }

    /// True if `layer` appears somewhere in the rows.
    pub fn contains(&self, layer: LayerId) -> bool {
        self.nodes().any(|node| node == layer)
    }
}

/// Every layer reachable from `from` over branch edges, excluding `from`
/// itself unless a cycle of edges leads back to it.
///
/// Breadth-first over the declared edge set; `layer_count` bounds the
/// visited table.
pub fn reachable_from(branches: &[Branch], from: LayerId, layer_count: usize) -> Vec<LayerId> {
    let mut visited = vec![false; layer_count];
    let mut queue = vec![from];
    let mut reached = Vec::new();

    while let Some(node) = queue.pop() {
        for branch in branches.iter().filter(|b| b.from == node) {
            let idx = branch.to.index();
            if idx < layer_count && !visited[idx] {
                visited[idx] = true;
                reached.push(branch.to);
                queue.push(branch.to);
            }
        }
    }

    reached
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: LayerId = LayerId(0);
    const B: LayerId = LayerId(1);
    const C: LayerId = LayerId(2);
    const D: LayerId = LayerId(3);

    #[test]
    fn empty_branch_list_reaches_nothing() {
        assert!(reachable_from(&[], A, 4).is_empty());
    }

    #[test]
    fn edges_are_followed_transitively() {
        let branches = [Branch::new(A, B), Branch::new(B, C)];
        let reached = reachable_from(&branches, A, 4);
        assert!(reached.contains(&B));
        assert!(reached.contains(&C));
        assert!(!reached.contains(&D));
    }

    #[test]
    fn diamond_shapes_visit_each_node_once() {
        let branches = [
            Branch::new(A, B),
            Branch::new(A, C),
            Branch::new(B, D),
            Branch::new(C, D),
        ];
        let reached = reachable_from(&branches, A, 4);
        assert_eq!(reached.iter().filter(|id| **id == D).count(), 1);
        assert_eq!(reached.len(), 3);
    }

    #[test]
    fn propagation_is_directed() {
        let branches = [Branch::new(A, B)];
        assert!(reachable_from(&branches, B, 4).is_empty());
    }
}
