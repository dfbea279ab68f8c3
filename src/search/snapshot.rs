use crate::scene::scene_model::{NodeId, SceneTree};

/// One node as captured for matching: display name (pre-lowered), parent
/// pointer, and depth.
#[derive(Debug, Clone)]
pub struct SnapshotNode {
    pub id: NodeId,
    pub name_lower: String,
    pub parent: Option<NodeId>,
    pub depth: usize,
}

/// Immutable capture of the live hierarchy.
///
/// Matching and propagation run off this snapshot, never against live
/// nodes, so they are safe to run away from the thread that owns the tree.
/// Capturing is O(n) and happens once per recomputation.
#[derive(Debug, Clone, Default)]
pub struct SearchSnapshot {
    nodes: Vec<SnapshotNode>,
}

impl SearchSnapshot {
    pub fn capture(tree: &SceneTree) -> Self {
        let nodes = tree
            .ids()
            .into_iter()
            .map(|id| {
                let node = tree.node(id);
                SnapshotNode {
                    id,
                    name_lower: node.name.to_lowercase(),
                    parent: node.parent,
                    depth: tree.depth(id),
                }
            })
            .collect();
        SearchSnapshot { nodes }
    }

    pub fn nodes(&self) -> &[SnapshotNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
