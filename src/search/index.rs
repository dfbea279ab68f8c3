use std::collections::{HashMap, HashSet};

use crate::scene::scene_model::NodeId;
use crate::search::snapshot::SearchSnapshot;

/// Answers "does node N, or any descendant, match the active query" over a
/// captured snapshot.
///
/// Both caches are invalidated wholesale when the query changes; the
/// tree's path memos are independent and untouched by query changes.
#[derive(Debug, Default)]
pub struct MatchIndex {
    query_lower: String,

    /// Per-node "self matches query"
    direct: HashMap<NodeId, bool>,

    /// Per-node "self or any descendant matches query"
    subtree: HashMap<NodeId, bool>,

    /// Ancestors of every direct match, so deep matches are reachable
    /// without manual expansion
    auto_expand: HashSet<NodeId>,
}

impl MatchIndex {
    pub fn new() -> Self {
        MatchIndex::default()
    }

    /// Change the active query. Drops every cached match; results are
    /// invalid until the next `recompute`.
    pub fn set_query(&mut self, query: &str) {
        self.query_lower = query.to_lowercase();
        self.direct.clear();
        self.subtree.clear();
        self.auto_expand.clear();
    }

    pub fn query(&self) -> &str {
        &self.query_lower
    }

    /// Two-pass, bottom-up recomputation. O(n) in snapshot size: each node
    /// is visited once per pass. An empty query short-circuits to
    /// "everything matches, nothing forced-expanded".
    pub fn recompute(&mut self, snapshot: &SearchSnapshot) {
        self.direct.clear();
        self.subtree.clear();
        self.auto_expand.clear();

        if self.query_lower.is_empty() {
            return;
        }

        // Pass 1: direct matches (case-insensitive substring)
        for node in snapshot.nodes() {
            let hit = node.name_lower.contains(&self.query_lower);
            self.direct.insert(node.id, hit);
            self.subtree.insert(node.id, hit);
        }

        // Pass 2: propagate deepest-first, so every child is resolved
        // before its parent is finalized
        let mut order: Vec<&_> = snapshot.nodes().iter().collect();
        order.sort_by(|a, b| b.depth.cmp(&a.depth));
        for node in order {
            if self.subtree.get(&node.id) == Some(&true) {
                if let Some(parent) = node.parent {
                    self.subtree.insert(parent, true);
                }
            }
        }

        // Pass 3: auto-expand set: every ancestor of a direct match
        let parents: HashMap<NodeId, Option<NodeId>> = snapshot
            .nodes()
            .iter()
            .map(|n| (n.id, n.parent))
            .collect();
        for node in snapshot.nodes() {
            if self.direct.get(&node.id) != Some(&true) {
                continue;
            }
            let mut cursor = node.parent;
            while let Some(ancestor) = cursor {
                if !self.auto_expand.insert(ancestor) {
                    break; // chain already recorded
                }
                cursor = parents.get(&ancestor).copied().flatten();
            }
        }
    }

    pub fn is_match(&self, id: NodeId) -> bool {
        if self.query_lower.is_empty() {
            return true;
        }
        self.direct.get(&id).copied().unwrap_or(false)
    }

    pub fn subtree_matches(&self, id: NodeId) -> bool {
        if self.query_lower.is_empty() {
            return true;
        }
        self.subtree.get(&id).copied().unwrap_or(false)
    }

    pub fn should_auto_expand(&self, id: NodeId) -> bool {
        self.auto_expand.contains(&id)
    }
}
