use serde::{Deserialize, Serialize};

pub const PATH_SEPARATOR: char = '/';

/// Arena index of a node within its `SceneTree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Opaque per-process identity handed out by the tree arena.
///
/// Only valid while the underlying node exists; a reloaded scene gets
/// fresh keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceKey(pub u64);

/// Explicit role a child node plays inside a composite widget.
///
/// Set in the scene file to disambiguate composite renaming (an input
/// field's placeholder vs. its value text) before name heuristics run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChildRole {
    Placeholder,
    TextValue,
}

/// What a node carries, as captured from the scene file.
///
/// The capability probe reads these flags in a fixed order; a node may
/// carry several (a button usually also carries an image).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeFacets {
    #[serde(default, skip_serializing_if = "is_false")]
    pub button: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub image: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub raw_image: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub text: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub rich_text: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub toggle: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub input_field: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub slider: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub dropdown: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub scroll_area: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub canvas: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub canvas_group: bool,

    /// Explicit composite role (placeholder / text value).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<ChildRole>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub facets: NodeFacets,
    pub key: InstanceKey,

    /// Memoized canonical path. Path computation walks to the root, so
    /// the result is cached and invalidated on rename/reparent/removal.
    path_memo: Option<String>,

    removed: bool,
}

/// A live node hierarchy: an arena of named nodes forming a forest.
#[derive(Debug, Clone, Default)]
pub struct SceneTree {
    nodes: Vec<SceneNode>,
    roots: Vec<NodeId>,
    next_key: u64,
}

impl SceneTree {
    pub fn new() -> Self {
        SceneTree::default()
    }

    pub fn add_root(&mut self, name: &str, facets: NodeFacets) -> NodeId {
        let id = self.push_node(name, None, facets);
        self.roots.push(id);
        id
    }

    pub fn add_child(&mut self, parent: NodeId, name: &str, facets: NodeFacets) -> NodeId {
        let id = self.push_node(name, Some(parent), facets);
        self.nodes[parent.0].children.push(id);
        id
    }

    fn push_node(&mut self, name: &str, parent: Option<NodeId>, facets: NodeFacets) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.next_key += 1;
        self.nodes.push(SceneNode {
            name: name.to_string(),
            parent,
            children: Vec::new(),
            facets,
            key: InstanceKey(self.next_key),
            path_memo: None,
            removed: false,
        });
        id
    }

    pub fn node(&self, id: NodeId) -> &SceneNode {
        &self.nodes[id.0]
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// All live node ids, in insertion (top-down per subtree) order.
    pub fn ids(&self) -> Vec<NodeId> {
        (0..self.nodes.len())
            .map(NodeId)
            .filter(|id| !self.nodes[id.0].removed)
            .collect()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len() && !self.nodes[id.0].removed
    }

    /// Number of hops from the root (root = 0).
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut cursor = self.nodes[id.0].parent;
        while let Some(p) = cursor {
            depth += 1;
            cursor = self.nodes[p.0].parent;
        }
        depth
    }

    /// Canonical path: root-to-node names joined by `/`. Memoized.
    pub fn canonical_path(&mut self, id: NodeId) -> String {
        if let Some(ref memo) = self.nodes[id.0].path_memo {
            return memo.clone();
        }
        let path = self.compute_path(id);
        self.nodes[id.0].path_memo = Some(path.clone());
        path
    }

    /// Canonical path without touching the memo (read-only contexts).
    pub fn compute_path(&self, id: NodeId) -> String {
        let mut segments = vec![self.nodes[id.0].name.as_str()];
        let mut cursor = self.nodes[id.0].parent;
        while let Some(p) = cursor {
            segments.push(self.nodes[p.0].name.as_str());
            cursor = self.nodes[p.0].parent;
        }
        segments.reverse();
        segments.join(&PATH_SEPARATOR.to_string())
    }

    /// Rename a node. Invalidates the path memo of the node and every
    /// descendant (their cached paths embed this name).
    pub fn rename(&mut self, id: NodeId, name: &str) {
        self.nodes[id.0].name = name.to_string();
        self.invalidate_paths(id);
    }

    /// Move a node under a new parent. Invalidates the subtree's memos.
    pub fn reparent(&mut self, id: NodeId, new_parent: NodeId) {
        if let Some(old) = self.nodes[id.0].parent {
            self.nodes[old.0].children.retain(|c| *c != id);
        } else {
            self.roots.retain(|r| *r != id);
        }
        self.nodes[id.0].parent = Some(new_parent);
        self.nodes[new_parent.0].children.push(id);
        self.invalidate_paths(id);
    }

    /// Remove a node and its whole subtree from the live forest.
    pub fn remove_subtree(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent {
            self.nodes[parent.0].children.retain(|c| *c != id);
        } else {
            self.roots.retain(|r| *r != id);
        }
        for d in self.subtree_ids(id) {
            self.nodes[d.0].removed = true;
            self.nodes[d.0].path_memo = None;
        }
    }

    /// The node itself plus all live descendants, depth-first.
    pub fn subtree_ids(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            if self.nodes[n.0].removed {
                continue;
            }
            out.push(n);
            for c in self.nodes[n.0].children.iter().rev() {
                stack.push(*c);
            }
        }
        out
    }

    fn invalidate_paths(&mut self, id: NodeId) {
        for d in self.subtree_ids(id) {
            self.nodes[d.0].path_memo = None;
        }
    }
}
