use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::scene::scene_model::{NodeFacets, NodeId, SceneTree};

// ============================================================================
// Scene file model (YAML)
// ============================================================================

/// On-disk scene description: a named forest of nodes with facets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneDoc {
    /// Scene name, used to namespace all generated units.
    pub scene: String,

    pub nodes: Vec<NodeDoc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDoc {
    pub name: String,

    #[serde(flatten)]
    pub facets: NodeFacets,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDoc>,
}

// ============================================================================
// Load / save
// ============================================================================

/// Load a scene file into a live tree. Returns the scene name and the tree.
pub fn load_scene(path: &str) -> Result<(String, SceneTree), PipelineError> {
    let content = std::fs::read_to_string(path).map_err(|e| PipelineError::Io {
        context: format!("reading scene file '{}'", path),
        source: e,
    })?;
    let doc: SceneDoc = serde_yaml::from_str(&content).map_err(|e| PipelineError::Yaml {
        context: format!("parsing scene file '{}'", path),
        source: e,
    })?;

    if doc.scene.trim().is_empty() {
        return Err(PipelineError::SceneStructure(format!(
            "scene file '{}' has an empty scene name",
            path
        )));
    }

    let mut tree = SceneTree::new();
    for node in &doc.nodes {
        let root = tree.add_root(&node.name, node.facets.clone());
        attach_children(&mut tree, root, &node.children);
    }
    Ok((doc.scene, tree))
}

fn attach_children(tree: &mut SceneTree, parent: NodeId, children: &[NodeDoc]) {
    for child in children {
        let id = tree.add_child(parent, &child.name, child.facets.clone());
        attach_children(tree, id, &child.children);
    }
}

/// Write a tree back to a scene file (used after batch renames).
pub fn save_scene(path: &str, scene: &str, tree: &SceneTree) -> Result<(), PipelineError> {
    let doc = SceneDoc {
        scene: scene.to_string(),
        nodes: tree.roots().iter().map(|r| to_doc(tree, *r)).collect(),
    };
    let yaml = serde_yaml::to_string(&doc).map_err(|e| PipelineError::Yaml {
        context: format!("serializing scene '{}'", scene),
        source: e,
    })?;
    std::fs::write(path, yaml).map_err(|e| PipelineError::Io {
        context: format!("writing scene file '{}'", path),
        source: e,
    })
}

fn to_doc(tree: &SceneTree, id: NodeId) -> NodeDoc {
    let node = tree.node(id);
    NodeDoc {
        name: node.name.clone(),
        facets: node.facets.clone(),
        children: node
            .children
            .iter()
            .filter(|c| tree.contains(**c))
            .map(|c| to_doc(tree, *c))
            .collect(),
    }
}
