use std::collections::HashMap;

use crate::error::PipelineError;
use crate::registry::probe::classify;
use crate::registry::reference_model::{
    Capability, Category, ElementReference, RegistryWarning,
};
use crate::scene::scene_model::{InstanceKey, NodeId, SceneTree};

/// Canonical mapping of UI elements to stable keys and categories.
///
/// The only persisted state in the pipeline. Mutations are idempotent-safe
/// to retry: duplicates and misses are warnings, never silent merges.
#[derive(Debug, Clone, Default)]
pub struct ReferenceRegistry {
    by_path: HashMap<String, ElementReference>,

    /// Parallel identity index: O(1) lookup without re-walking the tree
    key_to_path: HashMap<InstanceKey, String>,

    /// Categories in discovery order; paths within a category keep
    /// insertion order
    categories: Vec<Category>,
}

impl ReferenceRegistry {
    pub fn new() -> Self {
        ReferenceRegistry::default()
    }

    /// Register a node: compute its canonical path, classify it via the
    /// ordered probe, and insert. Rejects empty paths and duplicates on
    /// either index; the rejected mutation is a no-op.
    pub fn add(&mut self, tree: &mut SceneTree, id: NodeId) -> Result<Capability, RegistryWarning> {
        let capability = classify(tree, id);
        let path = tree.canonical_path(id);
        let node = tree.node(id);
        let reference = ElementReference {
            name: node.name.clone(),
            canonical_path: path,
            capability,
            instance_key: node.key,
            category: capability.name().to_string(),
        };
        self.add_reference(reference)?;
        Ok(capability)
    }

    /// Insert a pre-built reference (persistence reload, tests).
    pub fn add_reference(&mut self, reference: ElementReference) -> Result<(), RegistryWarning> {
        let path = reference.canonical_path.clone();
        if path.trim().is_empty() {
            return Err(RegistryWarning::MalformedPath { path });
        }
        if self.by_path.contains_key(&path) {
            return Err(RegistryWarning::DuplicatePath { path });
        }
        if self.key_to_path.contains_key(&reference.instance_key) {
            return Err(RegistryWarning::DuplicateKey {
                path,
                key: reference.instance_key,
            });
        }

        self.key_to_path.insert(reference.instance_key, path.clone());
        self.category_mut(reference.capability).paths.push(path.clone());
        self.by_path.insert(path, reference);
        Ok(())
    }

    pub fn remove_by_path(&mut self, path: &str) -> Result<ElementReference, RegistryWarning> {
        let reference = self
            .by_path
            .remove(path)
            .ok_or_else(|| RegistryWarning::MissingPath {
                path: path.to_string(),
            })?;
        self.key_to_path.remove(&reference.instance_key);
        if let Some(category) = self
            .categories
            .iter_mut()
            .find(|c| c.capability == reference.capability)
        {
            category.paths.retain(|p| p != path);
        }
        Ok(reference)
    }

    pub fn remove_by_key(&mut self, key: InstanceKey) -> Result<ElementReference, RegistryWarning> {
        let path = self
            .key_to_path
            .get(&key)
            .cloned()
            .ok_or(RegistryWarning::MissingKey { key })?;
        self.remove_by_path(&path)
    }

    /// O(1) lookup by canonical path, checked against the expected capability.
    ///
    /// A miss returns `None`, never an error; reporting it is the caller's
    /// job (the group compiler logs a `LookupMiss` trace event and moves
    /// on). Same contract for `lookup_path` and `lookup_key`.
    pub fn lookup(&self, capability: Capability, path: &str) -> Option<&ElementReference> {
        self.by_path
            .get(path)
            .filter(|r| r.capability == capability)
    }

    pub fn lookup_path(&self, path: &str) -> Option<&ElementReference> {
        self.by_path.get(path)
    }

    /// O(1) lookup by per-process identity via the parallel index.
    pub fn lookup_key(&self, key: InstanceKey) -> Option<&ElementReference> {
        self.key_to_path.get(&key).and_then(|p| self.by_path.get(p))
    }

    /// Live category list. Order within a category is insertion order;
    /// callers must not assume an order across categories.
    pub fn all_categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }

    /// All references, sorted by canonical path (stable snapshot order).
    pub fn snapshot(&self) -> Vec<&ElementReference> {
        let mut refs: Vec<&ElementReference> = self.by_path.values().collect();
        refs.sort_by(|a, b| a.canonical_path.cmp(&b.canonical_path));
        refs
    }

    fn category_mut(&mut self, capability: Capability) -> &mut Category {
        let i = match self.categories.iter().position(|c| c.capability == capability) {
            Some(i) => i,
            None => {
                self.categories.push(Category {
                    capability,
                    paths: Vec::new(),
                });
                self.categories.len() - 1
            }
        };
        &mut self.categories[i]
    }

    // ------------------------------------------------------------------
    // Persistence (JSON)
    // ------------------------------------------------------------------

    pub fn save(&self, path: &str) -> Result<(), PipelineError> {
        let refs: Vec<&ElementReference> = self.snapshot();
        let json = serde_json::to_string_pretty(&refs).map_err(|e| PipelineError::Json {
            context: format!("serializing registry to '{}'", path),
            source: e,
        })?;
        std::fs::write(path, json).map_err(|e| PipelineError::Io {
            context: format!("writing registry file '{}'", path),
            source: e,
        })
    }

    /// Rebuild a registry from a saved snapshot. Instance keys are restored
    /// as stored; they only stay meaningful within the process that wrote
    /// them, so reloaded registries should be re-captured before identity
    /// lookups are trusted.
    pub fn load(path: &str) -> Result<(Self, Vec<RegistryWarning>), PipelineError> {
        let content = std::fs::read_to_string(path).map_err(|e| PipelineError::Io {
            context: format!("reading registry file '{}'", path),
            source: e,
        })?;
        let refs: Vec<ElementReference> =
            serde_json::from_str(&content).map_err(|e| PipelineError::Json {
                context: format!("parsing registry file '{}'", path),
                source: e,
            })?;

        let mut registry = ReferenceRegistry::new();
        let mut warnings = Vec::new();
        for reference in refs {
            if let Err(w) = registry.add_reference(reference) {
                warnings.push(w);
            }
        }
        Ok((registry, warnings))
    }
}
