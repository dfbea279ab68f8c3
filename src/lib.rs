use crate::registry::reference_model::{Capability, RegistryWarning};
use crate::registry::registry::ReferenceRegistry;
use crate::scene::scene_model::SceneTree;
use crate::trace::{logger::TraceLogger, trace::PipelineEvent};

pub mod cli;
pub mod emit;
pub mod error;
pub mod naming;
pub mod regen;
pub mod registry;
pub mod scene;
pub mod search;
pub mod trace;

/// Build a registry from every classifiable node in a scene.
///
/// Unknown nodes and bare canvases are not tracked; duplicate or malformed
/// entries are logged and skipped so the rest of the batch completes.
pub fn register_scene(tree: &mut SceneTree, logger: &TraceLogger) -> ReferenceRegistry {
    let mut registry = ReferenceRegistry::new();
    for id in tree.ids() {
        let capability = registry::probe::classify(tree, id);
        if matches!(capability, Capability::Unknown | Capability::Canvas) {
            continue;
        }
        if let Err(warning) = registry.add(tree, id) {
            eprintln!("Warning: {}", warning);
            logger.log(&warning_event(&warning));
        }
    }
    registry
}

/// Map a non-fatal registry outcome to its trace event.
pub fn warning_event(warning: &RegistryWarning) -> PipelineEvent {
    match warning {
        RegistryWarning::DuplicatePath { path } => {
            PipelineEvent::DuplicateRejected { path: path.clone() }
        }
        RegistryWarning::DuplicateKey { path, key } => PipelineEvent::DuplicateKeyRejected {
            path: path.clone(),
            key: key.0,
        },
        RegistryWarning::MalformedPath { path } => {
            PipelineEvent::MalformedPathSkipped { path: path.clone() }
        }
        RegistryWarning::MissingPath { path } => {
            PipelineEvent::RemoveMiss { path: path.clone() }
        }
        RegistryWarning::MissingKey { key } => PipelineEvent::RemoveMiss {
            path: format!("<instance key {}>", key.0),
        },
    }
}
