use std::collections::BTreeMap;

use crate::registry::reference_model::{Capability, ElementReference};
use crate::registry::registry::ReferenceRegistry;
use crate::trace::logger::TraceLogger;
use crate::trace::trace::PipelineEvent;

/// Group key for references whose canonical name yields no words at all.
pub const DEFAULT_GROUP: &str = "Common";

/// The literal word the grouping rule scans for.
const PANEL_WORD: &str = "Panel";

/// One panel scope in the compiled hierarchy: an optional Panel-capability
/// reference plus the non-panel elements bucketed under the same key.
#[derive(Debug, Clone)]
pub struct PanelGroup {
    pub key: String,
    pub panel: Option<ElementReference>,

    /// Sorted by capability name, then canonical name
    pub elements: Vec<ElementReference>,
}

/// Split a canonical name into (group key, remainder).
///
/// Grouping is name-driven, not tree-structure-driven: the underscore words
/// before the literal word `Panel` (joined with no separator) form the key;
/// with no `Panel` word the first word is the key; an empty name falls back
/// to the default group. The remainder is what the accessor property will
/// be named from.
pub fn split_group(name: &str) -> (String, String) {
    let words: Vec<&str> = name.split('_').filter(|w| !w.is_empty()).collect();
    if words.is_empty() {
        return (DEFAULT_GROUP.to_string(), String::new());
    }
    if let Some(i) = words.iter().position(|w| *w == PANEL_WORD) {
        let prefix: String = words[..i].concat();
        if !prefix.is_empty() {
            return (prefix, words[i + 1..].join("_"));
        }
    }
    (words[0].to_string(), words[1..].join("_"))
}

pub fn group_key(name: &str) -> String {
    split_group(name).0
}

/// Accessor property name for an element: its canonical name with the
/// group-key prefix (and the `Panel` word that closed it) stripped. An
/// element whose whole name was consumed by the prefix keeps its full name.
pub fn property_name(element_name: &str) -> String {
    let (_, rest) = split_group(element_name);
    if rest.is_empty() {
        element_name.to_string()
    } else {
        rest
    }
}

/// Compile a registry snapshot into panel groups, sorted lexicographically
/// by key. Malformed paths are skipped with a warning; a group left with
/// zero non-panel elements still emits.
pub fn compile_groups(registry: &ReferenceRegistry, logger: &TraceLogger) -> Vec<PanelGroup> {
    let mut groups: BTreeMap<String, PanelGroup> = BTreeMap::new();

    for category in registry.all_categories() {
        for path in &category.paths {
            let Some(reference) = registry.lookup_path(path) else {
                logger.log(&PipelineEvent::LookupMiss { path: path.clone() });
                continue;
            };
            if reference.canonical_path.trim().is_empty() {
                logger.log(&PipelineEvent::MalformedPathSkipped {
                    path: reference.canonical_path.clone(),
                });
                continue;
            }

            let (key, _) = split_group(&reference.name);
            let group = groups.entry(key.clone()).or_insert_with(|| PanelGroup {
                key,
                panel: None,
                elements: Vec::new(),
            });

            // The first Panel reference claims the group's lifecycle slot;
            // further panels with the same key stay plain elements (the
            // name-driven grouping heuristic is not collision-checked).
            if reference.capability == Capability::Panel && group.panel.is_none() {
                group.panel = Some(reference.clone());
            } else {
                group.elements.push(reference.clone());
            }
        }
    }

    let mut compiled: Vec<PanelGroup> = groups.into_values().collect();
    for group in &mut compiled {
        group
            .elements
            .sort_by(|a, b| (a.capability.name(), &a.name).cmp(&(b.capability.name(), &b.name)));
        logger.log(&PipelineEvent::GroupCompiled {
            key: group.key.clone(),
            elements: group.elements.len(),
        });
    }
    compiled
}
