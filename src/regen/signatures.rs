use std::collections::BTreeSet;

use crate::emit::hierarchy::{PanelGroup, property_name};
use crate::registry::reference_model::{Capability, HandlerShape};

/// The declaration marker scanned for in a previous machine unit. This is
/// deliberately a lightweight pattern match, not a parse.
const DECLARATION_MARKER: &str = "partial void ";

/// One expected event handler, named deterministically from capability +
/// canonical element name; arity is fixed per capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerSignature {
    pub name: String,
    pub capability: Capability,
    pub shape: HandlerShape,

    /// Dot-path accessor the wiring statement goes through, e.g.
    /// `UI.MainMenu.Play_Button`
    pub accessor: String,
}

/// Compute the signature set the current registry implies, sorted by name.
pub fn current_signatures(groups: &[PanelGroup]) -> Vec<HandlerSignature> {
    let mut signatures = Vec::new();
    for group in groups {
        for element in &group.elements {
            let Some(shape) = element.capability.handler_shape() else {
                continue;
            };
            signatures.push(HandlerSignature {
                name: signature_name(&element.name, shape.verb, element.capability),
                capability: element.capability,
                shape,
                accessor: format!("UI.{}.{}", group.key, property_name(&element.name)),
            });
        }
    }
    signatures.sort_by(|a, b| a.name.cmp(&b.name));
    signatures
}

/// Handler name: `On` + the canonical name's words (trailing type word
/// dropped) concatenated + the capability's event verb.
pub fn signature_name(canonical_name: &str, verb: &str, capability: Capability) -> String {
    let mut words: Vec<&str> = canonical_name.split('_').filter(|w| !w.is_empty()).collect();
    if words.last() == Some(&capability.type_word()) && words.len() > 1 {
        words.pop();
    }
    format!("On{}{}", words.concat(), verb)
}

pub fn signature_names(signatures: &[HandlerSignature]) -> BTreeSet<String> {
    signatures.iter().map(|s| s.name.clone()).collect()
}

/// Extract previously-declared handler names from an old machine unit's
/// text by scanning for the declaration marker.
pub fn extract_signature_names(machine_text: &str) -> BTreeSet<String> {
    machine_text
        .lines()
        .filter_map(|line| {
            let rest = line.trim().strip_prefix(DECLARATION_MARKER)?;
            let name = rest.split('(').next()?.trim();
            if name.is_empty() {
                None
            } else {
                Some(name.to_string())
            }
        })
        .collect()
}
