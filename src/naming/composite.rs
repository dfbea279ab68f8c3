use std::collections::HashSet;

use crate::naming::normalizer::normalize;
use crate::registry::probe::classify;
use crate::registry::reference_model::Capability;
use crate::scene::scene_model::{ChildRole, NodeId, SceneTree};

/// One applied rename, for tracing and dry runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameAction {
    pub node: NodeId,
    pub from: String,
    pub to: String,
}

/// Capabilities whose sub-tree is owned by the widget itself: their internal
/// parts are renamed in lock-step with the parent and never treated as
/// independent elements.
fn owns_subtree(capability: Capability) -> bool {
    matches!(
        capability,
        Capability::InputField
            | Capability::Dropdown
            | Capability::Slider
            | Capability::ScrollArea
            | Capability::Toggle
            | Capability::Button
    )
}

/// Capabilities the default descendant pass must not descend into: their
/// parts are renamed by their own expansion, not by an ancestor's.
fn competing(capability: Capability) -> bool {
    owns_subtree(capability) || capability == Capability::Panel
}

// ============================================================================
// Batch rename
// ============================================================================

/// Standardize every element name in the scene: normalize each node that
/// carries a capability, then rename composite sub-trees using the parent's
/// canonical name as the base. Returns the applied renames, top-down.
pub fn rename_scene(tree: &mut SceneTree, force: bool) -> Vec<RenameAction> {
    let mut actions = Vec::new();
    let mut handled: HashSet<NodeId> = HashSet::new();

    // Parents first, so composite bases are already canonical when the
    // children are renamed.
    let roots = tree.roots().to_vec();
    let order: Vec<NodeId> = roots.iter().flat_map(|r| tree.subtree_ids(*r)).collect();

    for id in order {
        if handled.contains(&id) || !tree.contains(id) {
            continue;
        }
        let capability = classify(tree, id);
        if matches!(capability, Capability::Unknown | Capability::Canvas) {
            continue;
        }

        let canonical = normalize(&tree.node(id).name, capability, force);
        rename_to(tree, id, &canonical, &mut actions);
        expand(tree, id, capability, &canonical, &mut handled, &mut actions);
    }

    actions
}

/// Rename the fixed sub-tree a composite widget owns, using the parent's
/// canonical name as base. When the parent's base name was exactly its type
/// word, the canonical name is the bare type word and children come out as
/// `<Type>_<Part>` with no duplication.
///
/// Claimed parts are marked handled even when their name was already
/// canonical, so a repeated pass never re-normalizes them as standalone
/// elements. Anything else in the sub-tree (widgets nested in scroll
/// content, say) still gets its own pass.
pub fn expand(
    tree: &mut SceneTree,
    id: NodeId,
    capability: Capability,
    base: &str,
    handled: &mut HashSet<NodeId>,
    actions: &mut Vec<RenameAction>,
) {
    match capability {
        Capability::InputField => expand_input_field(tree, id, base, handled, actions),
        Capability::Toggle => expand_toggle(tree, id, base, handled, actions),
        Capability::Dropdown => expand_dropdown(tree, id, base, handled, actions),
        Capability::Slider => expand_slider(tree, id, base, handled, actions),
        Capability::ScrollArea => expand_scroll_area(tree, id, base, handled, actions),
        _ => expand_default(tree, id, base, handled, actions),
    }
}

// ============================================================================
// Per-capability expansions
// ============================================================================

fn expand_input_field(
    tree: &mut SceneTree,
    id: NodeId,
    base: &str,
    handled: &mut HashSet<NodeId>,
    actions: &mut Vec<RenameAction>,
) {
    let nodes = descendants(tree, id);

    // Explicit role wins; the name heuristic is the fallback
    let placeholder = nodes
        .iter()
        .copied()
        .find(|d| tree.node(*d).facets.role == Some(ChildRole::Placeholder))
        .or_else(|| {
            nodes
                .iter()
                .copied()
                .find(|d| is_texty(tree, *d) && part_contains(tree, *d, base, "placeholder"))
        });

    let text_value = nodes
        .iter()
        .copied()
        .find(|d| tree.node(*d).facets.role == Some(ChildRole::TextValue))
        .or_else(|| {
            nodes
                .iter()
                .copied()
                .find(|d| is_texty(tree, *d) && Some(*d) != placeholder)
        });

    if let Some(p) = placeholder {
        claim(tree, p, &part_name(base, "Placeholder"), handled, actions);
    }
    if let Some(t) = text_value {
        claim(tree, t, &part_name(base, "Text"), handled, actions);
    }
}

fn expand_toggle(
    tree: &mut SceneTree,
    id: NodeId,
    base: &str,
    handled: &mut HashSet<NodeId>,
    actions: &mut Vec<RenameAction>,
) {
    let nodes = descendants(tree, id);

    if let Some(graphic) = nodes.iter().copied().find(|d| {
        let f = &tree.node(*d).facets;
        f.image || f.raw_image
    }) {
        claim(tree, graphic, &part_name(base, "Checkmark"), handled, actions);
    }

    let mut label_index = 0;
    for d in nodes {
        if is_texty(tree, d) {
            label_index += 1;
            let part = if label_index == 1 {
                "Label".to_string()
            } else {
                format!("Label{}", label_index)
            };
            claim(tree, d, &part_name(base, &part), handled, actions);
        }
    }
}

fn expand_dropdown(
    tree: &mut SceneTree,
    id: NodeId,
    base: &str,
    handled: &mut HashSet<NodeId>,
    actions: &mut Vec<RenameAction>,
) {
    let template = descendants(tree, id)
        .into_iter()
        .find(|d| part_contains(tree, *d, base, "template"));

    // Template internals first: matching runs on captured names
    if let Some(t) = template {
        for d in descendants(tree, t) {
            let key = part_key(tree, d, base);
            if key.contains("scrollbar") {
                claim(tree, d, &part_name(base, "Template_Scrollbar"), handled, actions);
            } else if key.contains("viewport") {
                claim(tree, d, &part_name(base, "Template_Viewport"), handled, actions);
            } else if key.contains("content") {
                claim(tree, d, &part_name(base, "Template_Content"), handled, actions);
            }
        }
        claim(tree, t, &part_name(base, "Template"), handled, actions);
    }

    for d in descendants(tree, id) {
        if handled.contains(&d) {
            continue;
        }
        if part_contains(tree, d, base, "label") {
            claim(tree, d, &part_name(base, "Label"), handled, actions);
        } else if part_contains(tree, d, base, "arrow") {
            claim(tree, d, &part_name(base, "Arrow"), handled, actions);
        }
    }
}

fn expand_slider(
    tree: &mut SceneTree,
    id: NodeId,
    base: &str,
    handled: &mut HashSet<NodeId>,
    actions: &mut Vec<RenameAction>,
) {
    let mut handle = None;
    for d in descendants(tree, id) {
        let lower = part_key(tree, d, base);
        if lower.contains("fill") && lower.contains("area") {
            claim(tree, d, &part_name(base, "FillArea"), handled, actions);
        } else if lower.contains("fill") {
            claim(tree, d, &part_name(base, "Fill"), handled, actions);
        } else if lower.contains("handle") && lower.contains("slide") {
            claim(tree, d, &part_name(base, "HandleSlideArea"), handled, actions);
        } else if lower.contains("handle") {
            handle = Some(d);
        }
    }

    if let Some(h) = handle {
        // The handle's slide-area parent, when distinct from the slider root
        if let Some(parent) = tree.node(h).parent {
            if parent != id && !handled.contains(&parent) {
                claim(tree, parent, &part_name(base, "HandleSlideArea"), handled, actions);
            }
        }
        claim(tree, h, &part_name(base, "Handle"), handled, actions);
    }
}

fn expand_scroll_area(
    tree: &mut SceneTree,
    id: NodeId,
    base: &str,
    handled: &mut HashSet<NodeId>,
    actions: &mut Vec<RenameAction>,
) {
    for d in descendants(tree, id) {
        let lower = part_key(tree, d, base);
        if lower.contains("scrollbar") && lower.contains("horizontal") {
            claim(tree, d, &part_name(base, "ScrollbarHorizontal"), handled, actions);
        } else if lower.contains("scrollbar") && lower.contains("vertical") {
            claim(tree, d, &part_name(base, "ScrollbarVertical"), handled, actions);
        } else if lower.contains("viewport") {
            claim(tree, d, &part_name(base, "Viewport"), handled, actions);
        } else if lower.contains("content") {
            claim(tree, d, &part_name(base, "Content"), handled, actions);
        }
    }
}

/// Default pass: rename contained Text/Image descendants relative to the
/// parent base, stopping at any descendant that owns a competing
/// capability (its own expansion renames its parts).
fn expand_default(
    tree: &mut SceneTree,
    id: NodeId,
    base: &str,
    handled: &mut HashSet<NodeId>,
    actions: &mut Vec<RenameAction>,
) {
    let mut text_index = 0;
    let mut image_index = 0;
    let mut stack: Vec<NodeId> = tree.node(id).children.clone();
    stack.reverse();

    while let Some(d) = stack.pop() {
        if !tree.contains(d) {
            continue;
        }
        let capability = classify(tree, d);
        if competing(capability) {
            continue;
        }
        match capability {
            Capability::Text | Capability::RichText => {
                text_index += 1;
                let part = numbered("Text", text_index);
                claim(tree, d, &part_name(base, &part), handled, actions);
            }
            Capability::Image | Capability::RawImage => {
                image_index += 1;
                let part = numbered("Image", image_index);
                claim(tree, d, &part_name(base, &part), handled, actions);
            }
            _ => {}
        }
        let mut children = tree.node(d).children.clone();
        children.reverse();
        stack.extend(children);
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn part_name(base: &str, part: &str) -> String {
    if base.is_empty() {
        part.to_string()
    } else {
        format!("{}_{}", base, part)
    }
}

fn numbered(part: &str, index: usize) -> String {
    if index == 1 {
        part.to_string()
    } else {
        format!("{}{}", part, index)
    }
}

fn descendants(tree: &SceneTree, id: NodeId) -> Vec<NodeId> {
    tree.subtree_ids(id).into_iter().skip(1).collect()
}

fn is_texty(tree: &SceneTree, id: NodeId) -> bool {
    let f = &tree.node(id).facets;
    f.text || f.rich_text
}

/// Keyword key for part matching: the composite's base prefix is stripped
/// from the name first, so base words (a slider's own `Slider`, a dropdown
/// named after its template) never collide with part keywords on a
/// repeated pass.
fn part_key(tree: &SceneTree, id: NodeId, base: &str) -> String {
    let name = tree.node(id).name.as_str();
    let rest = name
        .strip_prefix(base)
        .map(|r| r.trim_start_matches('_'))
        .filter(|r| !r.is_empty())
        .unwrap_or(name);
    rest.to_lowercase()
}

fn part_contains(tree: &SceneTree, id: NodeId, base: &str, needle: &str) -> bool {
    part_key(tree, id, base).contains(needle)
}

/// Mark a part as owned by its composite, renaming it if its current name
/// is not already the target.
fn claim(
    tree: &mut SceneTree,
    id: NodeId,
    to: &str,
    handled: &mut HashSet<NodeId>,
    actions: &mut Vec<RenameAction>,
) {
    handled.insert(id);
    rename_to(tree, id, to, actions);
}

fn rename_to(tree: &mut SceneTree, id: NodeId, to: &str, actions: &mut Vec<RenameAction>) {
    let from = tree.node(id).name.clone();
    if from != to {
        tree.rename(id, to);
        actions.push(RenameAction {
            node: id,
            from,
            to: to.to_string(),
        });
    }
}
