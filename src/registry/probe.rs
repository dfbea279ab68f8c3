use crate::registry::reference_model::Capability;
use crate::scene::scene_model::{NodeId, SceneTree};

/// Name suffixes that mark a node as a grouping panel.
const PANEL_SUFFIXES: [&str; 2] = ["panel", "pnl"];

/// Ordered, first-match capability probe.
///
/// Composite widgets are tested before the parts they are built from (an
/// input field also carries text; a button usually carries an image), so
/// order matters. A node carrying an image is classified Panel rather than
/// Image when it is a container: it has children, or its name ends with a
/// panel suffix.
pub fn classify(tree: &SceneTree, id: NodeId) -> Capability {
    let node = tree.node(id);
    let f = &node.facets;

    if f.input_field {
        return Capability::InputField;
    }
    if f.dropdown {
        return Capability::Dropdown;
    }
    if f.slider {
        return Capability::Slider;
    }
    if f.toggle {
        return Capability::Toggle;
    }
    if f.scroll_area {
        return Capability::ScrollArea;
    }
    if f.button {
        return Capability::Button;
    }

    let panelish = has_panel_suffix(&node.name);
    let non_leaf = !node.children.is_empty();

    if f.image {
        if non_leaf || panelish {
            return Capability::Panel;
        }
        return Capability::Image;
    }
    if f.canvas_group && (non_leaf || panelish) {
        return Capability::Panel;
    }
    if f.raw_image {
        return Capability::RawImage;
    }
    if f.rich_text {
        return Capability::RichText;
    }
    if f.text {
        return Capability::Text;
    }
    if f.canvas {
        return Capability::Canvas;
    }
    if f.canvas_group {
        return Capability::CanvasGroup;
    }

    Capability::Unknown
}

pub fn has_panel_suffix(name: &str) -> bool {
    let lower = name.trim().to_lowercase();
    PANEL_SUFFIXES.iter().any(|s| lower.ends_with(s))
}
