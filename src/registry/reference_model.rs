use std::fmt;

use serde::{Deserialize, Serialize};

use crate::scene::scene_model::InstanceKey;

// ============================================================================
// Capability: the closed set of UI roles
// ============================================================================

/// The closed set of roles a node can play, decided once by the ordered
/// classification probe (`registry::probe`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Capability {
    Button,
    Text,
    RichText,
    Toggle,
    InputField,
    Slider,
    Dropdown,
    ScrollArea,
    Image,
    RawImage,
    Panel,
    Canvas,
    CanvasGroup,
    Unknown,
}

impl Capability {
    /// Category string (one category per capability).
    pub fn name(&self) -> &'static str {
        match self {
            Capability::Button => "Button",
            Capability::Text => "Text",
            Capability::RichText => "RichText",
            Capability::Toggle => "Toggle",
            Capability::InputField => "InputField",
            Capability::Slider => "Slider",
            Capability::Dropdown => "Dropdown",
            Capability::ScrollArea => "ScrollArea",
            Capability::Image => "Image",
            Capability::RawImage => "RawImage",
            Capability::Panel => "Panel",
            Capability::Canvas => "Canvas",
            Capability::CanvasGroup => "CanvasGroup",
            Capability::Unknown => "Unknown",
        }
    }

    /// Type indicator word the normalizer appends to canonical names.
    pub fn type_word(&self) -> &'static str {
        match self {
            Capability::Unknown => "Element",
            other => other.name(),
        }
    }

    /// Known short codes for this capability's type word, matched by the
    /// normalizer's abbreviation table (case-insensitive).
    pub fn abbreviations(&self) -> &'static [&'static str] {
        match self {
            Capability::Button => &["btn"],
            Capability::Text | Capability::RichText => &["txt", "lbl"],
            Capability::Toggle => &["tgl"],
            Capability::InputField => &["inp"],
            Capability::Slider => &["sld"],
            Capability::Dropdown => &["ddl"],
            Capability::ScrollArea => &["scr"],
            Capability::Image | Capability::RawImage => &["img"],
            Capability::Panel => &["pnl"],
            _ => &[],
        }
    }

    /// Accessor property type in emitted code.
    pub fn accessor_type(&self) -> &'static str {
        match self {
            Capability::Unknown => "Element",
            other => other.name(),
        }
    }

    /// Event-handler shape, for capabilities that can fire events:
    /// (handler-name verb, parameter list, event member to wire).
    pub fn handler_shape(&self) -> Option<HandlerShape> {
        match self {
            Capability::Button => Some(HandlerShape {
                verb: "Clicked",
                params: "",
                event: "onClick",
                forward: "",
            }),
            Capability::Toggle => Some(HandlerShape {
                verb: "Toggled",
                params: "bool value",
                event: "onValueChanged",
                forward: "value",
            }),
            Capability::Slider => Some(HandlerShape {
                verb: "Changed",
                params: "float value",
                event: "onValueChanged",
                forward: "value",
            }),
            Capability::InputField => Some(HandlerShape {
                verb: "Submitted",
                params: "string value",
                event: "onEndEdit",
                forward: "value",
            }),
            Capability::Dropdown => Some(HandlerShape {
                verb: "Selected",
                params: "int index",
                event: "onValueChanged",
                forward: "index",
            }),
            _ => None,
        }
    }
}

/// Fixed per-capability event-handler shape. Arity never varies per element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerShape {
    pub verb: &'static str,
    pub params: &'static str,
    pub event: &'static str,
    pub forward: &'static str,
}

// ============================================================================
// Element reference & categories
// ============================================================================

/// One tracked UI node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementReference {
    /// Display name at capture time
    pub name: String,

    /// Slash-joined ancestor chain, root to node. Stable identity key.
    pub canonical_path: String,

    pub capability: Capability,

    /// Per-process identity; secondary lookup key, valid while the node lives
    pub instance_key: InstanceKey,

    /// String form of the capability
    pub category: String,
}

/// Named bucket of references sharing one capability.
///
/// Derived from the registry, never owned independently: paths are kept in
/// insertion (discovery) order; order across categories is unspecified.
#[derive(Debug, Clone)]
pub struct Category {
    pub capability: Capability,
    pub paths: Vec<String>,
}

// ============================================================================
// Non-fatal registry outcomes
// ============================================================================

/// Warning-level registry outcomes: the mutation was a no-op, the batch
/// continues. Every variant carries the offending path or key so the fix
/// is locatable without cross-referencing logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryWarning {
    DuplicatePath { path: String },
    DuplicateKey { path: String, key: InstanceKey },
    MalformedPath { path: String },
    MissingPath { path: String },
    MissingKey { key: InstanceKey },
}

impl fmt::Display for RegistryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryWarning::DuplicatePath { path } => {
                write!(f, "Duplicate canonical path rejected: '{}'", path)
            }
            RegistryWarning::DuplicateKey { path, key } => {
                write!(f, "Duplicate instance key {} rejected (path '{}')", key.0, path)
            }
            RegistryWarning::MalformedPath { path } => {
                write!(f, "Malformed canonical path rejected: '{}'", path)
            }
            RegistryWarning::MissingPath { path } => {
                write!(f, "No reference registered at path '{}'", path)
            }
            RegistryWarning::MissingKey { key } => {
                write!(f, "No reference registered for instance key {}", key.0)
            }
        }
    }
}
