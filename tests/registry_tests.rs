use uigen::registry::panels::PanelActivation;
use uigen::registry::probe::classify;
use uigen::registry::reference_model::{Capability, ElementReference, RegistryWarning};
use uigen::registry::registry::ReferenceRegistry;
use uigen::scene::scene_model::{InstanceKey, SceneTree};
use uigen::trace::logger::TraceLogger;

use crate::common::utils::{facets, menu_scene, temp_out_dir};

mod common;

fn reference(path: &str, key: u64, capability: Capability) -> ElementReference {
    ElementReference {
        name: path.rsplit('/').next().unwrap_or("").to_string(),
        canonical_path: path.to_string(),
        capability,
        instance_key: InstanceKey(key),
        category: capability.name().to_string(),
    }
}

// ============================================================================
// Add / remove / lookup
// ============================================================================

#[test]
fn duplicate_path_is_rejected_and_size_unchanged() {
    let (mut tree, _, button, _) = menu_scene();
    let mut registry = ReferenceRegistry::new();

    registry.add(&mut tree, button).expect("first add");
    let size = registry.len();

    let second = registry.add(&mut tree, button);
    assert!(matches!(second, Err(RegistryWarning::DuplicatePath { .. })));
    assert_eq!(registry.len(), size, "rejected add must be a no-op");
}

#[test]
fn duplicate_instance_key_is_rejected() {
    let mut registry = ReferenceRegistry::new();
    registry
        .add_reference(reference("Root/A", 1, Capability::Button))
        .unwrap();

    let clash = registry.add_reference(reference("Root/B", 1, Capability::Button));
    assert!(matches!(clash, Err(RegistryWarning::DuplicateKey { .. })));
    assert_eq!(registry.len(), 1);
}

#[test]
fn empty_path_is_rejected_with_the_offending_path() {
    let mut registry = ReferenceRegistry::new();
    let result = registry.add_reference(reference("", 1, Capability::Text));
    match result {
        Err(RegistryWarning::MalformedPath { path }) => assert_eq!(path, ""),
        other => panic!("expected MalformedPath, got {:?}", other),
    }
    assert!(registry.is_empty());
}

#[test]
fn lookup_by_path_and_by_instance_key_agree() {
    let (mut tree, _, button, _) = menu_scene();
    let mut registry = ReferenceRegistry::new();
    registry.add(&mut tree, button).unwrap();

    let path = tree.canonical_path(button);
    let by_path = registry
        .lookup(Capability::Button, &path)
        .expect("lookup by path");
    let by_key = registry
        .lookup_key(by_path.instance_key)
        .expect("lookup by key");
    assert_eq!(by_path, by_key);

    // Capability mismatch misses
    assert!(registry.lookup(Capability::Slider, &path).is_none());
}

#[test]
fn remove_clears_both_indices_and_the_category() {
    let (mut tree, _, button, _) = menu_scene();
    let mut registry = ReferenceRegistry::new();
    registry.add(&mut tree, button).unwrap();
    let path = tree.canonical_path(button);
    let key = registry.lookup_path(&path).unwrap().instance_key;

    registry.remove_by_path(&path).expect("remove");
    assert!(registry.lookup_path(&path).is_none());
    assert!(registry.lookup_key(key).is_none());
    let buttons = registry
        .all_categories()
        .iter()
        .find(|c| c.capability == Capability::Button);
    assert!(buttons.map_or(true, |c| c.paths.is_empty()));

    // Second remove warns
    assert!(matches!(
        registry.remove_by_path(&path),
        Err(RegistryWarning::MissingPath { .. })
    ));
}

#[test]
fn remove_by_key_resolves_through_the_identity_index() {
    let mut registry = ReferenceRegistry::new();
    registry
        .add_reference(reference("Root/A", 7, Capability::Toggle))
        .unwrap();

    let removed = registry.remove_by_key(InstanceKey(7)).expect("remove by key");
    assert_eq!(removed.canonical_path, "Root/A");
    assert!(matches!(
        registry.remove_by_key(InstanceKey(7)),
        Err(RegistryWarning::MissingKey { .. })
    ));
}

#[test]
fn categories_keep_insertion_order() {
    let mut registry = ReferenceRegistry::new();
    registry.add_reference(reference("R/C", 1, Capability::Button)).unwrap();
    registry.add_reference(reference("R/A", 2, Capability::Button)).unwrap();
    registry.add_reference(reference("R/B", 3, Capability::Button)).unwrap();

    let buttons = registry
        .all_categories()
        .iter()
        .find(|c| c.capability == Capability::Button)
        .expect("button category");
    assert_eq!(buttons.paths, vec!["R/C", "R/A", "R/B"]);
}

#[test]
fn registry_round_trips_through_json() {
    let dir = temp_out_dir("registry_json");
    let file = dir.join("registry.json");
    let path = file.to_str().unwrap();

    let (mut tree, _, _, _) = menu_scene();
    let registry = uigen::register_scene(&mut tree, &TraceLogger::disabled());
    registry.save(path).expect("save");

    let (reloaded, warnings) = ReferenceRegistry::load(path).expect("load");
    assert!(warnings.is_empty());
    assert_eq!(reloaded.len(), registry.len());
    for original in registry.snapshot() {
        assert_eq!(reloaded.lookup_path(&original.canonical_path), Some(original));
    }
}

// ============================================================================
// Capability probe
// ============================================================================

#[test]
fn probe_prefers_panel_over_image_for_containers() {
    let mut tree = SceneTree::new();
    let root = tree.add_root("Root", facets(&["canvas"]));

    // Image with children => Panel
    let container = tree.add_child(root, "Inventory", facets(&["image"]));
    tree.add_child(container, "Slot", facets(&["image"]));
    assert_eq!(classify(&tree, container), Capability::Panel);

    // Leaf image with a panel suffix => Panel
    let named = tree.add_child(root, "PausePanel", facets(&["image"]));
    assert_eq!(classify(&tree, named), Capability::Panel);

    // Plain leaf image stays Image
    let icon = tree.add_child(root, "Icon", facets(&["image"]));
    assert_eq!(classify(&tree, icon), Capability::Image);
}

#[test]
fn probe_orders_composites_before_their_parts() {
    let mut tree = SceneTree::new();
    let root = tree.add_root("Root", facets(&["canvas"]));

    // An input field also carries text; the composite wins
    let field = tree.add_child(root, "Name", facets(&["input_field", "image"]));
    assert_eq!(classify(&tree, field), Capability::InputField);

    let toggle = tree.add_child(root, "Mute", facets(&["toggle", "image"]));
    assert_eq!(classify(&tree, toggle), Capability::Toggle);

    let plain = tree.add_child(root, "Mystery", facets(&[]));
    assert_eq!(classify(&tree, plain), Capability::Unknown);
}

// ============================================================================
// Panel activation state machine
// ============================================================================

#[test]
fn exclusive_activation_deactivates_everything_else() {
    let mut panels = PanelActivation::new();
    panels.activate("Q", false, false);
    panels.activate("R", false, false);
    assert_eq!(panels.active_count(), 2);

    panels.activate("P", true, false);
    assert!(panels.is_active("P"));
    assert!(!panels.is_active("Q"));
    assert!(!panels.is_active("R"));
    assert_eq!(panels.active_count(), 1);
    assert_eq!(panels.last_activated(), Some("P"));
}

#[test]
fn keep_last_exempts_the_marked_panel_from_the_sweep() {
    let mut panels = PanelActivation::new();
    panels.activate("Q", false, false);
    panels.activate("R", false, false); // R is now "last activated"

    panels.activate("P", true, true);
    assert!(panels.is_active("P"));
    assert!(panels.is_active("R"));
    assert!(!panels.is_active("Q"));
    assert_eq!(panels.last_activated(), Some("P"));
}

#[test]
fn deactivate_clears_a_pointing_marker() {
    let mut panels = PanelActivation::new();
    panels.activate("P", false, false);
    panels.deactivate("P");

    assert!(!panels.is_active("P"));
    assert_eq!(panels.last_activated(), None);

    // Marker, when set, always names an active panel
    panels.activate("Q", false, false);
    panels.activate("R", false, false);
    panels.deactivate("Q");
    let marker = panels.last_activated().expect("marker survives unrelated deactivation");
    assert!(panels.is_active(marker));
}
