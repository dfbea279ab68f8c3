use std::collections::BTreeSet;

use uigen::emit::emitter::{accessor_unit_name, emit_accessor_unit, registry_fingerprint, write_unit, WriteDecision};
use uigen::emit::hierarchy::compile_groups;
use uigen::error::PipelineError;
use uigen::regen::diff::diff_signatures;
use uigen::regen::engine::{generate_handlers, machine_unit_name, user_unit_name};
use uigen::regen::signatures::{
    current_signatures, extract_signature_names, signature_name, signature_names,
};
use uigen::registry::reference_model::{Capability, ElementReference};
use uigen::registry::registry::ReferenceRegistry;
use uigen::scene::scene_model::InstanceKey;
use uigen::trace::logger::TraceLogger;

use crate::common::utils::{menu_registry, temp_out_dir};

mod common;

fn names(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn add(registry: &mut ReferenceRegistry, name: &str, path: &str, key: u64, capability: Capability) {
    registry
        .add_reference(ElementReference {
            name: name.to_string(),
            canonical_path: path.to_string(),
            capability,
            instance_key: InstanceKey(key),
            category: capability.name().to_string(),
        })
        .expect("add reference");
}

// ============================================================================
// Signature derivation and diffing
// ============================================================================

#[test]
fn signature_names_drop_the_trailing_type_word() {
    assert_eq!(
        signature_name("Main_Menu_Panel_Play_Button", "Clicked", Capability::Button),
        "OnMainMenuPanelPlayClicked"
    );
    assert_eq!(
        signature_name("Mute_Toggle", "Toggled", Capability::Toggle),
        "OnMuteToggled"
    );
    // A bare type word keeps itself; the name must not go empty
    assert_eq!(
        signature_name("Button", "Clicked", Capability::Button),
        "OnButtonClicked"
    );
}

#[test]
fn diff_is_a_pure_set_difference() {
    let previous = names(&["OnAClicked", "OnBClicked"]);
    let current = names(&["OnBClicked", "OnCClicked"]);

    let diff = diff_signatures(&previous, &current);
    assert_eq!(diff.added, vec!["OnCClicked"]);
    assert_eq!(diff.removed, vec!["OnAClicked"]);

    let same = diff_signatures(&current, &current);
    assert!(same.is_empty());
}

#[test]
fn only_event_bearing_capabilities_produce_signatures() {
    let registry = menu_registry();
    let groups = compile_groups(&registry, &TraceLogger::disabled());
    let signatures = current_signatures(&groups);

    // The panel and the title text have no handler shape; the button does
    assert_eq!(signatures.len(), 1);
    assert_eq!(signatures[0].name, "OnMainMenuPanelPlayClicked");
    assert_eq!(signatures[0].accessor, "UI.MainMenu.Play_Button");
}

#[test]
fn previous_names_are_recovered_from_the_machine_unit_text() {
    let registry = menu_registry();
    let groups = compile_groups(&registry, &TraceLogger::disabled());
    let dir = temp_out_dir("regen_extract");

    write_unit(
        &dir.join(accessor_unit_name("UI", "MainMenu")),
        &emit_accessor_unit("MainMenu", &groups, "0"),
        WriteDecision::Overwrite,
    )
    .unwrap();
    let artifacts = generate_handlers(
        "MainMenu",
        &groups,
        "0",
        &dir,
        "UI",
        &TraceLogger::disabled(),
    )
    .unwrap();

    let text = std::fs::read_to_string(&artifacts.machine_path).unwrap();
    let extracted = extract_signature_names(&text);
    assert_eq!(extracted, signature_names(&current_signatures(&groups)));
}

// ============================================================================
// Generation engine
// ============================================================================

#[test]
fn missing_accessor_unit_blocks_generation() {
    let registry = menu_registry();
    let groups = compile_groups(&registry, &TraceLogger::disabled());
    let dir = temp_out_dir("regen_precondition");

    let result = generate_handlers(
        "MainMenu",
        &groups,
        "0",
        &dir,
        "UI",
        &TraceLogger::disabled(),
    );
    match result {
        Err(PipelineError::Precondition { scene, missing }) => {
            assert_eq!(scene, "MainMenu");
            assert!(missing.ends_with("UIMainMenu.cs"));
        }
        other => panic!("expected a precondition failure, got {:?}", other.map(|_| ())),
    }
    assert!(!dir.join(machine_unit_name("UI", "MainMenu")).exists());
}

#[test]
fn regeneration_is_stable_and_preserves_the_user_unit() {
    let registry = menu_registry();
    let fingerprint = registry_fingerprint(&registry);
    let groups = compile_groups(&registry, &TraceLogger::disabled());
    let dir = temp_out_dir("regen_stable");
    let logger = TraceLogger::disabled();

    write_unit(
        &dir.join(accessor_unit_name("UI", "MainMenu")),
        &emit_accessor_unit("MainMenu", &groups, &fingerprint),
        WriteDecision::Overwrite,
    )
    .unwrap();

    let first = generate_handlers("MainMenu", &groups, &fingerprint, &dir, "UI", &logger).unwrap();
    assert!(first.user_unit_created);
    assert!(first.diff.is_empty(), "first run has nothing to diff against");

    let machine_text = std::fs::read_to_string(&first.machine_path).unwrap();
    assert!(machine_text.contains("UI.MainMenu.Play_Button.onClick.AddListener(() => OnMainMenuPanelPlayClicked())"));
    assert!(machine_text.contains("partial void OnMainMenuPanelPlayClicked();"));
    assert!(!machine_text.contains("MIGRATION HINTS"));

    // Put hand-written content into the user unit; it must survive
    let sentinel = "// my hand-written handlers\n";
    std::fs::write(&first.user_path, sentinel).unwrap();

    let second = generate_handlers("MainMenu", &groups, &fingerprint, &dir, "UI", &logger).unwrap();
    assert!(!second.user_unit_created);
    assert!(second.diff.is_empty());
    assert_eq!(
        std::fs::read_to_string(&second.machine_path).unwrap(),
        machine_text,
        "unchanged registry must regenerate identical bytes"
    );
    assert_eq!(std::fs::read_to_string(&second.user_path).unwrap(), sentinel);
}

#[test]
fn signature_changes_surface_as_migration_hints() {
    let mut registry = menu_registry();
    let groups = compile_groups(&registry, &TraceLogger::disabled());
    let dir = temp_out_dir("regen_hints");
    let logger = TraceLogger::disabled();

    write_unit(
        &dir.join(accessor_unit_name("UI", "MainMenu")),
        &emit_accessor_unit("MainMenu", &groups, "0"),
        WriteDecision::Overwrite,
    )
    .unwrap();
    generate_handlers("MainMenu", &groups, "0", &dir, "UI", &logger).unwrap();

    // A toggle appears in the registry between runs
    add(
        &mut registry,
        "Main_Menu_Panel_Mute_Toggle",
        "Root/Main_Menu_Panel/Main_Menu_Panel_Mute_Toggle",
        50,
        Capability::Toggle,
    );
    let groups = compile_groups(&registry, &TraceLogger::disabled());

    let artifacts = generate_handlers("MainMenu", &groups, "1", &dir, "UI", &logger).unwrap();
    assert_eq!(artifacts.diff.added, vec!["OnMainMenuPanelMuteToggled"]);
    assert!(artifacts.diff.removed.is_empty());

    let text = std::fs::read_to_string(&artifacts.machine_path).unwrap();
    assert!(text.contains("MIGRATION HINTS"));
    assert!(text.contains("//   added:   OnMainMenuPanelMuteToggled"));
    assert!(text.contains("partial void OnMainMenuPanelMuteToggled(bool value); // new"));
    assert!(text.contains("value => OnMainMenuPanelMuteToggled(value)"));
}

#[test]
fn user_unit_stubs_every_current_signature_once() {
    let registry = menu_registry();
    let groups = compile_groups(&registry, &TraceLogger::disabled());
    let dir = temp_out_dir("regen_user_unit");

    write_unit(
        &dir.join(accessor_unit_name("UI", "MainMenu")),
        &emit_accessor_unit("MainMenu", &groups, "0"),
        WriteDecision::Overwrite,
    )
    .unwrap();
    let artifacts = generate_handlers(
        "MainMenu",
        &groups,
        "0",
        &dir,
        "UI",
        &TraceLogger::disabled(),
    )
    .unwrap();

    assert_eq!(
        artifacts.user_path,
        dir.join(user_unit_name("UI", "MainMenu"))
    );
    let text = std::fs::read_to_string(&artifacts.user_path).unwrap();
    assert!(text.contains("void Initialize()"));
    assert!(text.contains("void Cleanup()"));
    assert!(text.contains("partial void OnMainMenuPanelPlayClicked()"));
    assert_eq!(text.matches("OnMainMenuPanelPlayClicked").count(), 2, "stub body names its handler once");
}
