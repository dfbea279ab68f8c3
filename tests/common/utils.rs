use std::path::PathBuf;

use uigen::registry::registry::ReferenceRegistry;
use uigen::scene::scene_model::{NodeFacets, NodeId, SceneTree};
use uigen::trace::logger::TraceLogger;

/// Build facets from flag names ("button", "image", "text", ...).
pub fn facets(flags: &[&str]) -> NodeFacets {
    let mut f = NodeFacets::default();
    for flag in flags {
        match *flag {
            "button" => f.button = true,
            "image" => f.image = true,
            "raw_image" => f.raw_image = true,
            "text" => f.text = true,
            "rich_text" => f.rich_text = true,
            "toggle" => f.toggle = true,
            "input_field" => f.input_field = true,
            "slider" => f.slider = true,
            "dropdown" => f.dropdown = true,
            "scroll_area" => f.scroll_area = true,
            "canvas" => f.canvas = true,
            "canvas_group" => f.canvas_group = true,
            other => panic!("unknown facet flag '{}'", other),
        }
    }
    f
}

/// The menu scene used across tests: a canvas root holding a panel with a
/// play button and a title text.
///
/// Returns (tree, panel id, button id, title id).
pub fn menu_scene() -> (SceneTree, NodeId, NodeId, NodeId) {
    let mut tree = SceneTree::new();
    let root = tree.add_root("Root", facets(&["canvas"]));
    let panel = tree.add_child(root, "Main_Menu_Panel", facets(&["image"]));
    let button = tree.add_child(panel, "Main_Menu_Panel_Play_Button", facets(&["button"]));
    let title = tree.add_child(panel, "Main_Menu_Panel_Title_Text", facets(&["text"]));
    (tree, panel, button, title)
}

/// Registry built from the menu scene.
pub fn menu_registry() -> ReferenceRegistry {
    let (mut tree, _, _, _) = menu_scene();
    uigen::register_scene(&mut tree, &TraceLogger::disabled())
}

/// Fresh per-test output directory under the system temp dir.
pub fn temp_out_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("uigen_test_{}_{}", tag, std::process::id()));
    if dir.exists() {
        std::fs::remove_dir_all(&dir).expect("clearing stale test output dir");
    }
    std::fs::create_dir_all(&dir).expect("creating test output dir");
    dir
}
