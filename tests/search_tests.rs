use std::time::{Duration, Instant};

use uigen::scene::scene_model::SceneTree;
use uigen::search::debounce::QueryDebouncer;
use uigen::search::index::MatchIndex;
use uigen::search::snapshot::SearchSnapshot;

use crate::common::utils::facets;

mod common;

#[test]
fn deep_matches_propagate_to_every_ancestor() {
    let mut tree = SceneTree::new();
    let root = tree.add_root("Root", facets(&["canvas"]));
    let a = tree.add_child(root, "A", facets(&[]));
    let b = tree.add_child(a, "B_Score_Text", facets(&["text"]));

    let snapshot = SearchSnapshot::capture(&tree);
    let mut index = MatchIndex::new();
    index.set_query("score");
    index.recompute(&snapshot);

    // Only the leaf matches directly
    assert!(index.is_match(b));
    assert!(!index.is_match(a));
    assert!(!index.is_match(root));

    // The subtree answer is true the whole way up
    assert!(index.subtree_matches(b));
    assert!(index.subtree_matches(a));
    assert!(index.subtree_matches(root));

    // Ancestors of the match are force-expanded; the match itself is not
    assert!(index.should_auto_expand(root));
    assert!(index.should_auto_expand(a));
    assert!(!index.should_auto_expand(b));
}

#[test]
fn matching_is_case_insensitive_substring() {
    let mut tree = SceneTree::new();
    let root = tree.add_root("Root", facets(&["canvas"]));
    let button = tree.add_child(root, "Play_Button", facets(&["button"]));
    let text = tree.add_child(root, "Title_Text", facets(&["text"]));

    let snapshot = SearchSnapshot::capture(&tree);
    let mut index = MatchIndex::new();
    index.set_query("PLAY");
    index.recompute(&snapshot);

    assert!(index.is_match(button));
    assert!(!index.is_match(text));
}

#[test]
fn empty_query_short_circuits_to_match_everything() {
    let mut tree = SceneTree::new();
    let root = tree.add_root("Root", facets(&["canvas"]));
    let child = tree.add_child(root, "Anything", facets(&[]));

    let snapshot = SearchSnapshot::capture(&tree);
    let mut index = MatchIndex::new();
    index.set_query("");
    index.recompute(&snapshot);

    assert!(index.is_match(root));
    assert!(index.is_match(child));
    assert!(index.subtree_matches(root));
    assert!(!index.should_auto_expand(root), "nothing is forced open");
}

#[test]
fn changing_the_query_drops_every_cached_answer() {
    let mut tree = SceneTree::new();
    let root = tree.add_root("Root", facets(&["canvas"]));
    let button = tree.add_child(root, "Play_Button", facets(&["button"]));

    let snapshot = SearchSnapshot::capture(&tree);
    let mut index = MatchIndex::new();
    index.set_query("play");
    index.recompute(&snapshot);
    assert!(index.is_match(button));

    // Stale results must not leak into the new query
    index.set_query("quit");
    assert!(!index.is_match(button), "caches are cleared before recompute");
    index.recompute(&snapshot);
    assert!(!index.is_match(button));
    assert!(!index.subtree_matches(root));
}

#[test]
fn snapshot_is_detached_from_later_tree_edits() {
    let mut tree = SceneTree::new();
    let root = tree.add_root("Root", facets(&["canvas"]));
    let button = tree.add_child(root, "Play_Button", facets(&["button"]));

    let snapshot = SearchSnapshot::capture(&tree);
    tree.rename(button, "Quit_Button");

    let mut index = MatchIndex::new();
    index.set_query("play");
    index.recompute(&snapshot);
    assert!(index.is_match(button), "matching runs off the captured names");
}

// ============================================================================
// Debounce
// ============================================================================

#[test]
fn poll_holds_the_query_until_input_goes_quiet() {
    let start = Instant::now();
    let mut debouncer = QueryDebouncer::new(Duration::from_millis(250));

    debouncer.input_at("pla", start);
    assert_eq!(debouncer.poll_at(start + Duration::from_millis(100)), None);
    assert_eq!(
        debouncer.poll_at(start + Duration::from_millis(250)),
        Some("pla".to_string())
    );

    // Taken exactly once
    assert_eq!(debouncer.poll_at(start + Duration::from_millis(300)), None);
    assert!(!debouncer.has_pending());
}

#[test]
fn a_newer_keystroke_supersedes_the_pending_query() {
    let start = Instant::now();
    let mut debouncer = QueryDebouncer::new(Duration::from_millis(250));

    debouncer.input_at("pla", start);
    debouncer.input_at("play", start + Duration::from_millis(200));

    // The first query's deadline passes unanswered; the delay restarted
    assert_eq!(debouncer.poll_at(start + Duration::from_millis(300)), None);
    assert_eq!(
        debouncer.poll_at(start + Duration::from_millis(450)),
        Some("play".to_string())
    );
}

// ============================================================================
// Canonical path memo
// ============================================================================

#[test]
fn canonical_paths_follow_renames_and_reparents() {
    let mut tree = SceneTree::new();
    let root = tree.add_root("Root", facets(&["canvas"]));
    let panel = tree.add_child(root, "Menu", facets(&["image"]));
    let other = tree.add_child(root, "Other", facets(&["image"]));
    let button = tree.add_child(panel, "Play", facets(&["button"]));

    assert_eq!(tree.canonical_path(button), "Root/Menu/Play");

    tree.rename(panel, "MainMenu");
    assert_eq!(tree.canonical_path(button), "Root/MainMenu/Play");

    tree.reparent(button, other);
    assert_eq!(tree.canonical_path(button), "Root/Other/Play");
    // Memos elsewhere stay correct too
    assert_eq!(tree.canonical_path(panel), "Root/MainMenu");
}
