use std::path::Path;

use crate::cli::config::parse_write_decision;
use crate::emit::emitter::{
    WriteOutcome, accessor_unit_name, emit_accessor_unit, registry_fingerprint, write_unit,
};
use crate::emit::hierarchy::compile_groups;
use crate::naming::composite::rename_scene;
use crate::regen::engine::generate_handlers;
use crate::register_scene;
use crate::scene::loader::{load_scene, save_scene};
use crate::search::index::MatchIndex;
use crate::search::snapshot::SearchSnapshot;
use crate::trace::logger::TraceLogger;
use crate::trace::trace::PipelineEvent;

// ============================================================================
// generate subcommand
// ============================================================================

pub fn cmd_generate(
    scene_path: &str,
    output_dir: &str,
    prefix: &str,
    on_conflict: &str,
    registry_out: Option<&str>,
    verbose: u8,
    logger: &TraceLogger,
) -> Result<(), Box<dyn std::error::Error>> {
    let (scene, mut tree) = load_scene(scene_path)?;
    let registry = register_scene(&mut tree, logger);

    if verbose > 0 {
        eprintln!(
            "Registered {} references across {} categories in scene '{}'",
            registry.len(),
            registry.all_categories().len(),
            scene
        );
    }

    let groups = compile_groups(&registry, logger);
    let fingerprint = registry_fingerprint(&registry);
    let unit = emit_accessor_unit(&scene, &groups, &fingerprint);

    let path = Path::new(output_dir).join(accessor_unit_name(prefix, &scene));
    let outcome = write_unit(&path, &unit, parse_write_decision(on_conflict))?;
    match outcome {
        WriteOutcome::BackedUp { ref backup } => {
            logger.log(&PipelineEvent::UnitBackedUp {
                path: path.display().to_string(),
                backup: backup.display().to_string(),
            });
            if verbose > 0 {
                eprintln!("Backed up previous unit to {}", backup.display());
            }
        }
        _ => logger.log(&PipelineEvent::UnitWritten {
            path: path.display().to_string(),
            bytes: unit.len(),
        }),
    }

    if let Some(registry_path) = registry_out {
        registry.save(registry_path)?;
        if verbose > 0 {
            eprintln!("Wrote registry snapshot: {}", registry_path);
        }
    }

    println!(
        "Generated {} ({} groups, {} references)",
        path.display(),
        groups.len(),
        registry.len()
    );
    Ok(())
}

// ============================================================================
// handlers subcommand
// ============================================================================

pub fn cmd_handlers(
    scene_path: &str,
    output_dir: &str,
    prefix: &str,
    verbose: u8,
    logger: &TraceLogger,
) -> Result<(), Box<dyn std::error::Error>> {
    let (scene, mut tree) = load_scene(scene_path)?;
    let registry = register_scene(&mut tree, logger);
    let groups = compile_groups(&registry, logger);
    let fingerprint = registry_fingerprint(&registry);

    let artifacts = generate_handlers(
        &scene,
        &groups,
        &fingerprint,
        Path::new(output_dir),
        prefix,
        logger,
    )?;

    println!("Generated {}", artifacts.machine_path.display());
    if artifacts.user_unit_created {
        println!("Created {}", artifacts.user_path.display());
    } else if verbose > 0 {
        eprintln!("Preserved {}", artifacts.user_path.display());
    }

    if !artifacts.diff.is_empty() {
        println!("Migration hints:");
        for name in &artifacts.diff.added {
            println!("  + {}", name);
        }
        for name in &artifacts.diff.removed {
            println!("  - {}", name);
        }
    }
    Ok(())
}

// ============================================================================
// rename subcommand
// ============================================================================

pub fn cmd_rename(
    scene_path: &str,
    force: bool,
    dry_run: bool,
    verbose: u8,
    logger: &TraceLogger,
) -> Result<(), Box<dyn std::error::Error>> {
    let (scene, mut tree) = load_scene(scene_path)?;
    let actions = rename_scene(&mut tree, force);

    for action in &actions {
        let path = tree.compute_path(action.node);
        logger.log(&PipelineEvent::RenameApplied {
            path: path.clone(),
            from: action.from.clone(),
            to: action.to.clone(),
        });
        if dry_run || verbose > 0 {
            println!("  {} -> {}  ({})", action.from, action.to, path);
        }
    }

    if dry_run {
        println!("{} renames (dry run, scene file untouched)", actions.len());
        return Ok(());
    }

    save_scene(scene_path, &scene, &tree)?;
    println!("Applied {} renames to {}", actions.len(), scene_path);
    Ok(())
}

// ============================================================================
// search subcommand
// ============================================================================

pub fn cmd_search(
    scene_path: &str,
    query: &str,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let (scene, tree) = load_scene(scene_path)?;

    let snapshot = SearchSnapshot::capture(&tree);
    let mut index = MatchIndex::new();
    index.set_query(query);
    index.recompute(&snapshot);

    let mut direct = 0;
    for id in tree.ids() {
        if index.is_match(id) {
            direct += 1;
            println!("{}", tree.compute_path(id));
        } else if verbose > 0 && index.subtree_matches(id) {
            eprintln!("(subtree) {}", tree.compute_path(id));
        }
    }

    println!(
        "{} of {} nodes match '{}' in scene '{}'",
        direct,
        snapshot.len(),
        query,
        scene
    );
    Ok(())
}
