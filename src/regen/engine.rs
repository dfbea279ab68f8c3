use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::emit::emitter::{WriteDecision, accessor_unit_name, write_unit};
use crate::emit::hierarchy::PanelGroup;
use crate::error::PipelineError;
use crate::regen::diff::{SignatureDiff, diff_signatures};
use crate::regen::signatures::{
    HandlerSignature, current_signatures, extract_signature_names, signature_names,
};
use crate::trace::logger::TraceLogger;
use crate::trace::trace::PipelineEvent;

/// Paths and migration hints produced by one handler-generation run.
#[derive(Debug, Clone)]
pub struct HandlerArtifacts {
    pub machine_path: PathBuf,
    pub user_path: PathBuf,
    pub diff: SignatureDiff,
    pub user_unit_created: bool,
}

pub fn machine_unit_name(prefix: &str, scene: &str) -> String {
    format!("{}{}UIHandler.g.cs", prefix, scene)
}

pub fn user_unit_name(prefix: &str, scene: &str) -> String {
    format!("{}{}UIHandler.cs", prefix, scene)
}

/// Produce the two handler units for a scene.
///
/// The machine unit is fully rewritten on every run; the user unit is
/// written once and never touched again (a one-way gate checked by file
/// existence, not content). Refuses to run while the scene's accessor
/// library is missing: the emitted code would reference an undefined
/// namespace.
pub fn generate_handlers(
    scene: &str,
    groups: &[PanelGroup],
    fingerprint: &str,
    out_dir: &Path,
    prefix: &str,
    logger: &TraceLogger,
) -> Result<HandlerArtifacts, PipelineError> {
    let accessor_path = out_dir.join(accessor_unit_name(prefix, scene));
    if !accessor_path.exists() {
        logger.log(&PipelineEvent::PreconditionFailed {
            scene: scene.to_string(),
            missing: accessor_path.display().to_string(),
        });
        return Err(PipelineError::Precondition {
            scene: scene.to_string(),
            missing: accessor_path,
        });
    }

    let machine_path = out_dir.join(machine_unit_name(prefix, scene));
    let user_path = out_dir.join(user_unit_name(prefix, scene));

    let previous: Option<BTreeSet<String>> = std::fs::read_to_string(&machine_path)
        .ok()
        .map(|text| extract_signature_names(&text));

    let signatures = current_signatures(groups);
    let current = signature_names(&signatures);
    let diff = match previous {
        Some(ref prev) => diff_signatures(prev, &current),
        None => SignatureDiff::default(),
    };

    if !diff.is_empty() {
        logger.log(&PipelineEvent::SignatureDiff {
            added: diff.added.clone(),
            removed: diff.removed.clone(),
        });
    }

    let machine_text = render_machine_unit(scene, prefix, &signatures, &diff, fingerprint);
    // Rewriting the machine unit is this engine's contract
    write_unit(&machine_path, &machine_text, WriteDecision::Overwrite)?;
    logger.log(&PipelineEvent::UnitWritten {
        path: machine_path.display().to_string(),
        bytes: machine_text.len(),
    });

    let user_unit_created = if user_path.exists() {
        logger.log(&PipelineEvent::UserUnitPreserved {
            path: user_path.display().to_string(),
        });
        false
    } else {
        let user_text = render_user_unit(scene, prefix, &signatures);
        write_unit(&user_path, &user_text, WriteDecision::Cancel)?;
        logger.log(&PipelineEvent::UnitWritten {
            path: user_path.display().to_string(),
            bytes: user_text.len(),
        });
        true
    };

    Ok(HandlerArtifacts {
        machine_path,
        user_path,
        diff,
        user_unit_created,
    })
}

// ============================================================================
// Machine unit: always rewritten
// ============================================================================

fn render_machine_unit(
    scene: &str,
    prefix: &str,
    signatures: &[HandlerSignature],
    diff: &SignatureDiff,
    fingerprint: &str,
) -> String {
    let mut out = String::new();

    out.push_str("// <auto-generated>\n");
    out.push_str(&format!(
        "//     uigen handler scaffolding for scene '{}'.\n",
        scene
    ));
    out.push_str(&format!(
        "//     Regenerated on every run; hand-written logic belongs in '{}'.\n",
        user_unit_name(prefix, scene)
    ));
    out.push_str(&format!("//     registry-fingerprint: {}\n", fingerprint));
    out.push_str("// </auto-generated>\n");

    if !diff.is_empty() {
        out.push_str("//\n// MIGRATION HINTS (handler signatures changed since last generation)\n");
        if !diff.added.is_empty() {
            out.push_str(&format!("//   added:   {}\n", diff.added.join(", ")));
        }
        if !diff.removed.is_empty() {
            out.push_str(&format!("//   removed: {}\n", diff.removed.join(", ")));
        }
        out.push_str("//\n");
    }

    out.push('\n');
    out.push_str(&format!("namespace {}UI\n{{\n", scene));
    out.push_str(&format!(
        "    public partial class {}UIHandler\n    {{\n",
        scene
    ));

    out.push_str("        public void WireEvents()\n        {\n");
    for signature in signatures {
        let lambda = if signature.shape.forward.is_empty() {
            format!("() => {}()", signature.name)
        } else {
            format!(
                "{} => {}({})",
                signature.shape.forward, signature.name, signature.shape.forward
            )
        };
        out.push_str(&format!(
            "            {}.{}.AddListener({});\n",
            signature.accessor, signature.shape.event, lambda
        ));
    }
    out.push_str("        }\n");

    if !signatures.is_empty() {
        out.push('\n');
    }
    for signature in signatures {
        let annotation = if diff.added.contains(&signature.name) {
            " // new"
        } else {
            ""
        };
        out.push_str(&format!(
            "        partial void {}({});{}\n",
            signature.name, signature.shape.params, annotation
        ));
    }

    out.push_str("    }\n}\n");
    out
}

// ============================================================================
// User unit: written once, never regenerated
// ============================================================================

fn render_user_unit(scene: &str, prefix: &str, signatures: &[HandlerSignature]) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "// Hand-written handler logic for scene '{}'.\n",
        scene
    ));
    out.push_str(&format!(
        "// Created once by uigen; never overwritten. New handlers announced in\n// '{}' should be stubbed here by hand.\n",
        machine_unit_name(prefix, scene)
    ));
    out.push('\n');
    out.push_str(&format!("namespace {}UI\n{{\n", scene));
    out.push_str(&format!(
        "    public partial class {}UIHandler\n    {{\n",
        scene
    ));

    out.push_str("        // Fixed extension points\n");
    out.push_str("        void Initialize()\n        {\n        }\n\n");
    out.push_str("        void Cleanup()\n        {\n        }\n");

    for signature in signatures {
        out.push('\n');
        out.push_str(&format!(
            "        partial void {}({})\n        {{\n            // TODO: implement {}\n        }}\n",
            signature.name, signature.shape.params, signature.name
        ));
    }

    out.push_str("    }\n}\n");
    out
}
