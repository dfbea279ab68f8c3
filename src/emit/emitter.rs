use std::path::{Path, PathBuf};

use sha1::{Digest, Sha1};

use crate::emit::hierarchy::{PanelGroup, property_name};
use crate::error::PipelineError;
use crate::registry::registry::ReferenceRegistry;

// ============================================================================
// Registry fingerprint
// ============================================================================

/// SHA-1 over the sorted registry snapshot. Embedded in generated unit
/// headers; deterministic, so repeated generation over an unchanged
/// registry stays byte-identical.
pub fn registry_fingerprint(registry: &ReferenceRegistry) -> String {
    let mut hasher = Sha1::new();
    for reference in registry.snapshot() {
        hasher.update(reference.canonical_path.as_bytes());
        hasher.update(b"|");
        hasher.update(reference.category.as_bytes());
        hasher.update(b"|");
        hasher.update(reference.name.as_bytes());
        hasher.update(b"\n");
    }
    format!("{:x}", hasher.finalize())
}

// ============================================================================
// Accessor unit
// ============================================================================

pub fn accessor_unit_name(prefix: &str, scene: &str) -> String {
    format!("{}{}.cs", prefix, scene)
}

/// Render the accessor library for one scene: a namespace holding one
/// static class per panel group, resolving elements at access time through
/// an injected registry handle (never cached beyond the generation run).
pub fn emit_accessor_unit(scene: &str, groups: &[PanelGroup], fingerprint: &str) -> String {
    let mut out = String::new();

    out.push_str("// <auto-generated>\n");
    out.push_str(&format!(
        "//     uigen accessor library for scene '{}'.\n",
        scene
    ));
    out.push_str("//     Regenerated on every run. Do not edit by hand.\n");
    out.push_str(&format!("//     registry-fingerprint: {}\n", fingerprint));
    out.push_str("// </auto-generated>\n");
    out.push_str("using System;\n\n");
    out.push_str(&format!("namespace {}UI\n{{\n", scene));

    out.push_str("    /// Resolves tracked elements by canonical path at access time.\n");
    out.push_str("    public interface IUIRegistry\n    {\n");
    out.push_str("        T Resolve<T>(string canonicalPath) where T : class;\n");
    out.push_str("        void SetActive(string canonicalPath, bool active);\n");
    out.push_str("        bool IsActive(string canonicalPath);\n");
    out.push_str("    }\n\n");

    out.push_str("    public static class UI\n    {\n");
    out.push_str("        static IUIRegistry _registry;\n\n");
    out.push_str("        public static void Bind(IUIRegistry registry)\n        {\n");
    out.push_str("            _registry = registry ?? throw new ArgumentNullException(nameof(registry));\n");
    out.push_str("        }\n\n");
    out.push_str("        static IUIRegistry Registry =>\n");
    out.push_str(&format!(
        "            _registry ?? throw new InvalidOperationException(\"{}UI.UI.Bind() must be called before use\");\n",
        scene
    ));

    for group in groups {
        out.push('\n');
        out.push_str(&format!("        public static class {}\n        {{\n", group.key));

        let mut first_member = true;
        if let Some(ref panel) = group.panel {
            first_member = false;
            out.push_str(&format!(
                "            const string PanelPath = \"{}\";\n\n",
                panel.canonical_path
            ));
            out.push_str("            public static void Show() => Registry.SetActive(PanelPath, true);\n");
            out.push_str("            public static void Hide() => Registry.SetActive(PanelPath, false);\n");
            out.push_str("            public static void Toggle() => Registry.SetActive(PanelPath, !IsVisible);\n");
            out.push_str("            public static bool IsVisible => Registry.IsActive(PanelPath);\n");
        }

        for element in &group.elements {
            if first_member {
                first_member = false;
            } else {
                out.push('\n');
            }
            out.push_str(&format!(
                "            public static {} {} =>\n                Registry.Resolve<{}>(\"{}\");\n",
                element.capability.accessor_type(),
                property_name(&element.name),
                element.capability.accessor_type(),
                element.canonical_path
            ));
        }

        out.push_str("        }\n");
    }

    out.push_str("    }\n}\n");
    out
}

// ============================================================================
// Unit writing: caller-resolved conflict policy
// ============================================================================

/// What the caller decided to do about a pre-existing target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteDecision {
    BackupThenOverwrite,
    Overwrite,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Overwritten,
    BackedUp { backup: PathBuf },
}

/// Write one generated unit. The target directory is created first; a
/// pre-existing file is resolved through the caller's decision before any
/// byte is written, so a cancelled write leaves no partial file.
pub fn write_unit(
    path: &Path,
    content: &str,
    decision: WriteDecision,
) -> Result<WriteOutcome, PipelineError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| PipelineError::Io {
            context: format!("creating output directory '{}'", dir.display()),
            source: e,
        })?;
    }

    let existed = path.exists();
    let mut outcome = if existed {
        WriteOutcome::Overwritten
    } else {
        WriteOutcome::Created
    };

    if existed {
        match decision {
            WriteDecision::Cancel => {
                return Err(PipelineError::WriteConflict {
                    path: path.to_path_buf(),
                });
            }
            WriteDecision::BackupThenOverwrite => {
                let mut backup = path.as_os_str().to_owned();
                backup.push(".bak");
                let backup = PathBuf::from(backup);
                std::fs::copy(path, &backup).map_err(|e| PipelineError::Io {
                    context: format!("backing up '{}'", path.display()),
                    source: e,
                })?;
                outcome = WriteOutcome::BackedUp { backup };
            }
            WriteDecision::Overwrite => {}
        }
    }

    std::fs::write(path, content).map_err(|e| PipelineError::Io {
        context: format!("writing '{}'", path.display()),
        source: e,
    })?;
    Ok(outcome)
}
