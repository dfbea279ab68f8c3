use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum PipelineError {
    /// A dependent artifact is missing (e.g. handler generation before the
    /// accessor library exists). Fatal to the operation, nothing is written.
    Precondition { scene: String, missing: PathBuf },

    /// Target file exists and the caller's decision was to cancel.
    WriteConflict { path: PathBuf },

    /// Canonical path is empty or otherwise unusable.
    MalformedPath { path: String },

    /// Scene file parsed but its structure is unusable.
    SceneStructure(String),

    /// Filesystem failure (context names the file involved)
    Io { context: String, source: std::io::Error },

    /// YAML parse/serialize failure (scene files, config)
    Yaml { context: String, source: serde_yaml::Error },

    /// JSON parse/serialize failure (registry persistence, trace events)
    Json { context: String, source: serde_json::Error },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Precondition { scene, missing } => {
                write!(
                    f,
                    "Cannot generate handlers for scene '{}': accessor library '{}' has not been generated yet",
                    scene,
                    missing.display()
                )
            }
            PipelineError::WriteConflict { path } => {
                write!(f, "Target file '{}' already exists; write cancelled", path.display())
            }
            PipelineError::MalformedPath { path } => {
                write!(f, "Malformed canonical path: '{}'", path)
            }
            PipelineError::SceneStructure(msg) => {
                write!(f, "Unusable scene structure: {}", msg)
            }
            PipelineError::Io { context, source } => {
                write!(f, "I/O error while {}: {}", context, source)
            }
            PipelineError::Yaml { context, source } => {
                write!(f, "YAML error while {}: {}", context, source)
            }
            PipelineError::Json { context, source } => {
                write!(f, "JSON error while {}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Io { source, .. } => Some(source),
            PipelineError::Yaml { source, .. } => Some(source),
            PipelineError::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}
