use serde::Serialize;

/// One pipeline event, written as a JSONL line by `TraceLogger`.
///
/// Every warning-level event carries the offending canonical path or
/// element name so the fix is locatable without cross-referencing logs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PipelineEvent {
    DuplicateRejected { path: String },
    DuplicateKeyRejected { path: String, key: u64 },
    MalformedPathSkipped { path: String },
    LookupMiss { path: String },
    RemoveMiss { path: String },
    RenameApplied { path: String, from: String, to: String },
    GroupCompiled { key: String, elements: usize },
    UnitWritten { path: String, bytes: usize },
    UnitBackedUp { path: String, backup: String },
    UserUnitPreserved { path: String },
    SignatureDiff { added: Vec<String>, removed: Vec<String> },
    PreconditionFailed { scene: String, missing: String },
}
