use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;

use crate::trace::trace::PipelineEvent;

/// Appends pipeline events to a JSONL file. Logging failures degrade to
/// stderr warnings; they never abort the pipeline.
pub struct TraceLogger {
    file: Option<Mutex<File>>,
}

impl TraceLogger {
    pub fn new(path: &str) -> Self {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => Self {
                file: Some(Mutex::new(f)),
            },
            Err(e) => {
                eprintln!("Warning: could not open trace file '{}': {}", path, e);
                Self { file: None }
            }
        }
    }

    /// A logger that drops everything (tracing off).
    pub fn disabled() -> Self {
        Self { file: None }
    }

    /// Append one event as a JSONL line. A failed append is reported to
    /// stderr and the event is dropped.
    pub fn log(&self, event: &PipelineEvent) {
        let Some(file) = &self.file else {
            return; // tracing disabled
        };
        if let Err(reason) = append_line(file, event) {
            eprintln!("Warning: trace event dropped ({})", reason);
        }
    }
}

fn append_line(file: &Mutex<File>, event: &PipelineEvent) -> Result<(), String> {
    let json = serde_json::to_string(event).map_err(|e| format!("serialize: {}", e))?;
    let mut file = file.lock().map_err(|e| format!("lock poisoned: {}", e))?;
    writeln!(file, "{}", json).map_err(|e| format!("write: {}", e))
}
