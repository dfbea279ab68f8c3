use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::emit::emitter::WriteDecision;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "uigen",
    version,
    about = "Type-safe UI accessor and event-handler code generation"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: uigen.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// JSONL trace file for pipeline events
    #[arg(long, global = true)]
    pub trace: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Emit the accessor library for a scene
    Generate {
        /// Scene YAML file
        #[arg(long)]
        scene: String,

        /// Output directory for generated units
        #[arg(short, long)]
        output_dir: Option<String>,

        /// Generated file prefix
        #[arg(long)]
        prefix: Option<String>,

        /// Existing-file policy: backup, overwrite, cancel
        #[arg(long, default_value = "cancel")]
        on_conflict: String,

        /// Also persist the registry snapshot as JSON
        #[arg(long)]
        registry_out: Option<String>,
    },

    /// Emit handler scaffolding (machine + user units) for a scene
    Handlers {
        /// Scene YAML file
        #[arg(long)]
        scene: String,

        /// Output directory for generated units
        #[arg(short, long)]
        output_dir: Option<String>,

        /// Generated file prefix
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Standardize element names in a scene file
    Rename {
        /// Scene YAML file (rewritten in place)
        #[arg(long)]
        scene: String,

        /// Also re-case names that already carry type information
        #[arg(long, default_value_t = false)]
        force: bool,

        /// Print renames without writing the scene file back
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },

    /// Match a query against a scene hierarchy
    Search {
        /// Scene YAML file
        #[arg(long)]
        scene: String,

        /// Case-insensitive substring query
        #[arg(short, long)]
        query: String,
    },
}

/// Map the CLI conflict flag onto a write decision. Unrecognized values
/// fall back to the safe choice.
pub fn parse_write_decision(flag: &str) -> WriteDecision {
    match flag {
        "backup" => WriteDecision::BackupThenOverwrite,
        "overwrite" => WriteDecision::Overwrite,
        _ => WriteDecision::Cancel,
    }
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `uigen.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub rename: RenameConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: String,

    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            prefix: default_prefix(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RenameConfig {
    #[serde(default)]
    pub force: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

// Serde default helpers
fn default_output_dir() -> String { "generated".to_string() }
fn default_prefix() -> String { "UI".to_string() }
fn default_debounce_ms() -> u64 { crate::search::debounce::DEFAULT_DEBOUNCE_MS }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("uigen.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}
