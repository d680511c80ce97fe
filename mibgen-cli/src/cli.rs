//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// mibgen -- generate snmp_exporter configuration from a MIB object tree.
///
/// Use `mibgen <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "mibgen", version, about, long_about = None)]
pub struct Cli {
    /// Path to the mibgen.toml configuration file.
    ///
    /// When omitted, `mibgen.toml` is used if present, otherwise built-in defaults.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate snmp.yml from the module directives.
    Generate(GenerateArgs),

    /// Debug: dump the loaded and prepared MIB tree.
    Dump(DumpArgs),
}

// ---- generate ----

/// Generate the exporter configuration.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// MIB tree JSON file (overrides `generator.tree_path`).
    #[arg(long)]
    pub tree: Option<PathBuf>,

    /// Module directives YAML file (overrides `generator.directives_path`).
    #[arg(long)]
    pub directives: Option<PathBuf>,

    /// Path to write the resulting config file (overrides `generator.output_path`).
    #[arg(short = 'o', long)]
    pub output_path: Option<PathBuf>,
}

// ---- dump ----

/// Dump the prepared MIB tree, one node per line.
#[derive(Args, Debug)]
pub struct DumpArgs {
    /// MIB tree JSON file (overrides `generator.tree_path`).
    #[arg(long)]
    pub tree: Option<PathBuf>,
}
