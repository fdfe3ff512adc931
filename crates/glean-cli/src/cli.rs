//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use glean_core::{InsightKind, OutputFormat, Severity};

/// Glean - statistical insights for query results
#[derive(Parser)]
#[command(name = "glean")]
#[command(about = "Find notable patterns in tabular query results", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to ~/.local/share/glean/config/engine.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Detect insights in a CSV or JSON dataset
    Analyze {
        /// Dataset file (.csv, or .json array of row objects)
        #[arg(short, long)]
        file: PathBuf,

        /// Question the data is meant to answer
        #[arg(short, long, default_value = "")]
        question: String,

        /// Analysis deadline in seconds (overrides config)
        #[arg(short, long)]
        timeout: Option<f64>,

        /// Output format (overrides config)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// Also show what every detector did
        #[arg(long)]
        diagnostics: bool,

        /// Only show these kinds (comma-separated, e.g. outlier,trend)
        #[arg(long, value_delimiter = ',')]
        kind: Vec<InsightKind>,

        /// Hide findings below this severity (info, warning, critical)
        #[arg(long)]
        min_severity: Option<Severity>,
    },

    /// Show column types before and after numeric coercion
    Columns {
        /// Dataset file (.csv or .json)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show the effective configuration
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}
