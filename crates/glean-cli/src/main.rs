//! Glean CLI - insight detection for query results
//!
//! Usage:
//!   glean analyze --file results.csv --question "..."   Detect insights
//!   glean columns --file results.csv                    Show column types
//!   glean config                                        Show configuration

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Analyze {
            file,
            question,
            timeout,
            format,
            diagnostics,
            kind,
            min_severity,
        } => {
            let filter = commands::FindingFilter {
                kinds: kind,
                min_severity,
            };
            commands::cmd_analyze(
                cli.config.as_deref(),
                &file,
                &question,
                timeout,
                format.map(Into::into),
                diagnostics,
                &filter,
            )
            .await
        }
        Commands::Columns { file } => commands::cmd_columns(&file),
        Commands::Config => commands::cmd_config(cli.config.as_deref()),
    }
}
