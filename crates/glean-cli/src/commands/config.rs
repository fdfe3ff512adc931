//! Config command implementation

use std::path::Path;

use anyhow::{Context, Result};
use glean_core::config::default_config_path;
use glean_core::insights::{MAX_FINDINGS, WORKER_POOL_SIZE};
use glean_core::load_config;

pub fn cmd_config(config_path: Option<&Path>) -> Result<()> {
    let loaded = load_config(config_path).context("Failed to load config")?;

    println!();
    println!("⚙️  Glean Configuration");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Source: {}", loaded.source);
    if let Some(path) = default_config_path() {
        println!("   Override path: {}", path.display());
    }
    println!("   Timeout: {:?}", loaded.config.timeout);
    println!("   Output format: {}", loaded.config.output_format);
    println!("   Worker pool: {} (fixed)", WORKER_POOL_SIZE);
    println!("   Max findings: {} (fixed)", MAX_FINDINGS);
    println!();
    Ok(())
}
