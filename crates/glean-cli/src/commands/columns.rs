//! Columns command implementation

use std::path::Path;

use anyhow::{Context, Result};
use glean_core::{coerce_numeric, import_file, Dataset};

use super::truncate;

pub fn cmd_columns(file: &Path) -> Result<()> {
    let dataset =
        import_file(file).with_context(|| format!("Failed to load {}", file.display()))?;

    println!();
    println!("📋 Columns in {} ({} rows)", file.display(), dataset.row_count());
    println!("   ─────────────────────────────────────────────────────────────");
    print!("{}", render_columns(&dataset));
    println!();
    Ok(())
}

/// Name, raw type, type after coercion and non-missing counts
pub fn render_columns(dataset: &Dataset) -> String {
    let coerced = coerce_numeric(dataset);

    let mut out = format!(
        "   {:<24} {:<12} {:<12} {}\n",
        "Column", "Loaded", "Analyzed", "Non-missing"
    );
    for (raw, derived) in dataset.columns().iter().zip(coerced.columns()) {
        out.push_str(&format!(
            "   {:<24} {:<12} {:<12} {}/{}\n",
            truncate(raw.name(), 24),
            raw.kind().as_str(),
            derived.kind().as_str(),
            derived.non_missing_count(),
            derived.len()
        ));
    }
    out
}
