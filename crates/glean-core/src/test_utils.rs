//! Test utilities for glean-core
//!
//! Canned datasets with known insight outcomes, shared by the core tests and
//! the CLI tests (via the `test-utils` feature).

use crate::dataset::{Column, Dataset};

/// Five regions where West holds 85% of revenue
pub fn pareto_dataset() -> Dataset {
    Dataset::new(vec![
        Column::text("region", ["West", "East", "North", "South", "Central", "West"]),
        Column::numeric("revenue", [500.0, 40.0, 40.0, 40.0, 30.0, 350.0]),
    ])
    .expect("columns have equal length")
}

/// 100 rows that trigger Concentration, Outlier (x2), Correlation and
/// Skew (x2): six findings before the cap.
pub fn capped_dataset() -> Dataset {
    const ROWS: usize = 100;
    const SPIKES: usize = 5;

    let amount: Vec<f64> = (0..ROWS)
        .map(|i| if i >= ROWS - SPIKES { 100.0 } else { 1.0 })
        .collect();
    let doubled: Vec<f64> = amount.iter().map(|v| v * 2.0).collect();
    let segment: Vec<&str> = (0..ROWS)
        .map(|i| {
            if i >= ROWS - SPIKES {
                "A"
            } else {
                ["B", "C", "D", "E"][i % 4]
            }
        })
        .collect();

    Dataset::new(vec![
        Column::text("segment", segment),
        Column::numeric("amount", amount),
        Column::numeric("amount_x2", doubled),
    ])
    .expect("columns have equal length")
}

/// Write `contents` to a temp file with the given extension
#[cfg(test)]
pub fn temp_file(extension: &str, contents: &str) -> tempfile::NamedTempFile {
    use std::io::Write;

    let mut file = tempfile::Builder::new()
        .suffix(extension)
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}
