//! Correlation Insight
//!
//! Computes Pearson's r for every pair of numeric columns and reports the
//! single strongest pair when |r| >= 0.7.

use serde_json::json;

use crate::dataset::Column;
use crate::error::Result;

use super::stats::{pearson, round_to};
use super::types::{Finding, InsightKind, Severity};

const MIN_COLUMNS: usize = 2;
const MIN_ABS_R: f64 = 0.7;

pub fn detect(columns: &[&Column]) -> Result<Option<Finding>> {
    if columns.len() < MIN_COLUMNS {
        return Ok(None);
    }

    let series: Vec<Vec<Option<f64>>> = columns
        .iter()
        .map(|c| c.values().iter().map(|v| v.as_number()).collect())
        .collect();

    let mut strongest: Option<(usize, usize, f64)> = None;
    for i in 0..columns.len() {
        for j in (i + 1)..columns.len() {
            let Some(r) = pearson(&series[i], &series[j]) else {
                continue;
            };
            if strongest.map_or(true, |(_, _, best)| r.abs() > best.abs()) {
                strongest = Some((i, j, r));
            }
        }
    }

    let Some((i, j, r)) = strongest else {
        return Ok(None);
    };
    if r.abs() < MIN_ABS_R {
        return Ok(None);
    }

    let (a, b) = (columns[i].name(), columns[j].name());
    let (direction, movement) = if r > 0.0 {
        ("positive", "tend to move in a similar direction")
    } else {
        ("negative", "tend to move in opposite directions")
    };

    let finding = Finding::new(
        InsightKind::Correlation,
        Severity::Info,
        format!("Strong {} correlation between {} and {}", direction, a, b),
        format!(
            "{} and {} have a strong {} correlation (r = {:.2}); they {}.",
            a, b, direction, r, movement
        ),
    )
    .with_column(format!("{} / {}", a, b))
    .with_data(json!({
        "column_a": a,
        "column_b": b,
        "r": round_to(r, 2),
        "direction": direction,
    }));

    Ok(Some(finding))
}
