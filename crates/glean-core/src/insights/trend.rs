//! Trend Insight
//!
//! Row order is the sequence axis. A column where more than 75% of
//! consecutive steps move the same way is reported as trending. A column
//! where every step moves the same way is skipped: that is almost always a
//! result ordered by the column itself rather than a real trend.

use serde_json::json;

use crate::dataset::Column;
use crate::error::Result;

use super::stats::{ensure_finite, format_value, round_to};
use super::types::{Finding, InsightKind, Severity};

const MIN_VALUES: usize = 4;
/// Fraction of steps that must move in one direction
const STEP_SHARE: f64 = 0.75;

pub fn detect(column: &Column) -> Result<Option<Finding>> {
    let values = column.numbers();
    if values.len() < MIN_VALUES {
        return Ok(None);
    }

    let steps = values.len() - 1;
    let (mut up, mut down) = (0usize, 0usize);
    for pair in values.windows(2) {
        let diff = pair[1] - pair[0];
        if diff > 0.0 {
            up += 1;
        } else if diff < 0.0 {
            down += 1;
        }
    }

    // Sorted by this column; not a trend
    if up == steps || down == steps {
        return Ok(None);
    }

    let upward = up as f64 > steps as f64 * STEP_SHARE;
    let downward = down as f64 > steps as f64 * STEP_SHARE;
    if !upward && !downward {
        return Ok(None);
    }

    let first = values[0];
    let last = values[values.len() - 1];
    let change_pct = ensure_finite(
        "percent change",
        (last - first) / first.abs().max(1.0) * 100.0,
    )?;

    let (direction, severity, moving, verb) = if upward {
        ("upward", Severity::Info, up, "increased")
    } else {
        ("downward", Severity::Warning, down, "decreased")
    };
    let share_pct = round_to(moving as f64 / steps as f64 * 100.0, 1);

    let finding = Finding::new(
        InsightKind::Trend,
        severity,
        format!(
            "{} trend in {}",
            if upward { "Upward" } else { "Downward" },
            column.name()
        ),
        format!(
            "{} {} in {} of {} consecutive rows ({:.0}%), changing {:+.1}% overall from {} to {}.",
            column.name(),
            verb,
            moving,
            steps,
            share_pct,
            change_pct,
            format_value(first),
            format_value(last)
        ),
    )
    .with_column(column.name())
    .with_data(json!({
        "direction": direction,
        "steps": steps,
        "moving_steps": moving,
        "step_pct": share_pct,
        "first": first,
        "last": last,
        "change_pct": round_to(change_pct, 1),
    }));

    Ok(Some(finding))
}
