//! Skew Insight
//!
//! Reports heavily asymmetric distributions, where the mean is a poor
//! summary because a long tail drags it away from the median.

use serde_json::json;

use crate::dataset::Column;
use crate::error::{Error, Result};

use super::stats::{ensure_finite, mean, median, round_to, skewness};
use super::types::{Finding, InsightKind, Severity};

const MIN_VALUES: usize = 10;
const MIN_ABS_SKEW: f64 = 1.5;

pub fn detect(column: &Column) -> Result<Option<Finding>> {
    let values = column.numbers();
    if values.len() < MIN_VALUES {
        return Ok(None);
    }

    let too_few = || Error::Computation("not enough values".into());
    let skew = ensure_finite("skewness", skewness(&values).ok_or_else(too_few)?)?;
    if skew.abs() <= MIN_ABS_SKEW {
        return Ok(None);
    }

    let mean = ensure_finite("mean", mean(&values).ok_or_else(too_few)?)?;
    let median = median(&values).ok_or_else(too_few)?;
    let (side, tail) = if skew > 0.0 {
        ("right", "high")
    } else {
        ("left", "low")
    };

    let finding = Finding::new(
        InsightKind::Skew,
        Severity::Info,
        format!("{} is {}-skewed", column.name(), side),
        format!(
            "{} has a {}-skewed distribution (skewness = {:.2}). The median of {:.1} is more typical than the mean of {:.1}, which is pulled toward the long tail of {} values.",
            column.name(),
            side,
            skew,
            median,
            mean,
            tail
        ),
    )
    .with_column(column.name())
    .with_data(json!({
        "direction": side,
        "skewness": round_to(skew, 2),
        "median": round_to(median, 1),
        "mean": round_to(mean, 1),
    }));

    Ok(Some(finding))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_tail() {
        let column = Column::numeric(
            "order_value",
            [10.0, 12.0, 11.0, 13.0, 12.0, 10.0, 11.0, 14.0, 12.0, 13.0, 11.0, 250.0],
        );
        let finding = detect(&column).unwrap().unwrap();

        assert_eq!(finding.kind, InsightKind::Skew);
        assert_eq!(finding.data["direction"], "right");
        assert_eq!(finding.data["median"], 12.0);
        assert!(finding.title.contains("right-skewed"));
        assert!(finding.description.contains("pulled toward the long tail"));
    }

    #[test]
    fn test_left_tail() {
        let mut values = vec![100.0; 11];
        values[2] = 98.0;
        values[5] = 101.0;
        values.push(-300.0);
        let finding = detect(&Column::numeric("score", values)).unwrap().unwrap();
        assert_eq!(finding.data["direction"], "left");
        assert!(finding.data["skewness"].as_f64().unwrap() < -1.5);
    }

    #[test]
    fn test_symmetric() {
        let column = Column::numeric("uniform", (1..=30).map(f64::from));
        assert!(detect(&column).unwrap().is_none());
    }

    #[test]
    fn test_too_few_values() {
        let column = Column::numeric("short", [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 90.0]);
        assert!(detect(&column).unwrap().is_none());
    }

    #[test]
    fn test_constant_column() {
        let column = Column::numeric("flat", [7.0; 15]);
        assert!(detect(&column).unwrap().is_none());
    }
}
