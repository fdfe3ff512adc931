//! Outlier Insight
//!
//! Flags values more than two sample standard deviations from the mean.

use serde_json::json;

use crate::dataset::Column;
use crate::error::{Error, Result};

use super::stats::{ensure_finite, format_value, mean, round_to, sample_std};
use super::types::{Finding, InsightKind, Severity};

const MIN_VALUES: usize = 5;
const Z_THRESHOLD: f64 = 2.0;
/// Outlier share (percent) above which the finding becomes a warning
const WARNING_PCT: f64 = 5.0;

pub fn detect(column: &Column) -> Result<Option<Finding>> {
    let values = column.numbers();
    if values.len() < MIN_VALUES {
        return Ok(None);
    }

    let too_few = || Error::Computation("not enough values".into());
    let mean = ensure_finite("mean", mean(&values).ok_or_else(too_few)?)?;
    let std = ensure_finite("standard deviation", sample_std(&values).ok_or_else(too_few)?)?;
    if std == 0.0 {
        return Ok(None);
    }

    let outliers: Vec<(f64, f64)> = values
        .iter()
        .map(|v| (*v, (v - mean).abs() / std))
        .filter(|(_, z)| *z > Z_THRESHOLD)
        .collect();

    // Largest z-score; the first one wins ties
    let Some(&(extreme, extreme_z)) = outliers
        .iter()
        .reduce(|best, cur| if cur.1 > best.1 { cur } else { best })
    else {
        return Ok(None);
    };

    let count = outliers.len();
    let pct = round_to(count as f64 / values.len() as f64 * 100.0, 1);
    let severity = if pct > WARNING_PCT {
        Severity::Warning
    } else {
        Severity::Info
    };

    let finding = Finding::new(
        InsightKind::Outlier,
        severity,
        format!("Outliers in {}", column.name()),
        format!(
            "{} value{} in {} ({:.1}%) {} more than {} standard deviations from the mean of {:.1}. The most extreme is {}.",
            count,
            if count == 1 { "" } else { "s" },
            column.name(),
            pct,
            if count == 1 { "lies" } else { "lie" },
            Z_THRESHOLD,
            mean,
            format_value(extreme)
        ),
    )
    .with_column(column.name())
    .with_data(json!({
        "count": count,
        "percent": pct,
        "mean": round_to(mean, 1),
        "std": std,
        "max_outlier": extreme,
        "max_z_score": round_to(extreme_z, 2),
    }));

    Ok(Some(finding))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Value;

    #[test]
    fn test_single_extreme_value() {
        let mut values = vec![10.0, 11.0, 9.0, 10.0, 10.5, 9.5, 10.0, 11.0, 9.0];
        values.push(100.0);
        let column = Column::numeric("latency", values);

        let finding = detect(&column).unwrap().unwrap();
        assert_eq!(finding.kind, InsightKind::Outlier);
        assert_eq!(finding.data["count"], 1);
        assert_eq!(finding.data["max_outlier"], 100.0);
        assert_eq!(finding.data["percent"], 10.0);
        // 10% of the column is an outlier
        assert_eq!(finding.severity, Severity::Warning);
        assert!(finding.description.contains("most extreme is 100"));
    }

    #[test]
    fn test_low_share_is_info() {
        let mut values: Vec<f64> = (0..49).map(|i| 10.0 + (i % 3) as f64).collect();
        values.push(500.0);
        let column = Column::numeric("amount", values);

        let finding = detect(&column).unwrap().unwrap();
        assert_eq!(finding.data["percent"], 2.0);
        assert_eq!(finding.severity, Severity::Info);
    }

    #[test]
    fn test_most_extreme_can_be_low() {
        let mut values = vec![50.0; 19];
        values[3] = 49.0;
        values[7] = 51.0;
        values.push(-400.0);
        let finding = detect(&Column::numeric("v", values)).unwrap().unwrap();
        assert_eq!(finding.data["max_outlier"], -400.0);
    }

    #[test]
    fn test_constant_column() {
        let column = Column::numeric("flat", [3.0; 8]);
        assert!(detect(&column).unwrap().is_none());
    }

    #[test]
    fn test_too_few_values() {
        let column = Column::new(
            "sparse",
            vec![
                1.0.into(),
                2.0.into(),
                Value::Missing,
                100.0.into(),
                Value::Missing,
                3.0.into(),
            ],
        );
        assert!(detect(&column).unwrap().is_none());
    }

    #[test]
    fn test_no_outliers() {
        let column = Column::numeric("even", (1..=10).map(f64::from));
        assert!(detect(&column).unwrap().is_none());
    }

    #[test]
    fn test_infinite_value_fails() {
        let column = Column::numeric("broken", [1.0, 2.0, 3.0, 4.0, f64::INFINITY]);
        assert!(matches!(detect(&column), Err(Error::Computation(_))));
    }
}
