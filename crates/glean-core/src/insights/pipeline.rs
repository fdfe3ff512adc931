//! Insight pipeline - column selection and fixed-order detector execution
//!
//! Order: Concentration (first categorical x first numeric), Outlier on the
//! first three numeric columns, Trend on the first numeric column,
//! Correlation across all numeric columns, Skew on the first two numeric
//! columns. Findings keep that order and are cut to [`MAX_FINDINGS`].

use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

use crate::coerce::coerce_numeric;
use crate::dataset::Dataset;
use crate::error::{Error, Result};

use super::types::{DetectorRun, Finding, InsightKind, Outcome, PipelineReport};
use super::{concentration, correlation, outlier, skew, trend};

/// Maximum number of findings returned for one dataset
pub const MAX_FINDINGS: usize = 5;

const MIN_ROWS: usize = 2;
const TREND_MIN_ROWS: usize = 4;
const OUTLIER_COLUMNS: usize = 3;
const SKEW_COLUMNS: usize = 2;

/// Run every applicable detector and keep per-detector diagnostics
pub fn run_pipeline(dataset: &Dataset) -> PipelineReport {
    let mut report = PipelineReport::default();

    let dataset = coerce_numeric(dataset);
    let rows = dataset.row_count();
    if rows < MIN_ROWS {
        debug!(rows, "Not enough rows for insight detection");
        return report;
    }

    let classes = dataset.classify();
    let numeric = &classes.numeric;
    debug!(
        rows,
        numeric = numeric.len(),
        categorical = classes.categorical.len(),
        "Classified columns"
    );

    if let (Some(group), Some(value)) = (classes.categorical.first(), numeric.first()) {
        report.run_detector(
            InsightKind::Concentration,
            format!("{} by {}", value.name(), group.name()),
            || concentration::detect(group, value),
        );
    }

    for column in numeric.iter().take(OUTLIER_COLUMNS) {
        report.run_detector(InsightKind::Outlier, column.name(), || outlier::detect(column));
    }

    if let Some(first) = numeric.first() {
        if rows >= TREND_MIN_ROWS {
            report.run_detector(InsightKind::Trend, first.name(), || trend::detect(first));
        }
    }

    if numeric.len() >= 2 {
        let names: Vec<&str> = numeric.iter().map(|c| c.name()).collect();
        report.run_detector(
            InsightKind::Correlation,
            names.join(", "),
            || correlation::detect(numeric),
        );
    }

    for column in numeric.iter().take(SKEW_COLUMNS) {
        report.run_detector(InsightKind::Skew, column.name(), || skew::detect(column));
    }

    report.findings.truncate(MAX_FINDINGS);
    report
}

/// Findings only; see [`run_pipeline`] for diagnostics
pub fn generate_insights(dataset: &Dataset) -> Vec<Finding> {
    run_pipeline(dataset).findings
}

/// Run one detector, turning a panic into an error so later detectors
/// still run
fn guarded<F>(detect: F) -> Result<Option<Finding>>
where
    F: FnOnce() -> Result<Option<Finding>>,
{
    panic::catch_unwind(AssertUnwindSafe(detect)).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(Error::Computation(format!("detector panicked: {}", message)))
    })
}

impl PipelineReport {
    fn run_detector<F>(&mut self, detector: InsightKind, target: impl Into<String>, detect: F)
    where
        F: FnOnce() -> Result<Option<Finding>>,
    {
        let target = target.into();
        let outcome = Outcome::from(guarded(detect));
        let status = outcome.status();

        match &outcome {
            Outcome::Failed(reason) => {
                warn!(
                    detector = detector.as_str(),
                    target = %target,
                    reason = %reason,
                    "Detector failed"
                );
            }
            _ => {
                debug!(
                    detector = detector.as_str(),
                    target = %target,
                    status = %status,
                    "Detector complete"
                );
            }
        }

        self.runs.push(DetectorRun {
            detector,
            target,
            status,
        });
        if let Some(finding) = outcome.into_finding() {
            self.findings.push(finding);
        }
    }
}
