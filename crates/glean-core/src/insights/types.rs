//! Core types for the Insight Engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Result;

/// Statistical heuristic that produced a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// A few groups hold most of the value (Pareto)
    Concentration,
    /// Values far from the mean (z-score)
    Outlier,
    /// Mostly-monotonic movement across rows
    Trend,
    /// Two numeric columns moving together
    Correlation,
    /// Asymmetric distribution
    Skew,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Concentration => "concentration",
            InsightKind::Outlier => "outlier",
            InsightKind::Trend => "trend",
            InsightKind::Correlation => "correlation",
            InsightKind::Skew => "skew",
        }
    }

    /// Detectors in pipeline execution order
    pub fn all() -> &'static [InsightKind] {
        &[
            InsightKind::Concentration,
            InsightKind::Outlier,
            InsightKind::Trend,
            InsightKind::Correlation,
            InsightKind::Skew,
        ]
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "concentration" => Ok(InsightKind::Concentration),
            "outlier" => Ok(InsightKind::Outlier),
            "trend" => Ok(InsightKind::Trend),
            "correlation" => Ok(InsightKind::Correlation),
            "skew" => Ok(InsightKind::Skew),
            _ => Err(format!("Unknown insight kind: {}", s)),
        }
    }
}

/// Severity level of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational - no action needed
    Info,
    /// Worth a closer look
    Warning,
    /// Reserved; no current heuristic emits it
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }

    /// Numeric priority (higher = more urgent)
    pub fn priority(&self) -> u8 {
        match self {
            Severity::Info => 1,
            Severity::Warning => 2,
            Severity::Critical => 3,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "info" => Ok(Severity::Info),
            "warning" => Ok(Severity::Warning),
            "critical" => Ok(Severity::Critical),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// A single statistical observation produced by a detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Detector that produced this finding
    pub kind: InsightKind,
    /// How notable this finding is
    pub severity: Severity,
    /// Short title (e.g., "Outliers in revenue")
    pub title: String,
    /// Explanation with the supporting statistics embedded
    pub description: String,
    /// Column (or "a / b" pair) the finding is about
    pub column: Option<String>,
    /// Detector-specific structured statistics
    pub data: serde_json::Value,
}

impl Finding {
    pub fn new(
        kind: InsightKind,
        severity: Severity,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity,
            title: title.into(),
            description: description.into(),
            column: None,
            data: serde_json::Value::Null,
        }
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Add structured data payload
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }
}

/// Result of a single detector run
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The heuristic fired
    Found(Finding),
    /// Ran cleanly, nothing notable (or not enough data)
    Nothing,
    /// The detector failed; the pipeline carries on without it
    Failed(String),
}

impl Outcome {
    pub fn status(&self) -> RunStatus {
        match self {
            Outcome::Found(_) => RunStatus::Found,
            Outcome::Nothing => RunStatus::Nothing,
            Outcome::Failed(reason) => RunStatus::Failed {
                reason: reason.clone(),
            },
        }
    }

    pub fn into_finding(self) -> Option<Finding> {
        match self {
            Outcome::Found(finding) => Some(finding),
            _ => None,
        }
    }
}

impl From<Result<Option<Finding>>> for Outcome {
    fn from(result: Result<Option<Finding>>) -> Self {
        match result {
            Ok(Some(finding)) => Outcome::Found(finding),
            Ok(None) => Outcome::Nothing,
            Err(e) => Outcome::Failed(e.to_string()),
        }
    }
}

/// Serializable status of a detector run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunStatus {
    Found,
    Nothing,
    Failed { reason: String },
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Found => write!(f, "found"),
            RunStatus::Nothing => write!(f, "nothing"),
            RunStatus::Failed { reason } => write!(f, "failed: {}", reason),
        }
    }
}

/// Diagnostic record of one pipeline step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorRun {
    pub detector: InsightKind,
    /// Column(s) the detector was pointed at
    pub target: String,
    #[serde(flatten)]
    pub status: RunStatus,
}

/// Everything a pipeline run produced
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Findings in execution order, at most five
    pub findings: Vec<Finding>,
    /// One entry per detector invocation, including ones that found nothing
    pub runs: Vec<DetectorRun>,
}

impl PipelineReport {
    pub fn failures(&self) -> impl Iterator<Item = &DetectorRun> {
        self.runs
            .iter()
            .filter(|r| matches!(r.status, RunStatus::Failed { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_insight_kind_round_trip_names() {
        for kind in InsightKind::all() {
            assert_eq!(InsightKind::from_str(kind.as_str()).unwrap(), *kind);
        }
        assert!(InsightKind::from_str("forecast").is_err());
    }

    #[test]
    fn test_severity_priority() {
        assert!(Severity::Critical.priority() > Severity::Warning.priority());
        assert!(Severity::Warning.priority() > Severity::Info.priority());
    }

    #[test]
    fn test_finding_builder() {
        let finding = Finding::new(
            InsightKind::Outlier,
            Severity::Warning,
            "Outliers in revenue",
            "2 values are far from the mean",
        )
        .with_column("revenue")
        .with_data(serde_json::json!({"count": 2}));

        assert_eq!(finding.column.as_deref(), Some("revenue"));
        assert_eq!(finding.data["count"], 2);
    }

    #[test]
    fn test_finding_serializes_snake_case() {
        let finding = Finding::new(InsightKind::Skew, Severity::Info, "t", "d");
        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["kind"], "skew");
        assert_eq!(json["severity"], "info");
    }

    #[test]
    fn test_outcome_from_result() {
        let found = Outcome::from(Ok::<_, Error>(Some(Finding::new(
            InsightKind::Trend,
            Severity::Info,
            "t",
            "d",
        ))));
        assert_eq!(found.status(), RunStatus::Found);

        let nothing = Outcome::from(Ok::<_, Error>(None));
        assert_eq!(nothing.status(), RunStatus::Nothing);
        assert!(nothing.into_finding().is_none());

        let failed = Outcome::from(Err::<Option<Finding>, _>(Error::Computation(
            "mean is not finite".into(),
        )));
        assert!(matches!(failed.status(), RunStatus::Failed { reason } if reason.contains("finite")));
    }

    #[test]
    fn test_detector_run_serializes_flat() {
        let run = DetectorRun {
            detector: InsightKind::Outlier,
            target: "revenue".into(),
            status: RunStatus::Failed {
                reason: "boom".into(),
            },
        };
        let json = serde_json::to_value(&run).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["reason"], "boom");
        assert_eq!(json["detector"], "outlier");
    }
}
