//! Analyze command implementation

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use glean_core::{
    import_file, load_config, Finding, InsightEngine, InsightKind, OutputFormat, PipelineReport,
    RunStatus, Severity,
};
use tracing::warn;

use super::truncate;

/// Validate a `--timeout` value in seconds
pub fn parse_timeout(secs: f64) -> Result<Duration> {
    match Duration::try_from_secs_f64(secs) {
        Ok(d) if !d.is_zero() => Ok(d),
        _ => bail!("Invalid --timeout {} (must be a positive number of seconds)", secs),
    }
}

/// Display-side narrowing of the findings list
#[derive(Debug, Clone, Default)]
pub struct FindingFilter {
    /// Empty means every kind
    pub kinds: Vec<InsightKind>,
    pub min_severity: Option<Severity>,
}

impl FindingFilter {
    pub fn matches(&self, finding: &Finding) -> bool {
        let kind_ok = self.kinds.is_empty() || self.kinds.contains(&finding.kind);
        let severity_ok = self
            .min_severity
            .map_or(true, |min| finding.severity.priority() >= min.priority());
        kind_ok && severity_ok
    }

    pub fn apply(&self, findings: Vec<Finding>) -> Vec<Finding> {
        findings.into_iter().filter(|f| self.matches(f)).collect()
    }
}

pub async fn cmd_analyze(
    config_path: Option<&Path>,
    file: &Path,
    question: &str,
    timeout: Option<f64>,
    format: Option<OutputFormat>,
    diagnostics: bool,
    filter: &FindingFilter,
) -> Result<()> {
    let loaded = load_config(config_path).context("Failed to load config")?;
    let dataset =
        import_file(file).with_context(|| format!("Failed to load {}", file.display()))?;

    let timeout = match timeout {
        Some(secs) => parse_timeout(secs)?,
        None => loaded.config.timeout,
    };
    let format = format.unwrap_or(loaded.config.output_format);
    let engine = InsightEngine::with_timeout(timeout);

    let mut report = if diagnostics {
        engine
            .try_analyze(&dataset, question)
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "Insight analysis abandoned");
                PipelineReport::default()
            })
    } else {
        PipelineReport {
            findings: engine.analyze(&dataset, question).await,
            runs: Vec::new(),
        }
    };
    report.findings = filter.apply(report.findings);

    match format {
        OutputFormat::Json => {
            let json = if diagnostics {
                serde_json::to_string_pretty(&report)
            } else {
                serde_json::to_string_pretty(&report.findings)
            }
            .context("Failed to serialize findings")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            println!();
            println!("🔎 Insights for {}", file.display());
            println!(
                "   {} rows × {} columns",
                dataset.row_count(),
                dataset.column_count()
            );
            println!("   ─────────────────────────────────────────────────────────────");
            print!("{}", render_findings(&report.findings));
            if diagnostics {
                println!();
                println!("🧪 Detector runs");
                println!("   ─────────────────────────────────────────────────────────────");
                print!("{}", render_runs(&report));
            }
            println!();
        }
    }

    Ok(())
}

fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "💡",
        Severity::Warning => "⚠️ ",
        Severity::Critical => "🚨",
    }
}

/// Human-readable findings block
pub fn render_findings(findings: &[Finding]) -> String {
    if findings.is_empty() {
        return "   No notable patterns found.\n".to_string();
    }

    let mut out = String::new();
    for (i, finding) in findings.iter().enumerate() {
        out.push_str(&format!(
            "   {}. {} {} [{}]\n",
            i + 1,
            severity_icon(finding.severity),
            finding.title,
            finding.kind
        ));
        out.push_str(&format!("      {}\n", finding.description));
    }
    out
}

/// One line per detector invocation
pub fn render_runs(report: &PipelineReport) -> String {
    if report.runs.is_empty() {
        return "   (no detectors ran)\n".to_string();
    }

    let mut out = String::new();
    for run in &report.runs {
        let mark = match run.status {
            RunStatus::Found => "✅",
            RunStatus::Nothing => "➖",
            RunStatus::Failed { .. } => "❌",
        };
        out.push_str(&format!(
            "   {} {:<14} {:<32} {}\n",
            mark,
            run.detector.as_str(),
            truncate(&run.target, 32),
            run.status
        ));
    }
    out
}
