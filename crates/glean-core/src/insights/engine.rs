//! Insight Engine - runs the pipeline on a bounded worker pool with a deadline

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::dataset::Dataset;
use crate::error::{Error, Result};

use super::pipeline::run_pipeline;
use super::types::{Finding, PipelineReport};

/// Deadline applied when the caller does not pick one
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Concurrent pipeline runs allowed per process
pub const WORKER_POOL_SIZE: usize = 2;

/// Process-wide pool shared by every engine instance
fn worker_pool() -> Arc<Semaphore> {
    static POOL: OnceLock<Arc<Semaphore>> = OnceLock::new();
    POOL.get_or_init(|| Arc::new(Semaphore::new(WORKER_POOL_SIZE)))
        .clone()
}

/// Entry point for insight detection
///
/// Analysis is best-effort: [`InsightEngine::analyze`] never fails, it
/// returns fewer (or zero) findings instead.
#[derive(Debug, Clone)]
pub struct InsightEngine {
    timeout: Duration,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::with_timeout(config.timeout)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Detect insights in `dataset`, returning an empty list on timeout or
    /// failure.
    ///
    /// The question is accepted for the narrative layer that consumes the
    /// findings; detection itself does not depend on it.
    pub async fn analyze(&self, dataset: &Dataset, question: &str) -> Vec<Finding> {
        match self.try_analyze(dataset, question).await {
            Ok(report) => report.findings,
            Err(e) => {
                warn!(error = %e, "Insight analysis abandoned, returning no findings");
                Vec::new()
            }
        }
    }

    /// Same as [`analyze`](Self::analyze) but surfaces the timeout or worker
    /// error and keeps per-detector diagnostics.
    pub async fn try_analyze(&self, dataset: &Dataset, question: &str) -> Result<PipelineReport> {
        debug!(
            question = %question,
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            timeout_ms = self.timeout.as_millis() as u64,
            "Starting insight analysis"
        );

        let dataset = dataset.clone();
        let pool = worker_pool();
        let work = async move {
            let permit = pool
                .acquire_owned()
                .await
                .map_err(|e| Error::Worker(e.to_string()))?;
            // If the deadline passes, this handle is dropped and the task is
            // detached. It keeps its permit until it finishes.
            let handle = tokio::task::spawn_blocking(move || {
                let _permit = permit;
                run_pipeline(&dataset)
            });
            handle.await.map_err(|e| Error::Worker(e.to_string()))
        };

        let report = tokio::time::timeout(self.timeout, work)
            .await
            .map_err(|_| Error::Timeout(self.timeout))??;

        info!(
            findings = report.findings.len(),
            failed = report.failures().count(),
            "Insight analysis complete"
        );
        Ok(report)
    }
}
