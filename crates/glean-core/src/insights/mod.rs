//! Insight Engine - statistical findings for tabular query results
//!
//! Five independent, stateless detectors look for notable patterns in a
//! dataset without any domain configuration:
//!
//! - **Concentration** - a few groups hold most of the value (Pareto)
//! - **Outlier** - values more than 2 standard deviations from the mean
//! - **Trend** - mostly-monotonic movement across rows
//! - **Correlation** - the strongest pair of related numeric columns
//! - **Skew** - long-tailed distributions where the mean misleads
//!
//! The [`pipeline`] decides which columns feed which detector and caps the
//! output; the [`InsightEngine`] runs it off the async runtime with a
//! deadline.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use glean_core::insights::InsightEngine;
//!
//! let engine = InsightEngine::new();
//! let findings = engine.analyze(&dataset, "Which region sells most?").await;
//! ```

pub mod concentration;
pub mod correlation;
pub mod engine;
pub mod outlier;
pub mod pipeline;
pub mod skew;
pub mod stats;
pub mod trend;
pub mod types;

pub use engine::{InsightEngine, DEFAULT_TIMEOUT, WORKER_POOL_SIZE};
pub use pipeline::{generate_insights, run_pipeline, MAX_FINDINGS};
pub use types::{
    DetectorRun, Finding, InsightKind, Outcome, PipelineReport, RunStatus, Severity,
};
