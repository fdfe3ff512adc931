//! Glean Core Library
//!
//! Insight detection for tabular query results:
//! - In-memory datasets loaded from CSV or JSON exports
//! - Numeric coercion of text-encoded decimals
//! - Five statistical detectors (concentration, outlier, trend,
//!   correlation, skew)
//! - A fixed-order pipeline capped at five findings
//! - A deadline-bounded engine on a shared worker pool
//! - TOML configuration with embedded defaults

pub mod coerce;
pub mod config;
pub mod dataset;
pub mod error;
pub mod import;
pub mod insights;

/// Canned datasets for tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use coerce::coerce_numeric;
pub use config::{load_config, ConfigSource, EngineConfig, LoadedConfig, OutputFormat};
pub use dataset::{Column, ColumnKind, Dataset, Value};
pub use error::{Error, Result};
pub use import::{import_file, parse_csv, parse_json, InputFormat};
pub use insights::{
    generate_insights, run_pipeline, DetectorRun, Finding, InsightEngine, InsightKind, Outcome,
    PipelineReport, RunStatus, Severity,
};
