//! Engine configuration
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the override in the data dir
//!    (~/.local/share/glean/config/engine.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Only operational settings live here. Detector thresholds are fixed.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::insights::DEFAULT_TIMEOUT;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/engine.toml");

/// How findings are rendered by front ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Deadline for one analysis
    pub timeout: Duration,
    /// Default rendering for the CLI
    pub output_format: OutputFormat,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            output_format: OutputFormat::Text,
        }
    }
}

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Embedded,
    File(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Embedded => write!(f, "built-in defaults"),
            ConfigSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: EngineConfig,
    pub source: ConfigSource,
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("glean").join("config").join("engine.toml"))
}

/// Load configuration (override first, then default)
pub fn load_config(override_path: Option<&Path>) -> Result<LoadedConfig> {
    let candidate = match override_path {
        Some(path) => {
            if !path.exists() {
                warn!(path = %path.display(), "Config file not found, using defaults");
            }
            Some(path.to_path_buf())
        }
        None => default_config_path(),
    };

    if let Some(path) = candidate.filter(|p| p.exists()) {
        let content = fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "Loaded config override");
        return Ok(LoadedConfig {
            config: parse_config(&content)?,
            source: ConfigSource::File(path),
        });
    }

    Ok(LoadedConfig {
        config: parse_config(DEFAULT_CONFIG)?,
        source: ConfigSource::Embedded,
    })
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    engine: Option<RawEngine>,
    output: Option<RawOutput>,
}

#[derive(Debug, Deserialize)]
struct RawEngine {
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawOutput {
    format: Option<String>,
}

/// Parse config from TOML content
pub fn parse_config(content: &str) -> Result<EngineConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = EngineConfig::default();

    if let Some(timeout) = raw.engine.and_then(|e| e.timeout_secs) {
        if timeout == 0 {
            return Err(Error::Config("engine.timeout_secs must be positive".into()));
        }
        config.timeout = Duration::from_secs(timeout);
    }

    if let Some(format) = raw.output.and_then(|o| o.format) {
        config.output_format = format.parse().map_err(Error::Config)?;
    }

    Ok(config)
}
