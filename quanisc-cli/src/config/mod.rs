//! Configuration module

use crate::error::CliError;
use anyhow::{Context, Result};
use quanisc_core::{ContextWindow, DetectorConfig, DEFAULT_EXCLUSIONS, DEFAULT_QUANTIFIERS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct CliConfig {
    /// Detection configuration
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Input configuration
    #[serde(default)]
    pub input: InputConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// Detection-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DetectionConfig {
    /// Quantifier substrings to search for
    pub quantifiers: Vec<String>,

    /// Token texts that never count as quantifiers
    pub exclusions: Vec<String>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            quantifiers: DEFAULT_QUANTIFIERS.iter().map(|s| s.to_string()).collect(),
            exclusions: DEFAULT_EXCLUSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Input-related configuration
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Default input format (csv, txt or conllu)
    pub format: Option<String>,

    /// CoNLL-U file with parses for csv/txt input
    pub parses: Option<PathBuf>,
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub default_format: String,

    /// Write context windows next to the matches
    pub context: bool,

    /// Sentences kept before each match
    pub context_before: usize,

    /// Sentences kept after each match
    pub context_after: usize,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        let window = ContextWindow::default();
        Self {
            default_format: "csv".to_string(),
            context: true,
            context_before: window.preceding,
            context_after: window.following,
            pretty_json: true,
        }
    }
}

/// Performance-related configuration
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Evaluate sentences on a worker pool
    pub parallel: bool,

    /// Number of worker threads (0 = auto)
    pub worker_threads: usize,
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()).into());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: CliConfig =
            toml::from_str(content).map_err(|e| CliError::ConfigError(e.to_string()))?;
        Ok(config)
    }

    /// Load from an optional path, falling back to defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                log::info!("Loading configuration from {}", path.display());
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Context window, or `None` when context output is disabled
    pub fn context_window(&self) -> Option<ContextWindow> {
        self.output.context.then_some(ContextWindow {
            preceding: self.output.context_before,
            following: self.output.context_after,
        })
    }

    /// Build the detector configuration
    pub fn detector_config(&self) -> Result<DetectorConfig> {
        DetectorConfig::builder()
            .quantifiers(self.detection.quantifiers.iter().cloned())
            .exclusions(self.detection.exclusions.iter().cloned())
            .context(self.context_window())
            .parallel(self.performance.parallel)
            .build()
            .map_err(|e| CliError::ConfigError(e.to_string()).into())
    }
}
