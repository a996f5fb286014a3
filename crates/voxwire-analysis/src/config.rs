//! Engine configuration, loadable from RON, TOML or JSON.
//!
//! The format is chosen by file extension. Every field has a default, so a
//! file only needs to name what it overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::depth::DepthStrategy;
use crate::history::DEFAULT_HISTORY_CAPACITY;
use crate::oscillation::DEFAULT_MIN_TOGGLES;

/// Largest accepted history window, in ticks.
pub const MAX_HISTORY_CAPACITY: usize = 1 << 16;

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A value parsed but is out of range.
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported configuration formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Determine the format from a file's extension.
pub fn detect_format(path: &Path) -> Result<Format, ConfigError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(ConfigError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// AnalysisConfig
// ===========================================================================

/// Tunables for a [`CircuitAnalyzer`](crate::engine::CircuitAnalyzer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Ticks of powered-state history kept for oscillation detection.
    pub history_capacity: usize,
    /// Transitions within the window for a cell to count as oscillating.
    pub min_toggles: u32,
    pub depth_strategy: DepthStrategy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            min_toggles: DEFAULT_MIN_TOGGLES,
            depth_strategy: DepthStrategy::default(),
        }
    }
}

impl AnalysisConfig {
    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity < 2 {
            return Err(ConfigError::Invalid {
                field: "history_capacity",
                reason: format!(
                    "must be at least 2 to observe a transition, got {}",
                    self.history_capacity
                ),
            });
        }
        if self.history_capacity > MAX_HISTORY_CAPACITY {
            return Err(ConfigError::Invalid {
                field: "history_capacity",
                reason: format!(
                    "must be at most {MAX_HISTORY_CAPACITY}, got {}",
                    self.history_capacity
                ),
            });
        }
        if self.min_toggles == 0 {
            return Err(ConfigError::Invalid {
                field: "min_toggles",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Parse and validate configuration text in the given format.
    pub fn from_str_with_format(content: &str, format: Format) -> Result<Self, ConfigError> {
        Self::parse(content, format, Path::new("<inline>"))
    }

    /// Read, parse and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let format = detect_format(path)?;
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, format, path)
    }

    fn parse(content: &str, format: Format, file: &Path) -> Result<Self, ConfigError> {
        let parse_err = |detail: String| ConfigError::Parse {
            file: file.to_path_buf(),
            detail,
        };
        let config: Self = match format {
            Format::Ron => ron::from_str(content).map_err(|e| parse_err(e.to_string()))?,
            Format::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string()))?,
            Format::Json => serde_json::from_str(content).map_err(|e| parse_err(e.to_string()))?,
        };
        config.validate()?;
        Ok(config)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
