//! Configuration for wordfreq.
//!
//! Config priority: explicit path > `$WORDFREQ_CONFIG` > user
//! (~/.config/wordfreq/config.toml) > defaults. Command-line flags are applied
//! on top by the binary.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Upper bound on printed lines
pub const MAX_TOP_N: usize = 25;

/// Most lines printed by default
pub const DEFAULT_TOP_N: usize = MAX_TOP_N;

/// Default mailbox capacity for every actor
pub const DEFAULT_MAILBOX_CAPACITY: usize = 100;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
  /// Actor pipeline settings
  #[serde(default)]
  pub pipeline: PipelineConfig,

  /// Logging settings
  #[serde(default)]
  pub logging: LoggingConfig,
}

// ============================================================================
// Pipeline Configuration
// ============================================================================

/// Settings for the actor pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
  /// Capacity of every actor mailbox; senders wait when it is full
  pub mailbox_capacity: usize,

  /// Maximum number of ranked lines written
  pub top_n: usize,
}

impl Default for PipelineConfig {
  fn default() -> Self {
    Self {
      mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
      top_n: DEFAULT_TOP_N,
    }
  }
}

// ============================================================================
// Logging Configuration
// ============================================================================

/// Logging settings. Logs go to stderr; stdout carries only the ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
  /// Log level: off, error, warn, info, debug, trace
  pub level: String,
}

impl Default for LoggingConfig {
  fn default() -> Self {
    Self {
      level: "warn".to_string(),
    }
  }
}

// ============================================================================
// Loading
// ============================================================================

impl Config {
  /// Parse a TOML document
  pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
    Ok(toml::from_str(content)?)
  }

  /// Read and parse a config file. Failures are reported, not defaulted.
  pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Resolve the configuration for a run.
  ///
  /// An explicit path (or `$WORDFREQ_CONFIG`) must load cleanly. A broken
  /// user config only produces a warning and falls back to defaults.
  pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
    if let Some(path) = explicit {
      return Self::from_file(path);
    }

    if let Ok(path) = std::env::var("WORDFREQ_CONFIG") {
      return Self::from_file(Path::new(&path));
    }

    if let Some(user_config_path) = Self::user_config_path()
      && user_config_path.exists()
    {
      match Self::from_file(&user_config_path) {
        Ok(config) => return Ok(config),
        Err(e) => warn!(error = %e, "Ignoring unreadable user config"),
      }
    }

    Ok(Self::default())
  }

  /// Get the user-level config path
  pub fn user_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("WORDFREQ_CONFIG_DIR") {
      return Some(PathBuf::from(path).join("config.toml"));
    }

    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
      return Some(PathBuf::from(path).join("wordfreq").join("config.toml"));
    }

    dirs::config_dir().map(|p: PathBuf| p.join("wordfreq").join("config.toml"))
  }

  /// Reject values the pipeline cannot run with
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.pipeline.mailbox_capacity == 0 {
      return Err(ConfigError::Invalid("pipeline.mailbox_capacity must be at least 1".to_string()));
    }
    if self.pipeline.top_n == 0 || self.pipeline.top_n > MAX_TOP_N {
      return Err(ConfigError::Invalid(format!(
        "pipeline.top_n must be between 1 and {}",
        MAX_TOP_N
      )));
    }
    Ok(())
  }
}

/// Errors while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("failed to read config {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("failed to parse config {}: {source}", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },
  #[error("invalid config: {0}")]
  Toml(#[from] toml::de::Error),
  #[error("invalid config: {0}")]
  Invalid(String),
}
