//! TOML-based configuration for userlint.
//!
//! Every key has a default, so an empty file (or no file at all) is a
//! usable configuration. Command-line flags override these values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::ConfigError;
use crate::tld::DEFAULT_SUFFIX_LIST;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level configuration loaded from a TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Public suffix list settings.
    #[serde(default)]
    pub tld: TldConfig,

    /// History scan settings.
    #[serde(default)]
    pub scan: ScanConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Where the public suffix list is read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TldConfig {
    /// Path to a file in Public Suffix List format.
    #[serde(default = "default_suffix_list")]
    pub suffix_list: PathBuf,
}

fn default_suffix_list() -> PathBuf {
    PathBuf::from(DEFAULT_SUFFIX_LIST)
}

impl Default for TldConfig {
    fn default() -> Self {
        Self {
            suffix_list: default_suffix_list(),
        }
    }
}

/// Which part of history is scanned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Revision the commit walk starts from (default `HEAD`).
    #[serde(default = "default_revision")]
    pub revision: String,
}

fn default_revision() -> String {
    "HEAD".into()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            revision: default_revision(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Minimum tracing level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading & validation
// ---------------------------------------------------------------------------

impl AppConfig {
    /// Load an [`AppConfig`] from a TOML file at the given path.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading configuration");

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        debug!("configuration parsed successfully");
        Ok(config)
    }

    /// Validate that all values are present and sane.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tld.suffix_list.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "tld.suffix_list".into(),
                detail: "suffix list path must not be empty".into(),
            });
        }
        if self.scan.revision.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "scan.revision".into(),
                detail: "revision must not be empty".into(),
            });
        }
        if !LOG_LEVELS.contains(&self.log.level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "log.level".into(),
                detail: format!("expected one of {}", LOG_LEVELS.join(", ")),
            });
        }
        Ok(())
    }
}
