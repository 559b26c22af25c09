//! CLI configuration
//!
//! Loaded from a JSON file; every field is optional.
//!
//! ```json
//! { "log_level": "trace", "max_elements": 50000, "default_direction": "asc", "pretty": true }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::observability::Severity;
use crate::sort::Direction;

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SortConfig {
    /// Minimum log severity (optional, default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Largest accepted document, in elements (optional, default 1,000,000)
    #[serde(default = "default_max_elements")]
    pub max_elements: usize,

    /// Final direction when none is given (optional, default "asc")
    #[serde(default)]
    pub default_direction: Direction,

    /// Pretty-print output (optional, default false)
    #[serde(default)]
    pub pretty: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_elements() -> usize {
    1_000_000
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            max_elements: default_max_elements(),
            default_direction: Direction::default(),
            pretty: false,
        }
    }
}

impl SortConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: SortConfig = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load from `path`, or defaults when no path is given
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> CliResult<()> {
        self.severity()?;

        if self.max_elements == 0 {
            return Err(CliError::config_error("max_elements must be > 0"));
        }

        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level.parse().map_err(CliError::config_error)
    }
}
