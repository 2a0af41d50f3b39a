//! Driver configuration
//!
//! Controls how `Task::try_run` drives a task and whether error traces are
//! captured.
//!
//! # Configuration hierarchy
//!
//! ```text
//! Priority (high → low):
//! 1. Environment variables (EXPECTED_RESUME_LIMIT, EXPECTED_CAPTURE_TRACES)
//! 2. JSON text passed to `RunConfig::from_json_str`
//! 3. Default values
//! ```
//!
//! # Usage
//!
//! ```rust
//! use expected::util::config::RunConfig;
//!
//! let config = RunConfig::from_json_str(r#"{ "resume_limit": 64 }"#).unwrap();
//! assert_eq!(config.resume_limit, Some(64));
//! assert!(config.capture_traces);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding [`RunConfig::resume_limit`].
pub const ENV_RESUME_LIMIT: &str = "EXPECTED_RESUME_LIMIT";

/// Environment variable overriding [`RunConfig::capture_traces`].
pub const ENV_CAPTURE_TRACES: &str = "EXPECTED_CAPTURE_TRACES";

/// Settings applied when a task completes and when it is driven.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Maximum number of resumes `try_run` performs before giving up.
    /// `None` means unbounded.
    #[serde(default)]
    pub resume_limit: Option<usize>,
    /// Capture a trace when a body completes with an error.
    #[serde(default = "default_capture_traces")]
    pub capture_traces: bool,
    /// Name used for tasks built without an explicit name.
    #[serde(default = "default_task_name")]
    pub default_task_name: String,
}

fn default_capture_traces() -> bool {
    true
}

fn default_task_name() -> String {
    "task".to_string()
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            resume_limit: None,
            capture_traces: true,
            default_task_name: "task".to_string(),
        }
    }
}

impl RunConfig {
    /// Create the default configuration.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the resume limit.
    #[inline]
    pub fn with_resume_limit(
        mut self,
        limit: usize,
    ) -> Self {
        self.resume_limit = Some(limit);
        self
    }

    /// Enable or disable trace capture.
    #[inline]
    pub fn with_capture_traces(
        mut self,
        capture: bool,
    ) -> Self {
        self.capture_traces = capture;
        self
    }

    /// Parse a configuration from JSON; missing fields keep their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(ConfigError::Parse)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn with_overrides<F>(
        mut self,
        lookup: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_RESUME_LIMIT) {
            let raw = raw.trim();
            self.resume_limit = if raw.is_empty() || raw.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(raw.parse().map_err(|_| ConfigError::InvalidValue {
                    key: ENV_RESUME_LIMIT,
                    value: raw.to_string(),
                })?)
            };
        }

        if let Some(raw) = lookup(ENV_CAPTURE_TRACES) {
            self.capture_traces = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: ENV_CAPTURE_TRACES,
                        value: raw,
                    })
                }
            };
        }

        Ok(self)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("Config serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}
