//! Harness configuration module.
//!
//! This module defines configuration for the benchmark driver: which fixture
//! to read by default, how to render the report, and how each input is run.

use super::ConfigResult;
use super::Validate;
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Largest accepted `max_record_len`, 1 GiB.
const MAX_RECORD_LEN_LIMIT: usize = 1 << 30;

/// Largest accepted number of repetitions per call.
const MAX_REPETITIONS: u32 = 10_000;

/// Report format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Harness configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HarnessConfig {
    /// Fixture read by `run` when no file is given
    pub default_fixture: PathBuf,

    /// Report format
    pub output_format: OutputFormat,

    /// Whether every matcher's output is compared against the first matcher's
    pub verify_results: bool,

    /// Timed calls per matcher and record
    pub repetitions: u32,

    /// Longest pattern or text accepted from a fixture, in bytes
    pub max_record_len: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            default_fixture: PathBuf::from("test_in.txt"),
            output_format: OutputFormat::default(),
            verify_results: true,
            repetitions: 1,
            max_record_len: 64 * 1024 * 1024, // 64 MiB
        }
    }
}

impl Validate for HarnessConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.default_fixture.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "default_fixture cannot be empty".to_string(),
            ));
        }

        if self.repetitions == 0 || self.repetitions > MAX_REPETITIONS {
            return Err(ConfigError::ValueOutOfRange {
                key: "harness.repetitions".to_string(),
                message: format!("must be between 1 and {MAX_REPETITIONS}"),
            });
        }

        if self.max_record_len == 0 || self.max_record_len > MAX_RECORD_LEN_LIMIT {
            return Err(ConfigError::ValueOutOfRange {
                key: "harness.max_record_len".to_string(),
                message: format!("must be between 1 and {MAX_RECORD_LEN_LIMIT}"),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(HarnessConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_repetitions_rejected() {
        let config = HarnessConfig {
            repetitions: 0,
            ..HarnessConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange { ref key, .. }) if key == "harness.repetitions"
        ));
    }

    #[test]
    fn test_output_format_serde() {
        assert_eq!(serde_json::to_string(&OutputFormat::Json).unwrap(), "\"json\"");
        let parsed: OutputFormat = serde_json::from_str("\"text\"").unwrap();
        assert_eq!(parsed, OutputFormat::Text);
    }
}
