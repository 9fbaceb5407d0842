//! Configuration module
//!
//! Optional `cicero.toml` supplying defaults for the `extract` command.
//! Command-line flags always take precedence.

use crate::error::CliError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Extraction configuration
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceConfig,
}

impl CliConfig {
    /// Load from `path`, or the defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::ConfigError(format!("Failed to read '{}': {e}", path.display()))
        })?;
        let config = toml::from_str(&content).map_err(|e| {
            CliError::ConfigError(format!("Failed to parse '{}': {e}", path.display()))
        })?;
        log::debug!("loaded CLI configuration from {}", path.display());
        Ok(config)
    }
}

/// Extraction-related configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Default country code
    pub country: String,

    /// Default institution code
    pub institution: String,

    /// Default language code
    pub language: String,

    /// Default protocol type
    pub protocol_type: String,

    /// Split speeches into sentences
    pub split_sentences: bool,

    /// Additional rule files or directories
    pub rules: Vec<PathBuf>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            country: "DE".to_string(),
            institution: "PARLIAMENT".to_string(),
            language: "de".to_string(),
            protocol_type: "PLENARY".to_string(),
            split_sentences: false,
            rules: Vec::new(),
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub default_format: String,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            pretty_json: true,
        }
    }
}

/// Performance-related configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Process multiple input files in parallel
    pub parallel: bool,

    /// Number of worker threads (0 = auto)
    pub worker_threads: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            worker_threads: 0,
        }
    }
}

impl PerformanceConfig {
    /// Worker threads to use, resolving 0 to the CPU count
    pub fn threads(&self) -> usize {
        if self.worker_threads == 0 {
            num_cpus::get()
        } else {
            self.worker_threads
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = CliConfig::load(None).unwrap();
        assert_eq!(config.extraction.country, "DE");
        assert_eq!(config.extraction.institution, "PARLIAMENT");
        assert_eq!(config.extraction.language, "de");
        assert_eq!(config.extraction.protocol_type, "PLENARY");
        assert_eq!(config.output.default_format, "text");
        assert!(config.performance.parallel);
        assert!(config.performance.threads() >= 1);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[extraction]
country = "NL"
language = "nl"
split_sentences = true

[performance]
worker_threads = 3
"#
        )
        .unwrap();

        let config = CliConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.extraction.country, "NL");
        assert_eq!(config.extraction.institution, "PARLIAMENT");
        assert!(config.extraction.split_sentences);
        assert!(config.output.pretty_json);
        assert_eq!(config.performance.threads(), 3);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = CliConfig::load(Some(Path::new("/nonexistent/cicero.toml"))).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::ConfigError(_))
        ));
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[extraction\ncountry = ").unwrap();
        let err = CliConfig::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
