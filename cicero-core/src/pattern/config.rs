//! TOML schema for extraction rules

use super::ResidualPolicy;
use crate::error::{Error, Result};
use crate::specification::Specification;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root rule configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    pub specification: Specification,
    #[serde(default)]
    pub metadata: RuleMetadata,
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub session: Option<SessionConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleMetadata {
    #[serde(default)]
    pub description: String,
}

/// Speaker expression and boundary policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    pub pattern: String,
    /// No default: every rule states what happens to unmatched text
    pub residual: ResidualPolicy,
    /// First words that disqualify a match as a speaker marker
    #[serde(default)]
    pub exclude_speakers: Vec<String>,
}

/// Markers bounding the part of the document that holds speeches
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl RuleConfig {
    /// Parse and validate a rule from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RuleConfig = toml::from_str(content)
            .map_err(|e| Error::Configuration(format!("Failed to parse rule TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a rule from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("Failed to read file '{}': {}", path.display(), e))
        })?;
        let config: RuleConfig = toml::from_str(&content).map_err(|e| {
            Error::Configuration(format!(
                "Failed to parse TOML from '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.specification.validate()?;

        if self.matcher.pattern.trim().is_empty() {
            return Err(Error::Configuration(format!(
                "rule {} has an empty matcher pattern",
                self.specification
            )));
        }

        if self
            .matcher
            .exclude_speakers
            .iter()
            .any(|word| word.trim().is_empty() || word.contains(char::is_whitespace))
        {
            return Err(Error::Configuration(format!(
                "rule {}: exclude_speakers entries must be single words",
                self.specification
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[specification]
country = "NL"
institution = "PARLIAMENT"
language = "nl"
protocol_type = "PLENARY"

[matcher]
pattern = '(?m)^(?P<speaker>[A-Z]+):'
residual = "retain"
"#;

    #[test]
    fn test_parse_minimal() {
        let config = RuleConfig::from_toml_str(MINIMAL).unwrap();
        assert_eq!(
            config.specification,
            Specification::new("NL", "PARLIAMENT", "nl", "PLENARY")
        );
        assert_eq!(config.matcher.residual, ResidualPolicy::Retain);
        assert!(config.session.is_none());
        assert!(config.metadata.description.is_empty());
    }

    #[test]
    fn test_residual_policy_is_required() {
        let content = MINIMAL.replace("residual = \"retain\"\n", "");
        let err = RuleConfig::from_toml_str(&content).unwrap_err();
        assert!(err.to_string().contains("residual"));
    }

    #[test]
    fn test_empty_specification_field_rejected() {
        let content = MINIMAL.replace("country = \"NL\"", "country = \"\"");
        assert!(RuleConfig::from_toml_str(&content).is_err());
    }

    #[test]
    fn test_multiword_exclusion_rejected() {
        let content = format!("{MINIMAL}exclude_speakers = [\"Herr Kollege\"]\n");
        let err = RuleConfig::from_toml_str(&content).unwrap_err();
        assert!(err.to_string().contains("single words"));
    }

    #[test]
    fn test_from_file_missing() {
        let err = RuleConfig::from_file(Path::new("/nonexistent/rule.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
