//! Language configuration schema
//!
//! One TOML file per language describes the sentence boundary policy.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Root language configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageConfig {
    pub metadata: Metadata,
    pub terminators: Terminators,
    #[serde(default)]
    pub closers: Closers,
    #[serde(default)]
    pub numbers: Numbers,
    #[serde(default)]
    pub abbreviations: Abbreviations,
}

/// Language metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub code: String,
    pub name: String,
}

/// Sentence terminating characters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Terminators {
    pub chars: Vec<char>,
}

/// Characters that may trail a terminator inside the same sentence
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Closers {
    #[serde(default)]
    pub chars: Vec<char>,
}

/// Number handling
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Numbers {
    /// A number followed by a dot is an ordinal, not a boundary
    #[serde(default)]
    pub ordinal_numbers: bool,
}

/// Abbreviation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Abbreviations {
    /// A single upper-case letter followed by a dot is an initial
    #[serde(default)]
    pub initials: bool,
    /// Category name to abbreviation list
    #[serde(flatten)]
    pub categories: HashMap<String, Vec<String>>,
}

impl LanguageConfig {
    /// Parse and validate a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| Error::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("Failed to read file '{}': {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            Error::Configuration(format!(
                "Failed to parse TOML from '{}': {e}",
                path.display()
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.metadata.code.trim().is_empty() {
            return Err(Error::Configuration(
                "Language code must not be empty".to_string(),
            ));
        }

        if self.terminators.chars.is_empty() {
            return Err(Error::Configuration(
                "No terminator characters defined".to_string(),
            ));
        }

        for &ch in &self.terminators.chars {
            if ch.is_alphanumeric() || ch.is_whitespace() {
                return Err(Error::Configuration(format!(
                    "Invalid terminator character {ch:?}"
                )));
            }
        }

        for &ch in &self.closers.chars {
            if ch.is_alphanumeric() || ch.is_whitespace() {
                return Err(Error::Configuration(format!(
                    "Invalid closer character {ch:?}"
                )));
            }
            if self.terminators.chars.contains(&ch) {
                return Err(Error::Configuration(format!(
                    "Character {ch:?} is both terminator and closer"
                )));
            }
        }

        for (category, list) in &self.abbreviations.categories {
            if let Some(bad) = list
                .iter()
                .find(|abbr| abbr.trim().is_empty() || abbr.contains(char::is_whitespace))
            {
                return Err(Error::Configuration(format!(
                    "Invalid abbreviation {bad:?} in category '{category}'"
                )));
            }
        }

        Ok(())
    }

    /// Total number of configured abbreviations
    pub fn abbreviation_count(&self) -> usize {
        self.abbreviations.categories.values().map(Vec::len).sum()
    }
}
