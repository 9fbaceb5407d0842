//! Embedded language configurations
//!
//! Parsed once on first access and shared for the life of the process.

use super::config::LanguageConfig;
use crate::error::{Error, Result};
use std::sync::OnceLock;

const EMBEDDED_LANGUAGES: [(&str, &str); 3] = [
    ("de", include_str!("../../configs/languages/german.toml")),
    ("en", include_str!("../../configs/languages/english.toml")),
    ("nl", include_str!("../../configs/languages/dutch.toml")),
];

static EMBEDDED: OnceLock<std::result::Result<Vec<LanguageConfig>, String>> = OnceLock::new();

fn load_embedded() -> std::result::Result<Vec<LanguageConfig>, String> {
    EMBEDDED_LANGUAGES
        .iter()
        .map(|(code, content)| {
            LanguageConfig::from_toml_str(content)
                .map_err(|e| format!("Failed to parse {code} config: {e}"))
        })
        .collect()
}

/// Every embedded language configuration
pub fn embedded_language_configs() -> Result<&'static [LanguageConfig]> {
    EMBEDDED
        .get_or_init(load_embedded)
        .as_deref()
        .map_err(|e| Error::Configuration(e.clone()))
}

/// Look up an embedded configuration by code (`de`) or name (`german`)
pub fn get_language_config(code: &str) -> Result<&'static LanguageConfig> {
    let wanted = code.trim().to_lowercase();
    embedded_language_configs()?
        .iter()
        .find(|config| {
            config.metadata.code.to_lowercase() == wanted
                || config.metadata.name.to_lowercase() == wanted
        })
        .ok_or_else(|| Error::UnsupportedLanguage(code.to_string()))
}

/// Codes of the embedded languages
pub fn available_languages() -> impl Iterator<Item = &'static str> {
    EMBEDDED_LANGUAGES.iter().map(|(code, _)| *code)
}
