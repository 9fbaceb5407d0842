//! Validate command implementation

use anyhow::Result;
use cicero_core::{LanguageConfig, PatternRule, RegexPatternRule, SentenceSplitter};
use clap::{ArgGroup, Args};
use std::path::{Path, PathBuf};

/// Arguments for the validate command
#[derive(Debug, Args)]
#[command(group(ArgGroup::new("target").required(true).args(["rule", "language_config"])))]
pub struct ValidateArgs {
    /// Pattern rule file to validate
    #[arg(short, long, value_name = "FILE")]
    pub rule: Option<PathBuf>,

    /// Language configuration file to validate
    #[arg(short = 'c', long, value_name = "FILE")]
    pub language_config: Option<PathBuf>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        if let Some(path) = &self.rule {
            validate_rule(path)?;
        }
        if let Some(path) = &self.language_config {
            validate_language(path)?;
        }
        Ok(())
    }
}

fn validate_rule(path: &Path) -> Result<()> {
    println!("Validating pattern rule: {}", path.display());

    // Parsing checks the schema, compiling checks the capture group contract
    match RegexPatternRule::from_file(path).and_then(|rule| rule_details(&rule)) {
        Ok(details) => {
            println!("✓ Rule is valid!");
            for line in details {
                println!("  {line}");
            }
            Ok(())
        }
        Err(e) => {
            println!("✗ Rule is invalid!");
            println!("  Error: {e}");
            Err(anyhow::anyhow!("Validation failed: {}", e))
        }
    }
}

/// Report lines for a rule whose matcher compiles
fn rule_details(rule: &RegexPatternRule) -> cicero_core::Result<Vec<String>> {
    let matcher = rule.compile()?;
    let groups = matcher.optional_groups();

    let mut details = vec![
        format!("Specification: {}", rule.specification()),
        format!("Residual policy: {:?}", rule.residual_policy()),
        format!(
            "Optional groups: {}",
            if groups.is_empty() {
                "none".to_string()
            } else {
                groups.join(", ")
            }
        ),
        format!(
            "Session markers: {}",
            if matcher.has_session_markers() { "yes" } else { "no" }
        ),
    ];
    if !rule.description().is_empty() {
        details.push(format!("Description: {}", rule.description()));
    }
    Ok(details)
}

fn validate_language(path: &Path) -> Result<()> {
    println!("Validating language configuration: {}", path.display());

    let result = LanguageConfig::from_file(path)
        .and_then(|config| SentenceSplitter::from_config(&config).map(|_| config));

    match result {
        Ok(config) => {
            println!("✓ Configuration is valid!");
            println!("  Language code: {}", config.metadata.code);
            println!("  Language name: {}", config.metadata.name);
            println!("  Abbreviations: {}", config.abbreviation_count());
            Ok(())
        }
        Err(e) => {
            println!("✗ Configuration is invalid!");
            println!("  Error: {e}");
            Err(anyhow::anyhow!("Validation failed: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    fn rule_args(path: &Path) -> ValidateArgs {
        ValidateArgs {
            rule: Some(path.to_path_buf()),
            language_config: None,
        }
    }

    #[test]
    fn test_validate_valid_rule() {
        let file = temp_file(
            r#"
[specification]
country = "AT"
institution = "PARLIAMENT"
language = "de"
protocol_type = "PLENARY"

[matcher]
pattern = '(?m)^(?P<speaker>[^:\n]+):'
residual = "retain"
"#,
        );
        assert!(rule_args(file.path()).execute().is_ok());
    }

    #[test]
    fn test_rule_details_report_groups_and_session() {
        let rule = RegexPatternRule::from_toml_str(
            r#"
[specification]
country = "AT"
institution = "PARLIAMENT"
language = "de"
protocol_type = "PLENARY"

[metadata]
description = "Nationalrat"

[matcher]
pattern = '(?m)^(?P<speaker>[^:(\n]+?)(?: \((?P<party>[^)\n]+)\))?:'
residual = "discard"

[session]
start = '(?m)^Beginn der Sitzung'
"#,
        )
        .unwrap();

        let details = rule_details(&rule).unwrap();
        assert!(details.contains(&"Specification: AT/PARLIAMENT/de/PLENARY".to_string()));
        assert!(details.contains(&"Optional groups: party".to_string()));
        assert!(details.contains(&"Session markers: yes".to_string()));
        assert!(details.contains(&"Description: Nationalrat".to_string()));
    }

    #[test]
    fn test_rule_details_builtin_bundestag() {
        let config = cicero_core::pattern::builtin::builtin_rule_configs().unwrap()[0].clone();
        let details = rule_details(&RegexPatternRule::new(config)).unwrap();
        assert!(details
            .contains(&"Optional groups: constituency, party, role, body".to_string()));
        assert!(details.contains(&"Session markers: yes".to_string()));
    }

    #[test]
    fn test_validate_rule_without_speaker_group() {
        let file = temp_file(
            r#"
[specification]
country = "AT"
institution = "PARLIAMENT"
language = "de"
protocol_type = "PLENARY"

[matcher]
pattern = '(?m)^([^:\n]+):'
residual = "retain"
"#,
        );
        let err = rule_args(file.path()).execute().unwrap_err();
        assert!(err.to_string().contains("Validation failed"));
    }

    #[test]
    fn test_validate_rule_with_bad_regex() {
        let file = temp_file(
            r#"
[specification]
country = "AT"
institution = "PARLIAMENT"
language = "de"
protocol_type = "PLENARY"

[matcher]
pattern = '(?P<speaker>[unclosed'
residual = "retain"
"#,
        );
        assert!(rule_args(file.path()).execute().is_err());
    }

    #[test]
    fn test_validate_valid_language_config() {
        let file = temp_file(
            r#"
[metadata]
code = "fr"
name = "French"

[terminators]
chars = [".", "!", "?"]

[abbreviations]
titles = ["M", "Mme", "Dr"]
"#,
        );
        let args = ValidateArgs {
            rule: None,
            language_config: Some(file.path().to_path_buf()),
        };
        assert!(args.execute().is_ok());
    }

    #[test]
    fn test_validate_invalid_language_config() {
        let file = temp_file(
            r#"
[metadata]
code = ""
name = "Test"

[terminators]
chars = ["."]
"#,
        );
        let args = ValidateArgs {
            rule: None,
            language_config: Some(file.path().to_path_buf()),
        };
        assert!(args.execute().is_err());
    }
}
