//! List command implementation

use super::ListCommands;
use crate::output::OutputFormat;
use anyhow::Result;
use cicero_core::sentence::embedded_language_configs;
use cicero_core::ResidualPolicy;
use std::io::Write;

/// Print the requested listing to `out`
pub fn execute(subcommand: &ListCommands, out: &mut dyn Write) -> Result<()> {
    match subcommand {
        ListCommands::Patterns { rules } => {
            let registry = super::build_registry(rules)?;
            writeln!(out, "Registered pattern rules:")?;
            for rule in registry.rules() {
                let residual = match rule.residual_policy() {
                    ResidualPolicy::Discard => "discard",
                    ResidualPolicy::Retain => "retain",
                };
                writeln!(
                    out,
                    "  {:<32} {} (residual: {residual})",
                    rule.specification().to_string(),
                    rule.description()
                )?;
            }
        }
        ListCommands::Languages => {
            writeln!(out, "Embedded languages:")?;
            for config in embedded_language_configs()? {
                writeln!(
                    out,
                    "  {:<4} {:<10} {} abbreviations",
                    config.metadata.code,
                    config.metadata.name,
                    config.abbreviation_count()
                )?;
            }
        }
        ListCommands::Formats => {
            writeln!(out, "Output formats:")?;
            for (format, description) in OutputFormat::all() {
                writeln!(out, "  {:<10} {description}", format.name())?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(subcommand: ListCommands) -> String {
        let mut out = Vec::new();
        execute(&subcommand, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_list_patterns() {
        let output = listing(ListCommands::Patterns { rules: Vec::new() });
        assert!(output.contains("DE/PARLIAMENT/de/PLENARY"));
        assert!(output.contains("NL/PARLIAMENT/nl/PLENARY"));
        assert!(output.contains("residual: retain"));
    }

    #[test]
    fn test_list_languages() {
        let output = listing(ListCommands::Languages);
        assert!(output.contains("German"));
        assert!(output.contains("English"));
        assert!(output.contains("Dutch"));
    }

    #[test]
    fn test_list_formats() {
        let output = listing(ListCommands::Formats);
        for name in ["text", "json", "markdown"] {
            assert!(output.contains(name));
        }
    }

    #[test]
    fn test_list_patterns_missing_rule_file() {
        let mut out = Vec::new();
        let subcommand = ListCommands::Patterns {
            rules: vec!["/nonexistent/rule.toml".into()],
        };
        assert!(execute(&subcommand, &mut out).is_err());
    }
}
