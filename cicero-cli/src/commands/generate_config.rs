//! Generate config command implementation

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// Kind of configuration template
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TemplateKind {
    /// Pattern rule for a new jurisdiction
    Rule,
    /// Sentence policy for a new language
    Language,
}

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Template to generate
    #[arg(short, long, value_enum, default_value = "rule")]
    pub kind: TemplateKind,

    /// Language code used in the template
    #[arg(short = 'l', long, value_name = "CODE", default_value = "de")]
    pub language_code: String,

    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        let (label, flag) = match self.kind {
            TemplateKind::Rule => ("pattern rule", "--rule"),
            TemplateKind::Language => ("language configuration", "--language-config"),
        };

        println!("Generating {label} template...");
        println!("  Language code: {}", self.language_code);
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, self.generate_template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the file to match your documents");
        println!("2. Validate it:");
        println!("   cicero validate {flag} {}", self.output.display());
        println!("3. Use it for processing:");
        match self.kind {
            TemplateKind::Rule => println!(
                "   cicero extract -i protocol.txt --spec XX/PARLIAMENT/{}/PLENARY --rules {}",
                self.language_code,
                self.output.display()
            ),
            TemplateKind::Language => println!(
                "   cicero split -i speech.txt --language-config {}",
                self.output.display()
            ),
        }

        Ok(())
    }

    /// Generate template content
    fn generate_template(&self) -> String {
        match self.kind {
            TemplateKind::Rule => self.rule_template(),
            TemplateKind::Language => self.language_template(),
        }
    }

    fn rule_template(&self) -> String {
        format!(
            r#"# Pattern rule for a plenary protocol

[specification]
country = "XX"
institution = "PARLIAMENT"
language = "{}"
protocol_type = "PLENARY"

[metadata]
description = "Plenary protocol"

[matcher]
# One match per speech start. Named groups:
#   speaker (required), party, constituency, role, body (all optional)
pattern = '''(?m)^(?P<speaker>[^\n:(]+?)(?:\s*\((?P<party>[^)\n]+)\))?:[\t ]*'''

# Text outside every speech: "discard" or "retain"
residual = "retain"

# Speaker labels starting with these words are not speech boundaries
exclude_speakers = []

# Optional markers bounding the part of the document that holds speeches
# [session]
# start = '(?m)^Beginn: \d{{1,2}}\.\d{{2}} Uhr'
# end = '(?m)^\(Schluss: \d{{1,2}}\.\d{{2}} Uhr\)'
"#,
            self.language_code
        )
    }

    fn language_template(&self) -> String {
        format!(
            r#"# Sentence policy for {code}

[metadata]
code = "{code}"
name = "Custom Language"

# Sentence terminator characters
[terminators]
chars = [".", "!", "?"]

# Closing quotes and brackets that stay with the sentence
[closers]
chars = ['"', "'", ")", "]"]

[numbers]
# "3. Lesung": a number followed by a dot is not a boundary
ordinal_numbers = false

# Abbreviations organized by category, without the trailing dot
[abbreviations]
# "J. Smith": a single capital letter followed by a dot is not a boundary
initials = true

titles = ["Dr", "Prof"]
common = ["etc", "e.g", "i.e"]

# Add more categories as needed:
# legal = ["Art", "Nr"]
# dates = ["Jan", "Feb", "Mar"]
"#,
            code = self.language_code
        )
    }
}
