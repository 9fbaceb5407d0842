//! Split command implementation

use crate::input::{resolve_patterns, FileReader};
use crate::output::{create_formatter, OutputFormat};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use cicero_core::{LanguageConfig, SentenceSplitter};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the split command
#[derive(Debug, Args)]
pub struct SplitArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Language code or name of an embedded policy
    #[arg(short, long, value_name = "CODE", default_value = "de")]
    pub language: String,

    /// External language configuration file
    #[arg(long, value_name = "FILE", conflicts_with = "language")]
    pub language_config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Compact JSON output
    #[arg(long)]
    pub compact: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl SplitArgs {
    /// Execute the split command
    pub fn execute(&self) -> Result<()> {
        super::init_logging(self.verbose, self.quiet);
        log::debug!("Arguments: {:?}", self);

        let splitter = self.splitter()?;
        log::info!(
            "Splitting sentences with the '{}' policy",
            splitter.policy().language()
        );

        let files = resolve_patterns(&self.input)?;
        let progress = ProgressReporter::new(files.len(), "sentences", self.quiet);

        let mut formatter = create_formatter(
            self.format,
            super::open_output(self.output.as_deref())?,
            !self.compact,
        );

        for path in &files {
            let source = path.display().to_string();
            let text = match FileReader::read_text(path) {
                Ok(text) => text,
                Err(e) => {
                    progress.file_finished(&source, None);
                    progress.finish();
                    return Err(e);
                }
            };
            let sentences: Vec<String> = splitter.split(&text).collect();
            progress.file_finished(&source, Some(sentences.len()));
            formatter.format_sentences(&source, &sentences)?;
        }
        formatter.finish()?;
        progress.finish();

        log::info!("Split {} files into {}", files.len(), progress.summary());
        Ok(())
    }

    fn splitter(&self) -> Result<SentenceSplitter> {
        match &self.language_config {
            Some(path) => {
                let config = LanguageConfig::from_file(path)?;
                log::info!(
                    "Loaded language configuration '{}' from {}",
                    config.metadata.code,
                    path.display()
                );
                Ok(SentenceSplitter::from_config(&config)?)
            }
            None => SentenceSplitter::for_language(&self.language)
                .with_context(|| format!("Unknown language '{}'", self.language)),
        }
    }
}
