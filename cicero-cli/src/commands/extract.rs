//! Extract command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader};
use crate::output::{create_formatter, OutputFormat};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use cicero_core::{
    ExtractedSpeech, LanguageConfig, ProtocolExtraction, SentenceSplitter, Specification,
    SpeechExtractor,
};
use clap::Args;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Arguments for the extract command
#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Full specification, e.g. DE/PARLIAMENT/de/PLENARY
    #[arg(long, value_name = "C/I/L/P", conflicts_with_all = ["country", "institution", "language", "protocol_type"])]
    pub spec: Option<String>,

    /// Country code [default: DE]
    #[arg(short, long, value_name = "CODE")]
    pub country: Option<String>,

    /// Institution code [default: PARLIAMENT]
    #[arg(short = 'n', long, value_name = "CODE")]
    pub institution: Option<String>,

    /// Language code [default: de]
    #[arg(short, long, value_name = "CODE")]
    pub language: Option<String>,

    /// Protocol type [default: PLENARY]
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub protocol_type: Option<String>,

    /// Additional pattern rule files or directories
    #[arg(long, value_name = "FILE|DIR")]
    pub rules: Vec<PathBuf>,

    /// Output format [default: text]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Split every speech into sentences
    #[arg(short, long)]
    pub sentences: bool,

    /// External language configuration for sentence splitting (implies --sentences)
    #[arg(long, value_name = "FILE")]
    pub language_config: Option<PathBuf>,

    /// Configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ExtractArgs {
    /// Execute the extract command
    pub fn execute(&self) -> Result<()> {
        super::init_logging(self.verbose, self.quiet);

        let config = CliConfig::load(self.config.as_deref())?;
        let specification = self.specification(&config)?;
        let format = self.output_format(&config)?;
        let with_sentences =
            self.sentences || self.language_config.is_some() || config.extraction.split_sentences;

        log::info!("Extracting speeches with {specification}");
        log::debug!("Arguments: {:?}", self);

        let mut rule_paths = config.extraction.rules.clone();
        rule_paths.extend(self.rules.iter().cloned());
        let extractor = SpeechExtractor::new(Arc::new(super::build_registry(&rule_paths)?));

        // Fail before reading any input if the rule is missing
        extractor.registry().resolve(&specification)?;

        let splitter = if with_sentences {
            Some(self.splitter(&specification)?)
        } else {
            None
        };

        let files = resolve_patterns(&self.input)?;
        log::info!("Found {} files to process", files.len());

        let progress = ProgressReporter::new(files.len(), "speeches", self.quiet);

        let process = |path: &PathBuf| -> Result<ProtocolExtraction> {
            let protocol = extract_file(path, &extractor, &specification, splitter.as_ref());
            progress.file_finished(
                &path.display().to_string(),
                protocol.as_ref().ok().map(ProtocolExtraction::speech_count),
            );
            protocol
        };

        let results: Vec<Result<ProtocolExtraction>> =
            if config.performance.parallel && files.len() > 1 {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(config.performance.threads())
                    .build()
                    .context("Failed to build worker thread pool")?;
                pool.install(|| files.par_iter().map(process).collect())
            } else {
                files.iter().map(process).collect()
            };
        progress.finish();

        let mut formatter = create_formatter(
            format,
            super::open_output(self.output.as_deref())?,
            config.output.pretty_json,
        );

        for (path, result) in files.iter().zip(results) {
            let protocol = result?;
            formatter.format_protocol(&path.display().to_string(), &protocol, with_sentences)?;
        }
        formatter.finish()?;

        log::info!("Extracted {} from {} files", progress.summary(), files.len());
        Ok(())
    }

    /// Specification from `--spec`, the individual flags, or the config defaults
    pub fn specification(&self, config: &CliConfig) -> Result<Specification> {
        if let Some(spec) = &self.spec {
            return spec
                .parse()
                .map_err(|_| CliError::InvalidSpecification(spec.clone()).into());
        }

        let defaults = &config.extraction;
        let spec = Specification::new(
            self.country.as_deref().unwrap_or(&defaults.country),
            self.institution
                .as_deref()
                .unwrap_or(&defaults.institution),
            self.language.as_deref().unwrap_or(&defaults.language),
            self.protocol_type
                .as_deref()
                .unwrap_or(&defaults.protocol_type),
        );
        spec.validate()
            .map_err(|_| CliError::InvalidSpecification(spec.to_string()))?;
        Ok(spec)
    }

    fn output_format(&self, config: &CliConfig) -> Result<OutputFormat> {
        if let Some(format) = self.format {
            return Ok(format);
        }
        OutputFormat::from_name(&config.output.default_format).ok_or_else(|| {
            CliError::ConfigError(format!(
                "unknown output format '{}'",
                config.output.default_format
            ))
            .into()
        })
    }

    fn splitter(&self, specification: &Specification) -> Result<SentenceSplitter> {
        match &self.language_config {
            Some(path) => {
                let config = LanguageConfig::from_file(path)?;
                log::info!("Using external language configuration: {}", path.display());
                Ok(SentenceSplitter::from_config(&config)?)
            }
            None => SentenceSplitter::for_language(&specification.language_code)
                .with_context(|| {
                    format!(
                        "No sentence policy for language '{}', pass --language-config",
                        specification.language_code
                    )
                }),
        }
    }
}

fn extract_file(
    path: &Path,
    extractor: &SpeechExtractor,
    specification: &Specification,
    splitter: Option<&SentenceSplitter>,
) -> Result<ProtocolExtraction> {
    let text = FileReader::read_text(path)?;
    log::debug!("Read {} ({} bytes)", path.display(), text.len());

    let protocol = match splitter {
        Some(splitter) => extractor.extract_protocol(&text, specification, splitter),
        None => extractor
            .extract_speeches(&text, specification)
            .map(|segments| ProtocolExtraction {
                specification: specification.clone(),
                speeches: segments
                    .into_iter()
                    .map(|segment| ExtractedSpeech {
                        segment,
                        sentences: Vec::new(),
                    })
                    .collect(),
            }),
    };
    protocol.with_context(|| format!("Failed to extract speeches from {}", path.display()))
}
