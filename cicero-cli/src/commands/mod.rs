//! CLI command implementations

use anyhow::{Context, Result};
use cicero_core::PatternRegistry;
use clap::Subcommand;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub mod extract;
pub mod generate_config;
pub mod list;
pub mod split;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract speeches from protocol files
    Extract(extract::ExtractArgs),

    /// Split plain text files into sentences
    Split(split::SplitArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },

    /// Validate a pattern rule or language configuration file
    Validate(validate::ValidateArgs),

    /// Generate a pattern rule or language configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List registered pattern rules
    Patterns {
        /// Additional rule files or directories to load
        #[arg(long, value_name = "FILE|DIR")]
        rules: Vec<PathBuf>,
    },

    /// List embedded sentence splitting languages
    Languages,

    /// List available output formats
    Formats,
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Extract(args) => args.execute(),
            Commands::Split(args) => args.execute(),
            Commands::List { subcommand } => list::execute(subcommand, &mut io::stdout().lock()),
            Commands::Validate(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}

/// Initialize logging based on verbosity level
pub(crate) fn init_logging(verbose: u8, quiet: bool) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    if !quiet {
        // A logger may already be installed when commands run in-process
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .try_init();
    }
}

/// Registry with the built-in rules plus every external rule file or directory
pub(crate) fn build_registry(rule_paths: &[PathBuf]) -> Result<PatternRegistry> {
    let mut registry = PatternRegistry::new();
    registry
        .register_builtin_rules()
        .context("Failed to register built-in pattern rules")?;

    for path in rule_paths {
        if path.is_dir() {
            let loaded = registry
                .load_rule_dir(path)
                .with_context(|| format!("Failed to load rules from {}", path.display()))?;
            log::info!("loaded {} rules from {}", loaded.len(), path.display());
        } else {
            let spec = registry
                .load_rule_file(path)
                .with_context(|| format!("Failed to load rule {}", path.display()))?;
            log::info!("loaded rule {spec} from {}", path.display());
        }
    }

    registry.seal();
    Ok(registry)
}

/// Output sink: the given file, or stdout
pub(crate) fn open_output(path: Option<&Path>) -> Result<Box<dyn Write + Send + Sync>> {
    Ok(match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout()),
    })
}
