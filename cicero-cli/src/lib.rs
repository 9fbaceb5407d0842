//! Cicero CLI library
//!
//! This library provides the command-line interface for extracting speeches
//! from parliamentary protocols and splitting them into sentences.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};

use clap::Parser;

/// Speech extraction for parliamentary protocols
#[derive(Debug, Parser)]
#[command(name = "cicero", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: commands::Commands,
}

impl Cli {
    /// Run the selected command
    pub fn run(&self) -> CliResult<()> {
        self.command.execute()
    }
}
