//! Command-line interface

pub mod commands;
pub mod output;

use crate::core::config::DEFAULT_CONFIG_FILE;
use crate::filter::DEFAULT_FILTERS_DIR;
use clap::{Parser, Subcommand};
use commands::{RunCommand, ValidateCommand};
use std::ffi::OsString;
use std::path::PathBuf;

/// Runs a chain of filters described by a step graph
#[derive(Debug, Parser, Clone)]
#[command(name = "pipeframe")]
#[command(version = "0.1.0")]
#[command(about = "Runs a chain of filters described by a step graph", long_about = None)]
pub struct Cli {
    /// Command to run (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the pipeline configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Directory holding the filter programs
    #[arg(long, global = true, default_value = DEFAULT_FILTERS_DIR)]
    pub filters_dir: PathBuf,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the pipeline
    Run(RunCommand),

    /// Validate the configuration and check that every filter exists
    Validate(ValidateCommand),

    /// List the discovered filters
    Filters,
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }

    /// The command to run, `run` when none was given
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Run(RunCommand::default()))
    }
}
