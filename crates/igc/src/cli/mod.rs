//! Command-line interface for igc.
//!
//! This module provides the CLI structure, input loading and output
//! rendering for the `igcdump` binary.

mod commands;
pub mod input;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, ParseCommand, RecordsCommand};

use crate::logging::Verbosity;

/// igcdump - Decode IGC flight recorder logs
///
/// Prints the headers and timestamped position fixes of an IGC file, or one
/// decoded record per line.
#[derive(Debug, Parser)]
#[command(name = "igcdump")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Decode headers and fixes with absolute timestamps
    Parse(ParseCommand),

    /// Decode every line into a record
    Records(RecordsCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}
