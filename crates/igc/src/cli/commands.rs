//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::config::OutputFormat;

/// Parse command arguments.
#[derive(Debug, Args)]
pub struct ParseCommand {
    /// IGC file to decode (`-` for stdin)
    pub input: PathBuf,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Indent JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

/// Records command arguments.
#[derive(Debug, Args)]
pub struct RecordsCommand {
    /// IGC file to decode (`-` for stdin)
    pub input: PathBuf,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Also list lines no grammar matched
    #[arg(short = 'u', long)]
    pub include_unknown: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
