//! `igcdump` - CLI for igc
//!
//! This binary reads IGC files and prints their decoded contents.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;

use igc::cli::input::read_input;
use igc::cli::output::{render_parse, render_records};
use igc::cli::{Cli, Command, ConfigCommand, ParseCommand, RecordsCommand};
use igc::{init_logging, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::Parse(parse_cmd) => handle_parse(&config, &parse_cmd),
        Command::Records(records_cmd) => handle_records(&config, &records_cmd),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn handle_parse(config: &Config, cmd: &ParseCommand) -> Result<()> {
    let text = read_input(&cmd.input)?;
    let result = igc::parse(&text);

    let mut output = config.output.clone();
    if let Some(format) = cmd.format {
        output.format = format;
    }
    output.pretty |= cmd.pretty;

    println!("{}", render_parse(&result, &output)?);
    Ok(())
}

fn handle_records(config: &Config, cmd: &RecordsCommand) -> Result<()> {
    let text = read_input(&cmd.input)?;
    let records = igc::parse_records(&text);

    let mut output = config.output.clone();
    if let Some(format) = cmd.format {
        output.format = format;
    }
    let include_unknown = cmd.include_unknown || config.records.include_unknown;

    println!("{}", render_records(&records, include_unknown, &output)?);
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Output]");
                println!("  Format:            {:?}", config.output.format);
                println!("  Pretty JSON:       {}", config.output.pretty);
                println!("  Precision:         {}", config.output.precision);
                println!();
                println!("[Records]");
                println!("  Include unknown:   {}", config.records.include_unknown);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
