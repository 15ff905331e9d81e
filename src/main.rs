//! fusedloc - command-line client for the FusedLocation provider
//!
//! Connects to the provider on the message bus and exercises its remote
//! methods by hand: echo round-trips, client registration, accuracy and
//! interval changes, and live position updates.

use std::{error::Error, path::PathBuf, process};

use clap::Parser;
use tracing::{Level, debug, span};
use fusedloc::{
    cli::{CliService, formatting::format_error},
    config::{BusKind, Config},
    tracing_config,
};

#[derive(Parser, Debug)]
#[command(name = "fusedloc", version)]
#[command(about = "Talk to the FusedLocation provider over D-Bus")]
struct Cli {
    /// Configuration file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Connect to the system bus instead of the configured one
    #[arg(long)]
    system: bool,

    /// Command category, e.g. "location"
    category: Option<String>,

    /// Command within the category
    command: Option<String>,

    /// Command arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if cli.system {
        config.client.bus = BusKind::System;
    }

    let is_long_running = matches!(cli.command.as_deref(), Some("watch"));
    if is_long_running {
        tracing_config::init_with_file(config.general.log_level)?;
    } else {
        tracing_config::init_cli_mode(config.general.log_level)?;
    }

    let _span = span!(Level::INFO, "fusedloc").entered();
    debug!(bus = %config.client.bus, "Configuration loaded");

    run_cli_command(&cli, config).await
}

/// Executes CLI commands through the CliService.
///
/// Prints help when no category is given or the category is "help".
///
/// # Errors
/// Exits the process with status 1 if the command fails.
async fn run_cli_command(cli: &Cli, config: Config) -> Result<(), Box<dyn Error>> {
    let cli_service = CliService::new(config.client);

    let category = match cli.category.as_deref() {
        None | Some("help") => {
            println!("{}", cli_service.help());
            return Ok(());
        }
        Some(category) => category,
    };
    let command = cli.command.as_deref().unwrap_or("");

    match cli_service
        .execute_command(category, command, &cli.args)
        .await
    {
        Ok(output) => {
            if !output.trim().is_empty() {
                println!("{output}");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", format_error(&e.to_string()));
            process::exit(1);
        }
    }
}
