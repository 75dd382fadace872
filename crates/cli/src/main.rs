//! famikbctl - famikb bridge host tools
//!
//! Simulates the bridge against a modelled console and encodes the
//! register-bus messages a companion host sends.

#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use famikb_errors::ConfigError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{EncodeRegbusArgs, SimulateArgs};
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "famikbctl")]
#[command(about = "famikb bridge tools - simulate console frames and encode register-bus messages")]
#[command(version)]
struct Cli {
    /// Output in JSON format for machine parsing
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Feed PS/2 scancodes into a bridge and read one frame as the console
    Simulate(SimulateArgs),

    /// Print the window image a host writes over the register bus
    EncodeRegbus(EncodeRegbusArgs),

    /// Show the configuration selected by strap values
    Straps {
        /// Mode strap 0 (0 or 1)
        mode0: u8,
        /// Mode strap 1 (0 or 1)
        mode1: u8,
        /// Input source strap: 0 serial, 1 host
        source: u8,
    },

    /// Validate a YAML configuration file
    CheckConfig {
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("famikb={log_level},famikbctl={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match execute_command(&cli) {
        Ok(()) => Ok(()),
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }
            std::process::exit(exit_code(&e));
        }
    }
}

fn exit_code(error: &anyhow::Error) -> i32 {
    if error.downcast_ref::<ConfigError>().is_some() {
        return 4;
    }
    match error.downcast_ref::<CliError>() {
        Some(CliError::InvalidHex(_) | CliError::InvalidArgument(_)) => 2,
        Some(CliError::Config(_)) => 4,
        _ => 1,
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Simulate(args) => commands::simulate::execute(args, cli.json),
        Commands::EncodeRegbus(args) => commands::regbus::execute(args, cli.json),
        Commands::Straps {
            mode0,
            mode1,
            source,
        } => commands::config::straps(*mode0, *mode1, *source, cli.json),
        Commands::CheckConfig { path } => commands::config::check(path, cli.json),
    }
}
