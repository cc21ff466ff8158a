//! Mediainfo CLI: runs the mediainfo pipeline step on JSON events.
//!
//! Events are read from `--event FILE` or stdin; results go to stdout and logs
//! to stderr. Configure with MEDIAINFO_ERROR_POLICY, LOG_FORMAT and RUST_LOG.

use anyhow::Context;
use clap::{Parser, Subcommand};
use mediainfo_core::telemetry::init_tracing;
use mediainfo_core::{infer, EnrichedRequest, HandlerError, MediaInfoConfig, MediaInfoHandler};
use mediainfo_cli::{read_event, run_step, to_pretty_json};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mediainfo", about = "Stub video metadata step for the encoding pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enrich an event with source resolution and media info
    Handle {
        /// Event JSON file (reads stdin when omitted)
        #[arg(long, value_name = "FILE")]
        event: Option<PathBuf>,
    },
    /// Print the resolution guessed from a filename
    Infer {
        /// Filename or object key
        filename: String,
    },
    /// Enrich an event, then select its encoding profile
    Profile {
        /// Event JSON file (reads stdin when omitted)
        #[arg(long, value_name = "FILE")]
        event: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let config = MediaInfoConfig::from_env().context("Invalid mediainfo configuration")?;
    if let Err(e) = init_tracing(&config) {
        eprintln!("Warning: failed to initialize tracing: {:#}", e);
    }

    let cli = Cli::parse();
    let handler = MediaInfoHandler::new(&config);

    match cli.command {
        Commands::Handle { event } => {
            let event = read_event(event.as_deref(), std::io::stdin())?;
            print_outcome(run_step(&handler, event, false))?;
        }
        Commands::Infer { filename } => {
            let guess = infer(&filename)?;
            println!("{}", to_pretty_json(&guess)?);
        }
        Commands::Profile { event } => {
            let event = read_event(event.as_deref(), std::io::stdin())?;
            print_outcome(run_step(&handler, event, true))?;
        }
    }

    Ok(())
}

fn print_outcome((record, error): (EnrichedRequest, Option<HandlerError>)) -> anyhow::Result<()> {
    // Downstream steps still get usable values on stdout.
    println!("{}", to_pretty_json(&record)?);
    match error {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}
