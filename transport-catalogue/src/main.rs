use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use transport_catalogue::requests::{
    self, MakeBaseRequest, ProcessRequestsRequest, RequestError,
};

/// Build a transport base or answer queries against one.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Read the request document from this file instead of stdin
    #[arg(long, global = true)]
    input: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build the catalogue and routing data and save a snapshot
    MakeBase,
    /// Load a snapshot and print answers to its queries as JSON
    ProcessRequests,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "request processing failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), RequestError> {
    let input = open_input(cli.input.as_deref())?;
    match cli.command {
        Command::MakeBase => {
            let request: MakeBaseRequest = requests::read_json(input)?;
            requests::make_base(&request)?;
        }
        Command::ProcessRequests => {
            let request: ProcessRequestsRequest = requests::read_json(input)?;
            let responses = requests::process_requests(&request)?;
            requests::write_json(io::stdout().lock(), &responses)?;
        }
    }
    Ok(())
}

fn open_input(path: Option<&Path>) -> io::Result<Box<dyn Read>> {
    Ok(match path {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    })
}
