//! ChinaGeo CLI - convert coordinates between WGS-84, GCJ-02 and BD-09.

mod commands;
mod error;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::convert::ConvertArgs;
use commands::distance::DistanceArgs;
use error::CliError;

/// Convert coordinates between WGS-84, GCJ-02 and BD-09.
#[derive(Debug, Parser)]
#[command(name = "chinageo", version = chinageo::VERSION, about)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert a coordinate between two reference systems
    Convert(ConvertArgs),

    /// Great-circle distance in meters between two WGS-84 points
    Distance(DistanceArgs),

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();
    chinageo::telemetry::init_logging(cli.verbose);

    let result = match cli.command {
        Command::Convert(args) => commands::convert::run(args),
        Command::Distance(args) => commands::distance::run(args),
        Command::Config { command } => commands::config::run(command),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
