//! immunochess CLI - play action scripts and run seeded playouts.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// immunochess - defender versus pathogen on an 8x8 board
#[derive(Parser, Debug)]
#[command(name = "immunochess")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play an action script and print each step
    Run {
        /// Script file, one action per line
        #[arg(required = true)]
        script: PathBuf,

        /// Rules configuration (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Run seeded playouts in parallel and aggregate statistics
    Simulate {
        /// Number of games to run
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Maximum moves per game (overrides the configuration)
        #[arg(short = 't', long)]
        max_turns: Option<u32>,

        /// Rules configuration (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Print piece classes, abilities and costs
    Catalog {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let result = match args.command {
        Commands::Run {
            script,
            config,
            format,
        } => cli::run::execute(&script, config.as_deref(), format),

        Commands::Simulate {
            games,
            seed,
            threads,
            max_turns,
            config,
            format,
            progress,
        } => cli::simulate::execute(&cli::simulate::SimulateArgs {
            games,
            seed,
            threads,
            max_turns,
            config,
            format,
            progress,
        }),

        Commands::Catalog { format } => cli::catalog::execute(format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
