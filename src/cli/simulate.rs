//! Simulate command implementation.

use super::output::{JsonSimulateResult, format_stats_text};
use super::{CliError, OutputFormat, load_config, to_json};
use immunochess::playout::run_playouts;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments of the simulate command.
#[derive(Debug)]
pub(crate) struct SimulateArgs {
    /// Number of games.
    pub(crate) games: u64,
    /// Base seed, random when absent.
    pub(crate) seed: Option<u64>,
    /// Worker threads, CPU count when absent.
    pub(crate) threads: Option<usize>,
    /// Move limit override.
    pub(crate) max_turns: Option<u32>,
    /// Configuration file.
    pub(crate) config: Option<PathBuf>,
    /// Output format.
    pub(crate) format: OutputFormat,
    /// Show a progress bar.
    pub(crate) progress: bool,
}

/// Execute the simulate command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the thread
/// pool cannot be built.
pub(crate) fn execute(args: &SimulateArgs) -> Result<(), CliError> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(max_turns) = args.max_turns {
        config.max_turns = max_turns;
    }

    let mut pool = rayon::ThreadPoolBuilder::new();
    if let Some(num_threads) = args.threads {
        pool = pool.num_threads(num_threads);
    }
    let pool = pool.build()?;

    let base_seed = args.seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(42, |d| d.as_secs())
    });

    let pb = if args.progress {
        let pb = ProgressBar::new(args.games);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games")?
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    let stats = pool.install(|| run_playouts(base_seed, args.games, &config))?;

    // Update progress bar after completion (no shared counter in the hot path)
    if let Some(pb) = pb {
        pb.set_position(stats.games);
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();

    match args.format {
        OutputFormat::Text => {
            print!("{}", format_stats_text(&stats, base_seed));
            println!("Duration: {:.2}s", duration.as_secs_f64());
        }
        OutputFormat::Json => {
            let result = JsonSimulateResult {
                base_seed,
                stats,
                duration_secs: duration.as_secs_f64(),
            };
            println!("{}", to_json(&result)?);
        }
    }

    Ok(())
}
