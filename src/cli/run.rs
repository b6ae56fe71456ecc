//! Run command implementation.

use super::output::{JsonRun, JsonStep, format_snapshot, format_step};
use super::{CliError, OutputFormat, load_config, to_json};
use immunochess::GameState;
use immunochess::game::assert_invariants;
use immunochess::script;
use std::path::Path;
use tracing::info;

/// Execute the run command.
///
/// Rejected steps are reported and the script continues; only loading
/// failures abort the run.
///
/// # Errors
///
/// Returns an error if the script or configuration cannot be loaded.
pub(crate) fn execute(
    script_path: &Path,
    config_path: Option<&Path>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let config = load_config(config_path)?;
    let steps = script::load(script_path)?;
    let mut game = GameState::new(config)?;

    info!(script = %script_path.display(), steps = steps.len(), "running script");

    let mut json_steps = Vec::with_capacity(steps.len());
    let mut rejected = 0;
    for step in &steps {
        let result = step.action.apply(&mut game);
        assert_invariants(&game);
        if result.is_err() {
            rejected += 1;
        }
        match format {
            OutputFormat::Text => println!("{}", format_step(step, &result)),
            OutputFormat::Json => json_steps.push(JsonStep::new(step, &result)),
        }
    }

    let snapshot = game.snapshot();
    match format {
        OutputFormat::Text => {
            println!();
            print!("{}", format_snapshot(&snapshot));
            println!();
            println!("{} steps, {rejected} rejected", steps.len());
        }
        OutputFormat::Json => {
            let run = JsonRun {
                steps: json_steps,
                rejected,
                final_state: snapshot,
            };
            println!("{}", to_json(&run)?);
        }
    }

    Ok(())
}
