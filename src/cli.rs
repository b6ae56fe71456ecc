//! CLI command implementations for immunochess.

pub(crate) mod catalog;
pub(crate) mod run;
pub(crate) mod simulate;

mod output;

use clap::ValueEnum;
use immunochess::config::{ConfigError, GameConfig};
use immunochess::script::ScriptError;
use std::path::Path;
use thiserror::Error;

/// Output format shared by all commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Script could not be loaded.
    #[error(transparent)]
    Script(#[from] ScriptError),
    /// Output could not be serialized.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    /// Worker pool could not be built.
    #[error("failed to configure thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    /// Progress bar template is malformed.
    #[error("invalid progress template: {0}")]
    Progress(#[from] indicatif::style::TemplateError),
}

/// Load the configuration file, or the defaults when none is given.
fn load_config(path: Option<&Path>) -> Result<GameConfig, CliError> {
    match path {
        Some(path) => Ok(GameConfig::load(path)?),
        None => Ok(GameConfig::default()),
    }
}

/// Serialize a value as pretty JSON.
fn to_json<T: serde::Serialize>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)?)
}
