//! Game configuration.
//!
//! Every field has a default, so a JSON file only needs the values it
//! changes:
//!
//! ```json
//! { "energy_per_turn": 3, "path_blocking": true }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::{Board, LayoutError};

/// Tunable rules for one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Energy each faction starts with.
    pub initial_energy: u32,
    /// Energy credited to a faction when the turn passes to it.
    pub energy_per_turn: u32,
    /// Own turns a piece waits after mutating before it may mutate again.
    pub mutation_cooldown: u8,
    /// Chebyshev radius of the reveal ability.
    pub reveal_range: u8,
    /// Sliding pieces and particle double steps stop at occupied squares.
    pub path_blocking: bool,
    /// Share of all pieces (percent) at which a faction controls the board.
    pub force_control_percent: u8,
    /// Turn limit for playouts.
    pub max_turns: u32,
    /// Optional starting layout, eight row strings, row 0 first.
    pub layout: Option<Vec<String>>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_energy: 10,
            energy_per_turn: 2,
            mutation_cooldown: 3,
            reveal_range: 2,
            path_blocking: false,
            force_control_percent: 80,
            max_turns: 200,
            layout: None,
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The file is not valid configuration JSON.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },
    /// A value is out of range.
    #[error("invalid {field}: {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
    /// The custom layout is malformed.
    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutError),
}

impl GameConfig {
    /// Load a configuration from a JSON file and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges and the custom layout.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_rules()?;
        self.starting_board()?;
        Ok(())
    }

    /// Check value ranges only, leaving the custom layout aside.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range value.
    pub fn validate_rules(&self) -> Result<(), ConfigError> {
        if self.mutation_cooldown == 0 {
            return Err(ConfigError::Invalid {
                field: "mutation_cooldown",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(51..=100).contains(&self.force_control_percent) {
            return Err(ConfigError::Invalid {
                field: "force_control_percent",
                reason: format!("{} is outside 51..=100", self.force_control_percent),
            });
        }
        if self.max_turns == 0 {
            return Err(ConfigError::Invalid {
                field: "max_turns",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Board the game starts from: the custom layout or the standard one.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutError`] if the custom layout is malformed.
    pub fn starting_board(&self) -> Result<Board, LayoutError> {
        match &self.layout {
            Some(rows) => Board::from_rows(rows),
            None => Ok(Board::initial()),
        }
    }
}
