//! Action scripts.
//!
//! A script drives a game through the same selection interface a player
//! would use, one action per line:
//!
//! ```text
//! # defender opens
//! move 6 4 4 4
//! select 1 1
//! ability conceal
//! select 1 1
//! cancel
//! ```
//!
//! `move r1 c1 r2 c2` is shorthand for two `select` lines. Blank lines and
//! everything after `#` are ignored.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::error::GameResult;
use crate::game::{Event, GameState, Square};

/// One player action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Select a square.
    Select(Square),
    /// Arm an ability by name.
    Ability(String),
    /// Drop the selection and pending ability.
    Cancel,
    /// Select the origin, then the destination.
    Move {
        /// Origin square.
        from: Square,
        /// Destination square.
        to: Square,
    },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(sq) => write!(f, "select {} {}", sq.row, sq.col),
            Self::Ability(name) => write!(f, "ability {name}"),
            Self::Cancel => write!(f, "cancel"),
            Self::Move { from, to } => {
                write!(f, "move {} {} {} {}", from.row, from.col, to.row, to.col)
            }
        }
    }
}

impl Action {
    /// Apply the action to a game.
    ///
    /// Returns the event of the last square selection, or `None` for
    /// actions that only arm or clear state.
    ///
    /// # Errors
    ///
    /// Returns the engine's rejection.
    pub fn apply(&self, game: &mut GameState) -> GameResult<Option<Event>> {
        match self {
            Self::Select(square) => game.select_square(*square).map(Some),
            Self::Ability(name) => game.select_ability_named(name).map(|_| None),
            Self::Cancel => {
                game.cancel();
                Ok(None)
            }
            Self::Move { from, to } => {
                game.select_square(*from)?;
                game.select_square(*to).map(Some)
            }
        }
    }
}

/// An action and the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptStep {
    /// 1-based source line.
    pub line: usize,
    /// Parsed action.
    pub action: Action,
}

/// Script loading errors.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// A line could not be parsed.
    #[error("line {line}: {reason}")]
    Syntax {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        reason: String,
    },
}

/// Read and parse a script file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a line is malformed.
pub fn load(path: &Path) -> Result<Vec<ScriptStep>, ScriptError> {
    let text = fs::read_to_string(path).map_err(|source| ScriptError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text)
}

/// Parse script text.
///
/// # Errors
///
/// Returns the first malformed line.
pub fn parse(text: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    let mut steps = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let content = raw.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }
        let action = parse_line(content).map_err(|reason| ScriptError::Syntax { line, reason })?;
        steps.push(ScriptStep { line, action });
    }
    Ok(steps)
}

fn parse_line(content: &str) -> Result<Action, String> {
    let mut words = content.split_whitespace();
    let keyword = words.next().unwrap_or_default().to_ascii_lowercase();
    let args: Vec<&str> = words.collect();

    match keyword.as_str() {
        "select" => {
            let [row, col] = numbers::<2>(&keyword, &args)?;
            Ok(Action::Select(Square::new(row, col)))
        }
        "move" => {
            let [r1, c1, r2, c2] = numbers::<4>(&keyword, &args)?;
            Ok(Action::Move {
                from: Square::new(r1, c1),
                to: Square::new(r2, c2),
            })
        }
        "ability" => match args.as_slice() {
            [name] => Ok(Action::Ability((*name).to_string())),
            _ => Err(format!("ability takes 1 argument, got {}", args.len())),
        },
        "cancel" if args.is_empty() => Ok(Action::Cancel),
        "cancel" => Err("cancel takes no arguments".to_string()),
        other => Err(format!("unknown action '{other}'")),
    }
}

fn numbers<const N: usize>(keyword: &str, args: &[&str]) -> Result<[u8; N], String> {
    if args.len() != N {
        return Err(format!("{keyword} takes {N} arguments, got {}", args.len()));
    }
    let mut values = [0u8; N];
    for (slot, arg) in values.iter_mut().zip(args) {
        *slot = arg
            .parse()
            .map_err(|_| format!("'{arg}' is not a square coordinate"))?;
    }
    Ok(values)
}
