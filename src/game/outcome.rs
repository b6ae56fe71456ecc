//! Victory queries.
//!
//! These only read the board. Nothing in the engine stops a game that has an
//! outcome; callers decide what to do with it.

use serde::Serialize;

use crate::game::{Board, Faction};

/// A decided game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Outcome {
    /// Only one faction still has its core.
    CoreCaptured {
        /// Faction whose core survives.
        winner: Faction,
    },
    /// One faction holds an overwhelming share of the pieces.
    ForceControl {
        /// Dominant faction.
        winner: Faction,
        /// Its share of all pieces, rounded down.
        share_percent: u8,
    },
}

impl Outcome {
    /// The winning faction.
    #[must_use]
    pub const fn winner(&self) -> Faction {
        match *self {
            Self::CoreCaptured { winner } | Self::ForceControl { winner, .. } => winner,
        }
    }
}

/// Evaluate the board. Core capture is checked before force control.
#[must_use]
pub fn outcome(board: &Board, force_control_percent: u8) -> Option<Outcome> {
    let defender_core = board.core_of(Faction::Defender).is_some();
    let pathogen_core = board.core_of(Faction::Pathogen).is_some();
    match (defender_core, pathogen_core) {
        (true, false) => {
            return Some(Outcome::CoreCaptured {
                winner: Faction::Defender,
            });
        }
        (false, true) => {
            return Some(Outcome::CoreCaptured {
                winner: Faction::Pathogen,
            });
        }
        _ => {}
    }

    let total = board.pieces().count();
    if total == 0 {
        return None;
    }
    Faction::ALL.into_iter().find_map(|faction| {
        let share = board.count(faction) * 100 / total;
        // share <= 100
        #[allow(clippy::cast_possible_truncation)]
        let share_percent = share as u8;
        (share_percent >= force_control_percent).then_some(Outcome::ForceControl {
            winner: faction,
            share_percent,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: [&str; 8]) -> Board {
        Board::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_initial_board_is_undecided() {
        assert_eq!(outcome(&Board::initial(), 80), None);
    }

    #[test]
    fn test_core_capture() {
        let b = board([
            "........", "pppp....", "........", "........", "........", "........",
            "........", "....K...",
        ]);
        assert_eq!(
            outcome(&b, 80),
            Some(Outcome::CoreCaptured {
                winner: Faction::Defender
            })
        );
    }

    #[test]
    fn test_force_control_threshold() {
        // 4 defenders, 1 pathogen: 80%.
        let b = board([
            "....k...", "........", "........", "........", "........", "........",
            "PPP.....", "....K...",
        ]);
        let result = outcome(&b, 80);
        assert_eq!(
            result,
            Some(Outcome::ForceControl {
                winner: Faction::Defender,
                share_percent: 80,
            })
        );
        assert_eq!(result.map(|o| o.winner()), Some(Faction::Defender));
        assert_eq!(outcome(&b, 81), None);
    }

    #[test]
    fn test_no_cores_is_undecided_by_capture() {
        let b = board([
            "p.......", "........", "........", "........", "........", "........",
            "........", "P.......",
        ]);
        assert_eq!(outcome(&b, 80), None);
    }
}
