//! Serializable views of a game.
//!
//! A [`Snapshot`] is a plain-data copy of everything observable about a
//! game. [`Snapshot::for_viewer`] applies the visibility rules so it can be
//! handed to one side without leaking concealed pieces.

use serde::Serialize;

use crate::game::{Faction, GameState, Outcome, Phase, Square};

/// Energy balances by faction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnergySnapshot {
    /// Defender pool.
    pub defender: u32,
    /// Pathogen pool.
    pub pathogen: u32,
}

/// Observable state of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Turn counter.
    pub turn: u32,
    /// Faction to move.
    pub to_move: Faction,
    /// Selection phase.
    pub phase: Phase,
    /// Armed ability name, if any.
    pub pending_ability: Option<String>,
    /// Energy pools.
    pub energy: EnergySnapshot,
    /// Board rows, row 0 first; uppercase defender, lowercase pathogen.
    pub board: Vec<String>,
    /// Squares of concealed pieces.
    pub concealed: Vec<Square>,
    /// Squares of tagged pieces.
    pub tagged: Vec<Square>,
    /// Squares of mutated pieces.
    pub mutated: Vec<Square>,
    /// Squares with a running mutation cooldown.
    pub cooldowns: Vec<(Square, u8)>,
    /// Victory state, if decided.
    pub outcome: Option<Outcome>,
}

impl Snapshot {
    /// Full, unmasked copy of the state.
    #[must_use]
    pub fn capture(state: &GameState) -> Self {
        let mut cooldowns: Vec<(Square, u8)> = state
            .status()
            .cooldowns()
            .filter_map(|(id, left)| state.board().locate(id).map(|sq| (sq, left)))
            .collect();
        cooldowns.sort_unstable();

        Self {
            turn: state.turn(),
            to_move: state.to_move(),
            phase: state.phase(),
            pending_ability: state.pending_ability().map(|a| a.to_string()),
            energy: EnergySnapshot {
                defender: state.energy(Faction::Defender),
                pathogen: state.energy(Faction::Pathogen),
            },
            board: state.board().to_rows(),
            concealed: state.concealed_squares(),
            tagged: state.tagged_squares(),
            mutated: state.mutated_squares(),
            cooldowns,
            outcome: state.outcome(),
        }
    }

    /// Copy of the state as `viewer` is allowed to see it.
    ///
    /// Hidden opposing pieces are blanked from the board and dropped from
    /// every square list. A force-control share is recounted over the
    /// pieces `viewer` can see. Pending selection belongs to the faction to
    /// move and is cleared for the other side.
    #[must_use]
    pub fn for_viewer(state: &GameState, viewer: Faction) -> Self {
        let mut snapshot = Self::capture(state);
        let hidden: Vec<Square> = Square::all()
            .filter(|sq| !state.is_visible_to(viewer, *sq))
            .collect();

        if let Some(Outcome::ForceControl {
            winner,
            share_percent,
        }) = snapshot.outcome.as_mut()
        {
            *share_percent = visible_share(state, viewer, *winner);
        }

        for square in &hidden {
            if let Some(row) = snapshot.board.get_mut(usize::from(square.row)) {
                let masked: String = row
                    .chars()
                    .enumerate()
                    .map(|(col, c)| if col == usize::from(square.col) { '.' } else { c })
                    .collect();
                *row = masked;
            }
        }
        for list in [
            &mut snapshot.concealed,
            &mut snapshot.tagged,
            &mut snapshot.mutated,
        ] {
            list.retain(|sq| !hidden.contains(sq));
        }
        snapshot.cooldowns.retain(|(sq, _)| !hidden.contains(sq));

        if viewer != state.to_move() {
            snapshot.phase = Phase::AwaitingSelection;
            snapshot.pending_ability = None;
        }
        snapshot
    }
}

/// Percentage of the pieces visible to `viewer` that belong to `faction`.
fn visible_share(state: &GameState, viewer: Faction, faction: Faction) -> u8 {
    let visible: Vec<Faction> = state
        .view_for(viewer)
        .into_iter()
        .flatten()
        .map(|piece| piece.faction)
        .collect();
    if visible.is_empty() {
        return 0;
    }
    let owned = visible.iter().filter(|f| **f == faction).count();
    // owned <= visible.len(), so the share is at most 100
    u8::try_from(owned * 100 / visible.len()).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::Ability;

    #[test]
    fn test_capture_initial() {
        let snapshot = GameState::default().snapshot();
        assert_eq!(snapshot.turn, 1);
        assert_eq!(snapshot.to_move, Faction::Defender);
        assert_eq!(snapshot.board[0], "rnbqkbnr");
        assert_eq!(snapshot.board[7], "RNBQKBNR");
        assert_eq!(snapshot.energy.defender, 10);
        assert!(snapshot.outcome.is_none());
    }

    #[test]
    fn test_viewer_masks_concealed_opponents() {
        let mut game = GameState::default();
        game.try_move(Square::new(6, 0), Square::new(5, 0)).unwrap();
        game.activate_ability(Ability::Conceal, Square::new(1, 3), None)
            .unwrap();

        let defender = Snapshot::for_viewer(&game, Faction::Defender);
        assert_eq!(defender.board[1], "ppp.pppp");
        assert!(defender.concealed.is_empty());

        let pathogen = Snapshot::for_viewer(&game, Faction::Pathogen);
        assert_eq!(pathogen.board[1], "pppppppp");
        assert_eq!(pathogen.concealed, vec![Square::new(1, 3)]);
    }

    #[test]
    fn test_viewer_share_counts_visible_pieces_only() {
        let config = GameConfig {
            layout: Some(
                [
                    "....k...", "p.......", "........", "........", "........", "........",
                    "PPPPPPPP", "RNBQKBNR",
                ]
                .map(String::from)
                .to_vec(),
            ),
            ..GameConfig::default()
        };
        let mut game = GameState::new(config).unwrap();
        game.try_move(Square::new(6, 0), Square::new(5, 0)).unwrap();
        game.activate_ability(Ability::Conceal, Square::new(1, 0), None)
            .unwrap();

        // 16 of 18 pieces on the board, 16 of the 17 the defender can see.
        let full = game.snapshot();
        assert_eq!(
            full.outcome,
            Some(Outcome::ForceControl {
                winner: Faction::Defender,
                share_percent: 88,
            })
        );
        let defender = Snapshot::for_viewer(&game, Faction::Defender);
        assert_eq!(
            defender.outcome,
            Some(Outcome::ForceControl {
                winner: Faction::Defender,
                share_percent: 94,
            })
        );
        let pathogen = Snapshot::for_viewer(&game, Faction::Pathogen);
        assert_eq!(pathogen.outcome, full.outcome);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(GameState::default().snapshot()).unwrap();
        assert_eq!(json["to_move"], "defender");
        assert_eq!(json["phase"]["phase"], "awaiting_selection");
        assert_eq!(json["energy"]["pathogen"], 10);
    }
}
