//! Game invariants - sanity checks that detect bugs.
//!
//! None of these can be broken through the public operations. If one
//! triggers, the engine has a bug.

use std::collections::BTreeSet;

use crate::game::board::CELL_COUNT;
use crate::game::{Faction, GameState, PieceId};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut report = |message: String| violations.push(InvariantViolation { message });

    let mut living = BTreeSet::new();
    for (square, piece) in state.board.pieces() {
        if !living.insert(piece.id) {
            report(format!("Piece id {} appears twice (again at {square})", piece.id.0));
        }
    }

    if living.len() > CELL_COUNT {
        report(format!("{} pieces on a {CELL_COUNT}-square board", living.len()));
    }

    let flag_sets: [(&str, Vec<PieceId>); 3] = [
        ("concealed", state.status.concealed().collect()),
        ("tagged", state.status.tagged().collect()),
        ("mutated", state.status.mutated().collect()),
    ];
    for (name, ids) in flag_sets {
        for id in ids {
            if !living.contains(&id) {
                report(format!("{name} flag on captured piece {}", id.0));
            }
        }
    }

    let max_cooldown = state.config.mutation_cooldown;
    for (id, left) in state.status.cooldowns() {
        if !living.contains(&id) {
            report(format!("cooldown on captured piece {}", id.0));
        }
        if left > max_cooldown {
            report(format!(
                "piece {} cooldown {left} exceeds configured {max_cooldown}",
                id.0
            ));
        }
    }

    let expected = state.tally.expected_on_board();
    if u32::try_from(living.len()) != Ok(expected) {
        report(format!(
            "Board holds {} pieces, tally expects {expected}",
            living.len()
        ));
    }

    let expected_mover = if state.turn % 2 == 1 {
        Faction::Defender
    } else {
        Faction::Pathogen
    };
    if state.to_move != expected_mover {
        report(format!(
            "Turn {} should belong to {expected_mover}, not {}",
            state.turn, state.to_move
        ));
    }

    violations
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &GameState) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &GameState) {}
