//! Game layer for immunochess.
//!
//! Implements the rules of the variant:
//! - Board, squares and pieces with stable identities
//! - Piece catalog (classes, abilities, costs)
//! - Move legality by class, with optional path blocking
//! - Abilities: conceal, mutate, tag, reveal, replicate
//! - Energy economy and the turn controller
//! - Victory queries, snapshots and invariant checks

mod abilities;
mod board;
mod catalog;
mod energy;
mod faction;
mod invariants;
mod movement;
mod outcome;
mod snapshot;
mod state;
mod status;

pub use abilities::{AbilityEffect, AbilityOutcome, ability_options};
pub use board::{BOARD_SIZE, Board, CELL_COUNT, INITIAL_LAYOUT, LayoutError, Piece, PieceId, Square};
pub use catalog::{Ability, PieceClass, Targeting, abilities_of, can_use};
pub use energy::EnergyPools;
pub use faction::Faction;
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use movement::{first_blocker, is_legal_move, is_vector_jump, reachable_squares};
pub use outcome::{Outcome, outcome};
pub use snapshot::{EnergySnapshot, Snapshot};
pub use state::{Event, GameState, MoveRecord, Phase, PieceTally};
pub use status::StatusFlags;
