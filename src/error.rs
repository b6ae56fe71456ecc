//! Error types for the game engine.
//!
//! Every variant is a recoverable rejection: the engine reports it and leaves
//! the board, energy and turn state exactly as they were.

use thiserror::Error;

use crate::game::{Ability, Faction, PieceClass, Square};

/// Reasons an action is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The square lies outside the 8x8 board.
    #[error("square {0} is off the board")]
    OutOfBounds(Square),

    /// The selected square holds no piece.
    #[error("no piece on {0}")]
    NoPiece(Square),

    /// The piece belongs to the faction that is not moving.
    #[error("{piece_owner} piece on {square}, but it is {to_move}'s turn")]
    NotYourTurn {
        /// Square of the offending piece.
        square: Square,
        /// Owner of the piece.
        piece_owner: Faction,
        /// Faction whose turn it is.
        to_move: Faction,
    },

    /// The geometry of the move does not fit the piece class.
    #[error("illegal {class} move from {from} to {to}")]
    IllegalMove {
        /// Class of the moving piece.
        class: PieceClass,
        /// Origin square.
        from: Square,
        /// Destination square.
        to: Square,
    },

    /// The destination holds a piece of the moving faction.
    #[error("{0} is occupied by an own piece")]
    BlockedByOwnPiece(Square),

    /// A piece stands between origin and destination (path blocking enabled).
    #[error("path from {from} to {to} is blocked at {blocker}")]
    PathBlocked {
        /// Origin square.
        from: Square,
        /// Destination square.
        to: Square,
        /// First occupied square on the path.
        blocker: Square,
    },

    /// The ability costs more than the faction's pool holds.
    #[error("{ability} costs {cost} energy, only {available} available")]
    InsufficientEnergy {
        /// Requested ability.
        ability: Ability,
        /// Energy cost of the ability.
        cost: u32,
        /// Energy in the acting faction's pool.
        available: u32,
    },

    /// The piece mutated recently and must wait.
    #[error("mutation on {square} is cooling down for {remaining} more turn(s)")]
    CooldownActive {
        /// Square of the piece.
        square: Square,
        /// Own turns left before the piece may mutate again.
        remaining: u8,
    },

    /// The ability was given a target it cannot use, or none when it needs one.
    #[error("invalid target for {ability}: {reason}")]
    InvalidTarget {
        /// Requested ability.
        ability: Ability,
        /// Short description of what was wrong.
        reason: &'static str,
    },

    /// The piece's class does not carry the requested ability.
    #[error("{faction} {class} cannot use {ability}")]
    AbilityUnavailable {
        /// Requested ability.
        ability: Ability,
        /// Owner of the actor.
        faction: Faction,
        /// Class of the actor.
        class: PieceClass,
    },

    /// The ability name does not match any known ability.
    #[error("unknown ability '{0}'")]
    UnknownAbility(String),
}

/// Result type for engine operations.
pub type GameResult<T> = Result<T, GameError>;
