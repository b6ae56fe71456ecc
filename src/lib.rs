// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! immunochess: a deterministic engine for a two-faction chess variant.
//!
//! A defender (immune system) and a pathogen (virus) play on an 8x8 board.
//! Besides moving, pieces spend energy on abilities: pathogen pieces can
//! conceal themselves and mutate, defender pieces can tag and reveal them,
//! and factories on both sides replicate.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   CLI: scripts and playouts         │
//! ├─────────────────────────────────────┤
//! │   Turn controller (GameState)       │
//! ├─────────────────────────────────────┤
//! │   Moves, abilities, energy, flags   │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use immunochess::{GameState, Square};
//!
//! let mut game = GameState::default();
//! game.select_square(Square::new(6, 4)).unwrap();
//! game.select_square(Square::new(4, 4)).unwrap();
//! assert_eq!(game.turn(), 2);
//! ```

pub mod config;
pub mod error;
pub mod game;
pub mod playout;
pub mod script;

pub use config::{ConfigError, GameConfig};
pub use error::{GameError, GameResult};

// Re-export key game types at crate root for convenience
pub use game::{
    Ability, AbilityOutcome, Board, Event, Faction, GameState, Outcome, Phase, Piece, PieceClass,
    PieceId, Snapshot, Square,
};
