//! Seeded self-play for soak testing.
//!
//! A playout picks among the legal moves and affordable abilities of the
//! faction to move using a deterministic hash of `(seed, step)`, so the same
//! seed always replays the same game. It is not an opponent: choices are
//! uniform, with at most one ability per turn segment.
//!
//! Invariants are checked after every action and violations are counted
//! rather than panicking, so a batch reports every broken game.

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, GameConfig};
use crate::game::{Faction, GameState, Outcome, ability_options, check_invariants};

/// One in this many steps tries an ability when one is available.
const ABILITY_ODDS: u64 = 4;

/// Why a playout stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum PlayoutEnd {
    /// A victory query returned a result.
    Decided {
        /// The result.
        outcome: Outcome,
    },
    /// The faction to move had no legal move.
    NoLegalMove {
        /// The stuck faction.
        faction: Faction,
    },
    /// The turn limit was reached.
    TurnLimit,
}

/// Result of a single playout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayoutResult {
    /// Seed the playout ran with.
    pub seed: u64,
    /// Why it stopped.
    pub end: PlayoutEnd,
    /// Moves committed.
    pub moves: u32,
    /// Abilities applied.
    pub abilities: u32,
    /// Pieces captured.
    pub captures: u32,
    /// Pieces created by replication.
    pub replications: u32,
    /// Engine rejections of actions the playout believed valid.
    pub rejections: u32,
    /// Invariant violations observed.
    pub violations: u32,
}

impl PlayoutResult {
    /// The winner, if the game was decided.
    #[must_use]
    pub const fn winner(&self) -> Option<Faction> {
        match self.end {
            PlayoutEnd::Decided { outcome } => Some(outcome.winner()),
            PlayoutEnd::NoLegalMove { .. } | PlayoutEnd::TurnLimit => None,
        }
    }
}

/// Aggregated results of many playouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlayoutStats {
    /// Games played.
    pub games: u64,
    /// Games won by the defender.
    pub defender_wins: u64,
    /// Games won by the pathogen.
    pub pathogen_wins: u64,
    /// Wins by core capture.
    pub core_captures: u64,
    /// Wins by force control.
    pub force_controls: u64,
    /// Games that ended with no legal move.
    pub stalemates: u64,
    /// Games that hit the turn limit.
    pub turn_limits: u64,
    /// Moves committed across all games.
    pub total_moves: u64,
    /// Abilities applied across all games.
    pub total_abilities: u64,
    /// Captures across all games.
    pub total_captures: u64,
    /// Replications across all games.
    pub total_replications: u64,
    /// Rejected actions across all games.
    pub total_rejections: u64,
    /// Invariant violations across all games.
    pub total_violations: u64,
}

impl PlayoutStats {
    /// Add a playout to the totals.
    pub fn add_result(&mut self, result: &PlayoutResult) {
        self.games += 1;
        match result.end {
            PlayoutEnd::Decided { outcome } => {
                match outcome.winner() {
                    Faction::Defender => self.defender_wins += 1,
                    Faction::Pathogen => self.pathogen_wins += 1,
                }
                match outcome {
                    Outcome::CoreCaptured { .. } => self.core_captures += 1,
                    Outcome::ForceControl { .. } => self.force_controls += 1,
                }
            }
            PlayoutEnd::NoLegalMove { .. } => self.stalemates += 1,
            PlayoutEnd::TurnLimit => self.turn_limits += 1,
        }
        self.total_moves += u64::from(result.moves);
        self.total_abilities += u64::from(result.abilities);
        self.total_captures += u64::from(result.captures);
        self.total_replications += u64::from(result.replications);
        self.total_rejections += u64::from(result.rejections);
        self.total_violations += u64::from(result.violations);
    }

    /// Merge totals from another batch.
    pub fn merge(&mut self, other: &Self) {
        self.games += other.games;
        self.defender_wins += other.defender_wins;
        self.pathogen_wins += other.pathogen_wins;
        self.core_captures += other.core_captures;
        self.force_controls += other.force_controls;
        self.stalemates += other.stalemates;
        self.turn_limits += other.turn_limits;
        self.total_moves += other.total_moves;
        self.total_abilities += other.total_abilities;
        self.total_captures += other.total_captures;
        self.total_replications += other.total_replications;
        self.total_rejections += other.total_rejections;
        self.total_violations += other.total_violations;
    }

    /// Games that ended without a winner.
    #[must_use]
    pub const fn undecided(&self) -> u64 {
        self.stalemates + self.turn_limits
    }

    /// Mean moves per game.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_moves(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_moves as f64 / self.games as f64
    }
}

/// Simple deterministic hash for playout choices.
#[must_use]
pub const fn simple_hash(seed: u64, index: u64) -> u64 {
    let mut x = seed.wrapping_add(index);
    x ^= x >> 33;
    x = x.wrapping_mul(0xff51_afd7_ed55_8ccd);
    x ^= x >> 33;
    x = x.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    x ^= x >> 33;
    x
}

/// Pick an index below `len` from a hash value.
#[allow(clippy::cast_possible_truncation)]
const fn pick(hash: u64, len: usize) -> usize {
    (hash % len as u64) as usize
}

/// Play one game to completion.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the configuration is invalid.
pub fn run_playout(seed: u64, config: &GameConfig) -> Result<PlayoutResult, ConfigError> {
    let mut game = GameState::new(config.clone())?;
    let mut result = PlayoutResult {
        seed,
        end: PlayoutEnd::TurnLimit,
        moves: 0,
        abilities: 0,
        captures: 0,
        replications: 0,
        rejections: 0,
        violations: 0,
    };
    let mut ability_used = false;
    let mut step = 0u64;

    result.end = loop {
        if let Some(outcome) = game.outcome() {
            break PlayoutEnd::Decided { outcome };
        }
        if result.moves >= config.max_turns {
            break PlayoutEnd::TurnLimit;
        }
        let moves = game.legal_moves();
        if moves.is_empty() {
            break PlayoutEnd::NoLegalMove {
                faction: game.to_move(),
            };
        }

        let roll = simple_hash(seed, step);
        step += 1;

        if !ability_used && roll % ABILITY_ODDS == 0 {
            let options = ability_options(&game);
            if !options.is_empty() {
                let (ability, actor, target) = options[pick(roll >> 8, options.len())];
                match game.activate_ability(ability, actor, target) {
                    Ok(_) => result.abilities += 1,
                    Err(err) => {
                        warn!(seed, %ability, %actor, %err, "playout ability rejected");
                        result.rejections += 1;
                    }
                }
                ability_used = true;
                record_violations(&game, seed, &mut result);
                continue;
            }
        }

        let (from, to) = moves[pick(roll >> 8, moves.len())];
        match game.try_move(from, to) {
            Ok(record) => {
                result.moves += 1;
                if record.captured.is_some() {
                    result.captures += 1;
                }
            }
            Err(err) => {
                warn!(seed, %from, %to, %err, "playout move rejected");
                result.rejections += 1;
            }
        }
        ability_used = false;
        record_violations(&game, seed, &mut result);
    };

    result.replications = game.tally().replicated;
    debug!(seed, end = ?result.end, moves = result.moves, "playout finished");
    Ok(result)
}

fn record_violations(game: &GameState, seed: u64, result: &mut PlayoutResult) {
    for violation in check_invariants(game) {
        warn!(seed, turn = game.turn(), %violation, "invariant violated");
        result.violations += 1;
    }
}

/// Run `games` playouts in parallel, seeded `base_seed`, `base_seed + 1`, ...
///
/// Each worker folds into its own [`PlayoutStats`] and the partial totals
/// are merged at the end.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the configuration is invalid; no game is
/// played in that case.
pub fn run_playouts(
    base_seed: u64,
    games: u64,
    config: &GameConfig,
) -> Result<PlayoutStats, ConfigError> {
    config.validate()?;

    let stats = (0..games)
        .into_par_iter()
        .fold(PlayoutStats::default, |mut local, i| {
            if let Ok(result) = run_playout(base_seed.wrapping_add(i), config) {
                local.add_result(&result);
            }
            local
        })
        .reduce(PlayoutStats::default, |mut a, b| {
            a.merge(&b);
            a
        });

    info!(
        games = stats.games,
        defender_wins = stats.defender_wins,
        pathogen_wins = stats.pathogen_wins,
        undecided = stats.undecided(),
        violations = stats.total_violations,
        "playouts finished"
    );
    Ok(stats)
}
