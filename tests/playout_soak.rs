//! Soak tests: many seeded playouts with invariant checking.
//!
//! Run with: cargo test --release playout_soak

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use immunochess::config::GameConfig;
use immunochess::playout::{PlayoutEnd, run_playout, run_playouts};

#[test]
fn test_many_playouts_hold_invariants() {
    let config = GameConfig {
        max_turns: 150,
        ..GameConfig::default()
    };
    let stats = run_playouts(2024, 64, &config).unwrap();

    assert_eq!(stats.games, 64);
    assert_eq!(stats.total_violations, 0);
    assert_eq!(stats.total_rejections, 0);
    assert_eq!(
        stats.defender_wins + stats.pathogen_wins + stats.undecided(),
        stats.games
    );
    assert!(stats.total_abilities > 0, "playouts should use abilities");
}

#[test]
fn test_path_blocking_playouts_hold_invariants() {
    let config = GameConfig {
        max_turns: 150,
        path_blocking: true,
        ..GameConfig::default()
    };
    let stats = run_playouts(7, 32, &config).unwrap();
    assert_eq!(stats.total_violations, 0);
    assert_eq!(stats.total_rejections, 0);
}

#[test]
fn test_playouts_are_reproducible() {
    let config = GameConfig {
        max_turns: 100,
        ..GameConfig::default()
    };
    for seed in [0, 1, 99, u64::MAX] {
        let first = run_playout(seed, &config).unwrap();
        let second = run_playout(seed, &config).unwrap();
        assert_eq!(first, second, "seed {seed} diverged");
        if first.end == PlayoutEnd::TurnLimit {
            assert_eq!(first.moves, 100);
        }
    }
}

#[test]
fn test_rich_economy_playouts() {
    let config = GameConfig {
        max_turns: 120,
        initial_energy: 100,
        energy_per_turn: 10,
        mutation_cooldown: 1,
        reveal_range: 7,
        ..GameConfig::default()
    };
    let stats = run_playouts(31, 24, &config).unwrap();
    assert_eq!(stats.total_violations, 0);
    assert!(stats.total_abilities > 0);
}
