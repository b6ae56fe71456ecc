#![no_main]

//! Full turn-controller fuzzer.
//!
//! Feeds arbitrary selections, ability arms, cancels and direct move or
//! ability calls into one game, under an arbitrary rules configuration,
//! and checks after every input that:
//! 1. Rejections leave board, flags and energy untouched
//! 2. The turn counter only moves on committed moves
//! 3. All game invariants hold

use arbitrary::Arbitrary;
use immunochess::config::GameConfig;
use immunochess::game::check_invariants;
use immunochess::{Ability, GameState, Square};
use libfuzzer_sys::fuzz_target;

/// A fuzzer-generated player input.
#[derive(Arbitrary, Debug, Clone)]
enum FuzzInput {
    Select { row: u8, col: u8 },
    Arm { ability: u8 },
    Cancel,
    Move { from: (u8, u8), to: (u8, u8) },
    Activate { ability: u8, actor: (u8, u8), target: Option<(u8, u8)> },
}

/// Structured input for the fuzzer.
#[derive(Arbitrary, Debug)]
struct GameInput {
    initial_energy: u8,
    energy_per_turn: u8,
    mutation_cooldown: u8,
    reveal_range: u8,
    path_blocking: bool,
    inputs: Vec<FuzzInput>,
}

fn square((row, col): (u8, u8)) -> Square {
    // Allow one step off the board in each direction.
    Square::new(row % 10, col % 10)
}

fn ability(index: u8) -> Ability {
    Ability::ALL[usize::from(index) % Ability::ALL.len()]
}

fuzz_target!(|input: GameInput| {
    let config = GameConfig {
        initial_energy: u32::from(input.initial_energy),
        energy_per_turn: u32::from(input.energy_per_turn % 16),
        mutation_cooldown: input.mutation_cooldown % 8 + 1,
        reveal_range: input.reveal_range % 8,
        path_blocking: input.path_blocking,
        ..GameConfig::default()
    };
    let Ok(mut game) = GameState::new(config) else {
        return;
    };

    for action in input.inputs.into_iter().take(256) {
        let board = game.board().clone();
        let status = game.status().clone();
        let energy = *game.energy_pools();
        let turn = game.turn();

        let rejected = match action {
            FuzzInput::Select { row, col } => game.select_square(square((row, col))).is_err(),
            FuzzInput::Arm { ability: index } => {
                game.select_ability(ability(index));
                false
            }
            FuzzInput::Cancel => {
                game.cancel();
                false
            }
            FuzzInput::Move { from, to } => game.try_move(square(from), square(to)).is_err(),
            FuzzInput::Activate {
                ability: index,
                actor,
                target,
            } => game
                .activate_ability(ability(index), square(actor), target.map(square))
                .is_err(),
        };

        if rejected {
            assert_eq!(game.board(), &board, "rejection changed the board");
            assert_eq!(game.status(), &status, "rejection changed the flags");
            assert_eq!(game.energy_pools(), &energy, "rejection changed energy");
            assert_eq!(game.turn(), turn, "rejection advanced the turn");
        } else {
            assert!(game.turn() == turn || game.turn() == turn + 1);
        }

        let violations = check_invariants(&game);
        assert!(violations.is_empty(), "invariants violated: {violations:?}");
    }
});
