//! Multi-turn integration tests for the turn controller.
//!
//! These drive games through the public selection interface and action
//! scripts, checking the documented scenarios end to end.
//!
//! Run with: cargo test game_integration

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use immunochess::config::GameConfig;
use immunochess::game::{AbilityEffect, check_invariants};
use immunochess::script;
use immunochess::{Ability, Board, Event, Faction, GameError, GameState, PieceClass, Square};

fn sq(row: u8, col: u8) -> Square {
    Square::new(row, col)
}

fn layout(rows: [&str; 8]) -> GameConfig {
    GameConfig {
        layout: Some(rows.map(String::from).to_vec()),
        ..GameConfig::default()
    }
}

#[test]
fn test_defender_tags_concealed_particle() {
    let mut game = GameState::new(layout([
        "....k...", ".p......", "........", "........", "........", "........",
        ".N......", "....K...",
    ]))
    .unwrap();

    // Defender spends the first turn elsewhere.
    game.try_move(sq(7, 4), sq(7, 3)).unwrap();

    // Pathogen conceals its particle, then moves its core.
    game.select_ability(Ability::Conceal);
    game.select_square(sq(1, 1)).unwrap();
    game.try_move(sq(0, 4), sq(0, 5)).unwrap();
    assert_eq!(game.concealed_squares(), vec![sq(1, 1)]);
    assert!(!game.is_visible_to(Faction::Defender, sq(1, 1)));

    // Defender vector tags it.
    let before = game.energy(Faction::Defender);
    game.select_square(sq(6, 1)).unwrap();
    game.select_ability(Ability::Tag);
    let event = game.select_square(sq(1, 1)).unwrap();

    match event {
        Event::AbilityActivated(outcome) => {
            assert_eq!(outcome.effect, AbilityEffect::Tagged { square: sq(1, 1) });
            assert_eq!(outcome.cost, Ability::Tag.cost());
        }
        other => panic!("expected an ability event, got {other:?}"),
    }
    assert_eq!(game.tagged_squares(), vec![sq(1, 1)]);
    assert_eq!(game.concealed_squares(), vec![sq(1, 1)]);
    assert_eq!(game.energy(Faction::Defender), before - Ability::Tag.cost());
    assert!(game.is_visible_to(Faction::Defender, sq(1, 1)));
    assert_eq!(game.to_move(), Faction::Defender);
}

#[test]
fn test_pathogen_core_cannot_move_two_diagonally() {
    let mut game = GameState::default();
    game.try_move(sq(6, 4), sq(4, 4)).unwrap();

    let err = game.try_move(sq(0, 4), sq(2, 6)).unwrap_err();
    assert_eq!(
        err,
        GameError::IllegalMove {
            class: PieceClass::Core,
            from: sq(0, 4),
            to: sq(2, 6),
        }
    );
    assert_eq!(game.turn(), 2);
    assert_eq!(game.to_move(), Faction::Pathogen);
}

#[test]
fn test_mutate_with_four_energy_is_refused() {
    let config = GameConfig {
        initial_energy: 2,
        ..GameConfig::default()
    };
    let mut game = GameState::new(config).unwrap();
    game.try_move(sq(6, 0), sq(5, 0)).unwrap();
    assert_eq!(game.energy(Faction::Pathogen), 4);

    let err = game
        .activate_ability(Ability::Mutate, sq(0, 1), None)
        .unwrap_err();
    assert_eq!(
        err,
        GameError::InsufficientEnergy {
            ability: Ability::Mutate,
            cost: 5,
            available: 4,
        }
    );
    assert_eq!(err.to_string(), "mutate costs 5 energy, only 4 available");
    assert_eq!(game.energy(Faction::Pathogen), 4);
    assert!(game.mutated_squares().is_empty());
}

#[test]
fn test_cooldown_elapses_after_own_turns() {
    let mut game = GameState::default();
    game.try_move(sq(6, 0), sq(5, 0)).unwrap();
    game.activate_ability(Ability::Mutate, sq(0, 1), None).unwrap();

    // Three pathogen moves count the cooldown down from 3.
    let pathogen_moves = [(sq(1, 7), sq(2, 7)), (sq(2, 7), sq(3, 7)), (sq(3, 7), sq(4, 7))];
    let defender_moves = [(sq(5, 0), sq(4, 0)), (sq(4, 0), sq(3, 0))];
    for (i, (from, to)) in pathogen_moves.into_iter().enumerate() {
        if i > 0 {
            let err = game
                .activate_ability(Ability::Mutate, sq(0, 1), None)
                .unwrap_err();
            assert!(matches!(err, GameError::CooldownActive { .. }));
        }
        game.try_move(from, to).unwrap();
        if let Some(&(d_from, d_to)) = defender_moves.get(i) {
            game.try_move(d_from, d_to).unwrap();
        }
    }
    assert_eq!(game.cooldown_at(sq(0, 1)), 0);

    game.try_move(sq(3, 0), sq(2, 0)).unwrap();
    assert_eq!(game.to_move(), Faction::Pathogen);
    assert!(game.activate_ability(Ability::Mutate, sq(0, 1), None).is_ok());
}

#[test]
fn test_rejections_leave_state_untouched() {
    let mut game = GameState::default();
    let board = game.board().clone();
    let energy = *game.energy_pools();

    let attempts: [Result<(), GameError>; 5] = [
        game.try_move(sq(1, 0), sq(2, 0)).map(|_| ()),
        game.try_move(sq(7, 0), sq(6, 0)).map(|_| ()),
        game.try_move(sq(6, 3), sq(3, 3)).map(|_| ()),
        game.activate_ability(Ability::Replicate, sq(7, 0), Some(sq(6, 1)))
            .map(|_| ()),
        game.activate_ability(Ability::Reveal, sq(6, 6), None).map(|_| ()),
    ];
    for attempt in attempts {
        assert!(attempt.is_err());
    }

    assert_eq!(game.board(), &board);
    assert_eq!(game.energy_pools(), &energy);
    assert_eq!(game.turn(), 1);
    assert_eq!(game.to_move(), Faction::Defender);
}

#[test]
fn test_replication_grows_population() {
    let mut game = GameState::new(layout([
        "....k...", "........", "........", "........", "........", "........",
        "........", "R...K...",
    ]))
    .unwrap();

    game.activate_ability(Ability::Replicate, sq(7, 0), Some(sq(6, 0)))
        .unwrap();
    assert_eq!(game.board().count(Faction::Defender), 3);
    assert_eq!(
        game.board().get(sq(6, 0)).map(|p| p.class),
        Some(PieceClass::Particle)
    );
    // The replica moves like any defender particle.
    game.try_move(sq(6, 0), sq(4, 0)).unwrap();
    assert!(check_invariants(&game).is_empty());
}

#[test]
fn test_core_capture_outcome() {
    let mut game = GameState::new(layout([
        "....k...", "........", "........", "........", "........", "........",
        "........", "....Q..K",
    ]))
    .unwrap();
    assert!(game.outcome().is_none());

    let record = game.try_move(sq(7, 4), sq(0, 4)).unwrap();
    assert_eq!(record.captured.map(|p| p.class), Some(PieceClass::Core));
    assert_eq!(game.outcome().map(|o| o.winner()), Some(Faction::Defender));
    // The engine keeps accepting input after a decided game.
    assert_eq!(game.to_move(), Faction::Pathogen);
}

#[test]
fn test_script_drives_a_game() {
    let steps = script::parse(
        "# both sides open\n\
         move 6 3 4 3\n\
         move 1 3 3 3\n\
         # defender particle captures straight ahead\n\
         move 4 3 3 3\n\
         ability conceal   # pathogen hides its core\n\
         select 0 4\n\
         select 0 0\n\
         select 5 5       # factories move orthogonally\n",
    )
    .unwrap();

    let mut game = GameState::default();
    let results: Vec<_> = steps.iter().map(|s| s.action.apply(&mut game)).collect();

    assert!(results[..6].iter().all(Result::is_ok));
    assert!(matches!(
        &results[2],
        Ok(Some(Event::Moved(record))) if record.captured.is_some()
    ));
    assert!(matches!(results[6], Err(GameError::IllegalMove { .. })));
    assert_eq!(game.concealed_squares(), vec![sq(0, 4)]);
    assert_eq!(game.board().count(Faction::Pathogen), 15);
    assert_eq!(game.to_move(), Faction::Pathogen);
    assert!(check_invariants(&game).is_empty());
}

#[test]
fn test_view_hides_concealed_opponents_only() {
    let mut game = GameState::default();
    game.try_move(sq(6, 0), sq(5, 0)).unwrap();
    game.activate_ability(Ability::Conceal, sq(1, 6), None).unwrap();

    let defender_view = game.view_for(Faction::Defender);
    let pathogen_view = game.view_for(Faction::Pathogen);
    let hidden = defender_view.iter().filter(|c| c.is_none()).count();
    let visible_to_owner = pathogen_view.iter().filter(|c| c.is_none()).count();
    assert_eq!(hidden, visible_to_owner + 1);
    assert_eq!(pathogen_view, game.board().cells().to_vec());
    assert_eq!(*game.board(), {
        let mut expected = Board::initial();
        expected.relocate(sq(6, 0), sq(5, 0));
        expected
    });
}
