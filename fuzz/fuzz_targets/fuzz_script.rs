#![no_main]

//! Script parser fuzzer.
//!
//! Arbitrary text must either fail to parse with a line number inside the
//! input, or parse into actions that can be replayed without panicking.

use immunochess::GameState;
use immunochess::game::check_invariants;
use immunochess::script::{self, ScriptError};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    match script::parse(text) {
        Ok(steps) => {
            let mut game = GameState::default();
            for step in steps.iter().take(512) {
                let _ = step.action.apply(&mut game);
            }
            assert!(check_invariants(&game).is_empty());
        }
        Err(ScriptError::Syntax { line, .. }) => {
            assert!(line >= 1 && line <= text.lines().count());
        }
        Err(err) => panic!("unexpected error: {err}"),
    }
});
