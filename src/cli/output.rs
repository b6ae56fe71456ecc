//! Output formatting utilities for CLI.

use std::fmt::Write as _;

use immunochess::game::{Ability, AbilityEffect, Event, Faction, PieceClass, abilities_of};
use immunochess::playout::PlayoutStats;
use immunochess::script::ScriptStep;
use immunochess::{GameResult, Snapshot};
use serde::Serialize;

/// JSON-serializable script step.
#[derive(Debug, Serialize)]
pub(super) struct JsonStep {
    /// 1-based script line.
    pub(super) line: usize,
    /// Action as written.
    pub(super) action: String,
    /// Event produced, if any.
    pub(super) event: Option<Event>,
    /// Rejection message, if rejected.
    pub(super) error: Option<String>,
}

impl JsonStep {
    /// Create from a step and its result.
    pub(super) fn new(step: &ScriptStep, result: &GameResult<Option<Event>>) -> Self {
        let (event, error) = match result {
            Ok(event) => (event.clone(), None),
            Err(err) => (None, Some(err.to_string())),
        };
        Self {
            line: step.line,
            action: step.action.to_string(),
            event,
            error,
        }
    }
}

/// JSON-serializable script run.
#[derive(Debug, Serialize)]
pub(super) struct JsonRun {
    /// Per-step results.
    pub(super) steps: Vec<JsonStep>,
    /// Steps the engine rejected.
    pub(super) rejected: usize,
    /// State after the last step.
    pub(super) final_state: Snapshot,
}

/// Format one script step as a line of text.
pub(super) fn format_step(step: &ScriptStep, result: &GameResult<Option<Event>>) -> String {
    let outcome = match result {
        Ok(None) => "ok".to_string(),
        Ok(Some(event)) => describe_event(event),
        Err(err) => format!("rejected: {err}"),
    };
    let action = step.action.to_string();
    format!("line {:>3}: {action:<20} {outcome}", step.line)
}

fn describe_event(event: &Event) -> String {
    match event {
        Event::Selected { square } => format!("selected {square}"),
        Event::Deselected { square } => format!("deselected {square}"),
        Event::Moved(record) => {
            let mut text = format!(
                "{} {} moved {} -> {}",
                record.piece.faction,
                record.piece.name(),
                record.from,
                record.to
            );
            if let Some(captured) = record.captured {
                let _ = write!(text, ", captured {}", captured.name());
            }
            text
        }
        Event::AbilityActivated(outcome) => {
            let detail = match &outcome.effect {
                AbilityEffect::Concealed { square } => format!("concealed {square}"),
                AbilityEffect::Mutated { square, cooldown } => {
                    format!("mutated {square}, cooldown {cooldown}")
                }
                AbilityEffect::Tagged { square } => format!("tagged {square}"),
                AbilityEffect::Revealed { squares } if squares.is_empty() => {
                    "revealed nothing".to_string()
                }
                AbilityEffect::Revealed { squares } => {
                    let list: Vec<String> = squares.iter().map(ToString::to_string).collect();
                    format!("revealed {}", list.join(" "))
                }
                AbilityEffect::Replicated { square, piece } => {
                    format!("replicated {} at {square}", piece.name())
                }
            };
            format!("{} from {} ({} energy): {detail}", outcome.ability, outcome.actor, outcome.cost)
        }
    }
}

/// Format a snapshot as a board diagram with status lines.
pub(super) fn format_snapshot(snapshot: &Snapshot) -> String {
    let mut output = String::new();

    output.push_str("    0 1 2 3 4 5 6 7\n");
    for (row, cells) in snapshot.board.iter().enumerate() {
        let spaced: Vec<String> = cells.chars().map(String::from).collect();
        let _ = writeln!(output, "  {row} {}", spaced.join(" "));
    }
    output.push('\n');

    let _ = writeln!(
        output,
        "  Turn {} ({} to move)",
        snapshot.turn, snapshot.to_move
    );
    let _ = writeln!(
        output,
        "  Energy: defender {}, pathogen {}",
        snapshot.energy.defender, snapshot.energy.pathogen
    );
    for (label, squares) in [
        ("Concealed", &snapshot.concealed),
        ("Tagged", &snapshot.tagged),
        ("Mutated", &snapshot.mutated),
    ] {
        if !squares.is_empty() {
            let list: Vec<String> = squares.iter().map(ToString::to_string).collect();
            let _ = writeln!(output, "  {label}: {}", list.join(" "));
        }
    }
    if !snapshot.cooldowns.is_empty() {
        let list: Vec<String> = snapshot
            .cooldowns
            .iter()
            .map(|(sq, left)| format!("{sq}={left}"))
            .collect();
        let _ = writeln!(output, "  Cooldowns: {}", list.join(" "));
    }
    if let Some(outcome) = snapshot.outcome {
        let _ = writeln!(output, "  Outcome: {} wins ({outcome:?})", outcome.winner());
    }

    output
}

/// JSON-serializable simulation result.
#[derive(Debug, Serialize)]
pub(super) struct JsonSimulateResult {
    /// First seed of the batch.
    pub(super) base_seed: u64,
    /// Aggregated statistics.
    pub(super) stats: PlayoutStats,
    /// Wall-clock duration in seconds.
    pub(super) duration_secs: f64,
}

/// Format simulation statistics as human-readable text.
#[allow(clippy::cast_precision_loss)]
pub(super) fn format_stats_text(stats: &PlayoutStats, base_seed: u64) -> String {
    let mut output = String::new();
    let rate = |n: u64| {
        if stats.games == 0 {
            0.0
        } else {
            n as f64 * 100.0 / stats.games as f64
        }
    };

    let _ = writeln!(output, "Playouts: {} (seeds from {base_seed})", stats.games);
    let _ = writeln!(
        output,
        "  Defender wins: {:>6} ({:.1}%)",
        stats.defender_wins,
        rate(stats.defender_wins)
    );
    let _ = writeln!(
        output,
        "  Pathogen wins: {:>6} ({:.1}%)",
        stats.pathogen_wins,
        rate(stats.pathogen_wins)
    );
    let _ = writeln!(
        output,
        "  Undecided:     {:>6} ({} stalemate, {} turn limit)",
        stats.undecided(),
        stats.stalemates,
        stats.turn_limits
    );
    let _ = writeln!(
        output,
        "  Decided by core capture {}, force control {}",
        stats.core_captures, stats.force_controls
    );
    let _ = writeln!(output, "  Avg moves: {:.1}", stats.avg_moves());
    let _ = writeln!(
        output,
        "  Abilities {}, captures {}, replications {}",
        stats.total_abilities, stats.total_captures, stats.total_replications
    );
    if stats.total_rejections > 0 || stats.total_violations > 0 {
        let _ = writeln!(
            output,
            "  WARNING: {} rejected actions, {} invariant violations",
            stats.total_rejections, stats.total_violations
        );
    }

    output
}

/// JSON-serializable catalog entry.
#[derive(Debug, Serialize)]
pub(super) struct JsonClass {
    /// Faction owning this variant of the class.
    pub(super) faction: Faction,
    /// Piece class.
    pub(super) class: PieceClass,
    /// Board letter.
    pub(super) letter: char,
    /// Display name.
    pub(super) name: &'static str,
    /// Abilities the class may use.
    pub(super) abilities: Vec<JsonAbility>,
}

/// JSON-serializable ability.
#[derive(Debug, Serialize)]
pub(super) struct JsonAbility {
    /// Ability.
    pub(super) ability: Ability,
    /// Energy cost.
    pub(super) cost: u32,
    /// Whether a target square is required.
    pub(super) needs_target: bool,
}

/// All faction/class combinations with their abilities.
pub(super) fn catalog_entries() -> Vec<JsonClass> {
    Faction::ALL
        .into_iter()
        .flat_map(|faction| {
            PieceClass::ALL.into_iter().map(move |class| {
                let letter = match faction {
                    Faction::Defender => class.letter(),
                    Faction::Pathogen => class.letter().to_ascii_lowercase(),
                };
                JsonClass {
                    faction,
                    class,
                    letter,
                    name: class.display_name(faction),
                    abilities: abilities_of(faction, class)
                        .iter()
                        .map(|&ability| JsonAbility {
                            ability,
                            cost: ability.cost(),
                            needs_target: ability.needs_target(),
                        })
                        .collect(),
                }
            })
        })
        .collect()
}

/// Format the catalog as human-readable text.
pub(super) fn format_catalog_text(entries: &[JsonClass]) -> String {
    let mut output = String::new();

    for faction in Faction::ALL {
        let _ = writeln!(output, "{faction}:");
        for entry in entries.iter().filter(|e| e.faction == faction) {
            let abilities: Vec<String> = entry
                .abilities
                .iter()
                .map(|a| format!("{} ({})", a.ability, a.cost))
                .collect();
            let abilities = if abilities.is_empty() {
                "-".to_string()
            } else {
                abilities.join(", ")
            };
            let class = entry.class.to_string();
            let _ = writeln!(
                output,
                "  {} {class:<12} {:<12} {abilities}",
                entry.letter, entry.name
            );
        }
    }

    output
}
