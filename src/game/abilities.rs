//! Ability engine.
//!
//! Activation is split into a read-only [`plan`] step that performs every
//! check, and an [`apply`] step that cannot fail. The energy debit and the
//! effect are applied together in `apply`, so a rejected activation never
//! touches the board, the flags, or the pools.

use serde::Serialize;

use crate::error::{GameError, GameResult};
use crate::game::catalog::{Targeting, abilities_of, can_use};
use crate::game::{Ability, GameState, Piece, PieceClass, PieceId, Square};

/// State change produced by an ability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum AbilityEffect {
    /// The actor is now concealed.
    Concealed {
        /// Square of the concealed piece.
        square: Square,
    },
    /// The actor is mutated and its cooldown armed.
    Mutated {
        /// Square of the mutated piece.
        square: Square,
        /// Own turns before it may mutate again.
        cooldown: u8,
    },
    /// An opposing piece is tagged.
    Tagged {
        /// Square of the tagged piece.
        square: Square,
    },
    /// Concealment was stripped from nearby pieces.
    Revealed {
        /// Squares that lost concealment (may be empty).
        squares: Vec<Square>,
    },
    /// A new particle was created.
    Replicated {
        /// Square of the new piece.
        square: Square,
        /// The new piece.
        piece: Piece,
    },
}

/// Result of a successful activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbilityOutcome {
    /// Ability applied.
    pub ability: Ability,
    /// Square of the acting piece.
    pub actor: Square,
    /// Energy debited.
    pub cost: u32,
    /// What changed.
    pub effect: AbilityEffect,
}

/// Fully validated activation, ready to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AbilityPlan {
    ability: Ability,
    actor: Square,
    actor_piece: Piece,
    cost: u32,
    /// Pool balance once the cost is paid.
    remaining: u32,
    action: PlannedAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PlannedAction {
    Conceal,
    Mutate,
    Tag { square: Square, id: PieceId },
    Reveal { targets: Vec<(Square, PieceId)> },
    Replicate { square: Square, child: Piece },
}

/// Check an activation against ownership, catalog, energy, target and
/// cooldown rules, in that order.
pub(crate) fn plan(
    state: &GameState,
    ability: Ability,
    actor: Square,
    target: Option<Square>,
) -> GameResult<AbilityPlan> {
    if !actor.is_on_board() {
        return Err(GameError::OutOfBounds(actor));
    }
    let piece = state.owned_piece(actor)?;
    if !can_use(piece.faction, piece.class, ability) {
        return Err(GameError::AbilityUnavailable {
            ability,
            faction: piece.faction,
            class: piece.class,
        });
    }

    let cost = ability.cost();
    let available = state.energy.get(piece.faction);
    let remaining = available
        .checked_sub(cost)
        .ok_or(GameError::InsufficientEnergy {
            ability,
            cost,
            available,
        })?;

    let action = match ability.targeting() {
        Targeting::Actor => {
            if target.is_some_and(|t| t != actor) {
                return Err(GameError::InvalidTarget {
                    ability,
                    reason: "this ability acts on its own piece",
                });
            }
            plan_self_effect(state, ability, actor, piece)?
        }
        Targeting::OpposingPiece => {
            let square = required_target(ability, target)?;
            match state.board.get(square) {
                Some(victim) if victim.faction != piece.faction => PlannedAction::Tag {
                    square,
                    id: victim.id,
                },
                _ => {
                    return Err(GameError::InvalidTarget {
                        ability,
                        reason: "target must hold an opposing piece",
                    });
                }
            }
        }
        Targeting::AdjacentEmpty => {
            let square = required_target(ability, target)?;
            if actor.distance(square) != 1 || !state.board.is_empty(square) {
                return Err(GameError::InvalidTarget {
                    ability,
                    reason: "target must be an empty adjacent square",
                });
            }
            let child = state
                .board
                .next_piece(square, piece.faction, PieceClass::Particle)
                .ok_or(GameError::InvalidTarget {
                    ability,
                    reason: "no piece identities left on this board",
                })?;
            PlannedAction::Replicate { square, child }
        }
    };

    Ok(AbilityPlan {
        ability,
        actor,
        actor_piece: piece,
        cost,
        remaining,
        action,
    })
}

fn plan_self_effect(
    state: &GameState,
    ability: Ability,
    actor: Square,
    piece: Piece,
) -> GameResult<PlannedAction> {
    match ability {
        Ability::Conceal => Ok(PlannedAction::Conceal),
        Ability::Mutate => {
            let remaining = state.status.cooldown(piece.id);
            if remaining > 0 {
                return Err(GameError::CooldownActive {
                    square: actor,
                    remaining,
                });
            }
            Ok(PlannedAction::Mutate)
        }
        Ability::Reveal => {
            let range = state.config.reveal_range;
            let targets = state
                .board
                .pieces()
                .filter(|(sq, p)| actor.distance(*sq) <= range && state.status.is_concealed(p.id))
                .map(|(sq, p)| (sq, p.id))
                .collect();
            Ok(PlannedAction::Reveal { targets })
        }
        Ability::Tag | Ability::Replicate => Err(GameError::InvalidTarget {
            ability,
            reason: "this ability needs a target square",
        }),
    }
}

fn required_target(ability: Ability, target: Option<Square>) -> GameResult<Square> {
    let square = target.ok_or(GameError::InvalidTarget {
        ability,
        reason: "this ability needs a target square",
    })?;
    if !square.is_on_board() {
        return Err(GameError::OutOfBounds(square));
    }
    Ok(square)
}

/// Apply a plan made against the current state: pay and change state together.
pub(crate) fn apply(state: &mut GameState, plan: AbilityPlan) -> AbilityOutcome {
    let AbilityPlan {
        ability,
        actor,
        actor_piece,
        cost,
        remaining,
        action,
    } = plan;

    state.energy.set(actor_piece.faction, remaining);

    let effect = match action {
        PlannedAction::Conceal => {
            state.status.conceal(actor_piece.id);
            AbilityEffect::Concealed { square: actor }
        }
        PlannedAction::Mutate => {
            let cooldown = state.config.mutation_cooldown;
            state.status.mutate(actor_piece.id, cooldown);
            AbilityEffect::Mutated {
                square: actor,
                cooldown,
            }
        }
        PlannedAction::Tag { square, id } => {
            state.status.tag(id);
            AbilityEffect::Tagged { square }
        }
        PlannedAction::Reveal { targets } => {
            let squares = targets
                .into_iter()
                .filter(|(_, id)| state.status.unconceal(*id))
                .map(|(sq, _)| sq)
                .collect();
            AbilityEffect::Revealed { squares }
        }
        PlannedAction::Replicate { square, child } => {
            state.board.place(square, child);
            state.tally.replicated += 1;
            AbilityEffect::Replicated {
                square,
                piece: child,
            }
        }
    };

    AbilityOutcome {
        ability,
        actor,
        cost,
        effect,
    }
}

/// Every activation the faction to move could make right now.
///
/// Each entry is `(ability, actor, target)`.
#[must_use]
pub fn ability_options(state: &GameState) -> Vec<(Ability, Square, Option<Square>)> {
    let mut options = Vec::new();
    for (actor, piece) in state.board.pieces_of(state.to_move) {
        for &ability in abilities_of(piece.faction, piece.class) {
            if ability.needs_target() {
                for target in Square::all() {
                    if plan(state, ability, actor, Some(target)).is_ok() {
                        options.push((ability, actor, Some(target)));
                    }
                }
            } else if plan(state, ability, actor, None).is_ok() {
                options.push((ability, actor, None));
            }
        }
    }
    options
}
