//! Move legality: piece geometry plus the optional path-blocking rule.
//!
//! [`is_legal_move`] looks only at the two squares, the class and the
//! faction. Occupancy (own-piece blocking, captures) is layered on top by the
//! turn controller.

use crate::game::{Board, Faction, PieceClass, Square};

/// Whether moving a piece of `class` from `from` to `to` fits its geometry.
///
/// Sliding classes are not checked for blocking pieces; see [`first_blocker`].
#[must_use]
pub fn is_legal_move(class: PieceClass, faction: Faction, from: Square, to: Square) -> bool {
    if from == to || !from.is_on_board() || !to.is_on_board() {
        return false;
    }
    let (dx, dy) = from.deltas(to);

    match class {
        PieceClass::Core => dx <= 1 && dy <= 1,
        PieceClass::Complex => dx == dy || dx == 0 || dy == 0,
        PieceClass::Coordinator => dx == dy,
        PieceClass::Vector => is_vector_jump(dx, dy),
        PieceClass::Factory => dx == 0 || dy == 0,
        PieceClass::Particle => is_particle_step(faction, from, to),
    }
}

/// Knight-shaped jump.
#[must_use]
pub const fn is_vector_jump(dx: u8, dy: u8) -> bool {
    matches!((dx, dy), (2, 1) | (1, 2))
}

/// Forward single step, or double step from the starting rank.
fn is_particle_step(faction: Faction, from: Square, to: Square) -> bool {
    if from.col != to.col {
        return false;
    }
    let forward = i16::from(faction.forward());
    let advance = (i16::from(to.row) - i16::from(from.row)) * forward;

    advance == 1 || (advance == 2 && from.row == faction.particle_rank())
}

/// First occupied square strictly between `from` and `to`, for pieces whose
/// travel can be blocked.
///
/// Vector jumps and core steps are never blocked. Mutated pieces that land
/// via a vector jump should not be passed here.
#[must_use]
pub fn first_blocker(board: &Board, class: PieceClass, from: Square, to: Square) -> Option<Square> {
    if !class.is_slider() && class != PieceClass::Particle {
        return None;
    }
    Board::between(from, to)
        .into_iter()
        .find(|sq| board.get(*sq).is_some())
}

/// Every square a piece could reach by geometry alone.
#[must_use]
pub fn reachable_squares(class: PieceClass, faction: Faction, from: Square) -> Vec<Square> {
    Square::all()
        .filter(|to| is_legal_move(class, faction, from, *to))
        .collect()
}
