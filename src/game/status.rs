//! Per-piece status flags and mutation cooldowns.
//!
//! Flags are keyed by [`PieceId`], so they follow a piece when it moves and
//! vanish when it is captured. Square-level views are derived from the board
//! by the game state.

use std::collections::{BTreeMap, BTreeSet};

use crate::game::PieceId;

/// Concealed, tagged and mutated flags plus mutation cooldowns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusFlags {
    /// Pieces hidden from the opponent.
    concealed: BTreeSet<PieceId>,
    /// Pieces marked visible regardless of concealment.
    tagged: BTreeSet<PieceId>,
    /// Pieces with vector movement until their faction's next move.
    mutated: BTreeSet<PieceId>,
    /// Own turns left before a piece may mutate again.
    cooldowns: BTreeMap<PieceId, u8>,
}

impl StatusFlags {
    /// No flags set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the piece is concealed.
    #[must_use]
    pub fn is_concealed(&self, id: PieceId) -> bool {
        self.concealed.contains(&id)
    }

    /// Whether the piece is tagged.
    #[must_use]
    pub fn is_tagged(&self, id: PieceId) -> bool {
        self.tagged.contains(&id)
    }

    /// Whether the piece is mutated.
    #[must_use]
    pub fn is_mutated(&self, id: PieceId) -> bool {
        self.mutated.contains(&id)
    }

    /// Remaining cooldown, zero if none.
    #[must_use]
    pub fn cooldown(&self, id: PieceId) -> u8 {
        self.cooldowns.get(&id).copied().unwrap_or(0)
    }

    /// Flag a piece concealed.
    pub fn conceal(&mut self, id: PieceId) {
        self.concealed.insert(id);
    }

    /// Remove concealment, returning whether it was set.
    pub fn unconceal(&mut self, id: PieceId) -> bool {
        self.concealed.remove(&id)
    }

    /// Flag a piece tagged.
    pub fn tag(&mut self, id: PieceId) {
        self.tagged.insert(id);
    }

    /// Flag a piece mutated and arm its cooldown.
    pub fn mutate(&mut self, id: PieceId, cooldown: u8) {
        self.mutated.insert(id);
        if cooldown > 0 {
            self.cooldowns.insert(id, cooldown);
        }
    }

    /// End the current turn segment for the given pieces: drop their
    /// mutations and count their cooldowns down by one.
    pub fn end_turn<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = PieceId>,
    {
        for id in ids {
            self.mutated.remove(&id);
            if let Some(left) = self.cooldowns.get_mut(&id) {
                *left = left.saturating_sub(1);
                if *left == 0 {
                    self.cooldowns.remove(&id);
                }
            }
        }
    }

    /// Drop everything known about a piece (it left the board).
    pub fn forget(&mut self, id: PieceId) {
        self.concealed.remove(&id);
        self.tagged.remove(&id);
        self.mutated.remove(&id);
        self.cooldowns.remove(&id);
    }

    /// Concealed piece ids.
    pub fn concealed(&self) -> impl Iterator<Item = PieceId> + '_ {
        self.concealed.iter().copied()
    }

    /// Tagged piece ids.
    pub fn tagged(&self) -> impl Iterator<Item = PieceId> + '_ {
        self.tagged.iter().copied()
    }

    /// Mutated piece ids.
    pub fn mutated(&self) -> impl Iterator<Item = PieceId> + '_ {
        self.mutated.iter().copied()
    }

    /// Pieces with an active cooldown and the turns remaining.
    pub fn cooldowns(&self) -> impl Iterator<Item = (PieceId, u8)> + '_ {
        self.cooldowns.iter().map(|(id, left)| (*id, *left))
    }
}
