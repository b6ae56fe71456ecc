//! Energy economy: one pool per faction.
//!
//! Pools are credited a fixed accrual each time the turn passes to a faction
//! and debited by ability activation. A debit larger than the pool is
//! refused, so a pool can never go below zero.

use serde::Serialize;

use crate::game::Faction;

/// Per-faction energy balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnergyPools {
    /// Balances indexed by [`Faction::index`].
    pools: [u32; 2],
}

impl EnergyPools {
    /// Both factions start with the same balance.
    #[must_use]
    pub const fn new(initial: u32) -> Self {
        Self {
            pools: [initial; 2],
        }
    }

    /// Current balance of a faction.
    #[must_use]
    pub const fn get(&self, faction: Faction) -> u32 {
        self.pools[faction.index()]
    }

    /// Overwrite a faction's balance.
    pub fn set(&mut self, faction: Faction, amount: u32) {
        self.pools[faction.index()] = amount;
    }

    /// Whether the faction can pay `cost`.
    #[must_use]
    pub const fn can_afford(&self, faction: Faction, cost: u32) -> bool {
        self.get(faction) >= cost
    }

    /// Take `cost` from the faction's pool.
    ///
    /// Returns `false` and leaves the pool untouched if it holds less.
    pub fn debit(&mut self, faction: Faction, cost: u32) -> bool {
        match self.pools[faction.index()].checked_sub(cost) {
            Some(rest) => {
                self.pools[faction.index()] = rest;
                true
            }
            None => false,
        }
    }

    /// Add the per-turn accrual to a faction's pool.
    pub fn accrue(&mut self, faction: Faction, amount: u32) {
        let pool = &mut self.pools[faction.index()];
        *pool = pool.saturating_add(amount);
    }
}
