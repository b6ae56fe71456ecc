//! The two sides of the board.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Faction {
    /// Immune-system side. Moves first, starts on rows 6 and 7.
    Defender,
    /// Viral side. Starts on rows 0 and 1.
    Pathogen,
}

impl Faction {
    /// Both factions in turn order.
    pub const ALL: [Faction; 2] = [Faction::Defender, Faction::Pathogen];

    /// The other faction.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Faction::Defender => Faction::Pathogen,
            Faction::Pathogen => Faction::Defender,
        }
    }

    /// Row delta of a forward step.
    #[must_use]
    pub const fn forward(self) -> i8 {
        match self {
            Faction::Defender => -1,
            Faction::Pathogen => 1,
        }
    }

    /// Row the faction's particles start on.
    #[must_use]
    pub const fn particle_rank(self) -> u8 {
        match self {
            Faction::Defender => 6,
            Faction::Pathogen => 1,
        }
    }

    /// Row of the faction's back rank.
    #[must_use]
    pub const fn home_rank(self) -> u8 {
        match self {
            Faction::Defender => 7,
            Faction::Pathogen => 0,
        }
    }

    /// Index into per-faction arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Faction::Defender => 0,
            Faction::Pathogen => 1,
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Faction::Defender => write!(f, "defender"),
            Faction::Pathogen => write!(f, "pathogen"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_round_trips() {
        for faction in Faction::ALL {
            assert_ne!(faction, faction.opponent());
            assert_eq!(faction, faction.opponent().opponent());
        }
    }

    #[test]
    fn test_forward_points_away_from_home() {
        for faction in Faction::ALL {
            let home = i16::from(faction.home_rank());
            let particles = i16::from(faction.particle_rank());
            assert_eq!(particles - home, i16::from(faction.forward()));
        }
    }
}
