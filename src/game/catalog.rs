//! Piece catalog: movement classes, abilities, and ability costs.
//!
//! Every lookup here is a pure match over closed enums. A piece's abilities
//! depend on both its class and its faction, so the same class can play a
//! different role on each side:
//!
//! | class       | defender          | pathogen          |
//! |-------------|-------------------|-------------------|
//! | core        | reveal            | conceal           |
//! | complex     | reveal, tag       | mutate, conceal   |
//! | coordinator | reveal            | conceal           |
//! | vector      | tag               | mutate            |
//! | factory     | replicate         | replicate         |
//! | particle    | -                 | conceal           |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::game::Faction;

/// Movement class of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceClass {
    /// Single step in any direction (king-analog).
    Core,
    /// Orthogonal or diagonal line (queen-analog).
    Complex,
    /// Diagonal line (bishop-analog).
    Coordinator,
    /// L-shaped jump (knight-analog).
    Vector,
    /// Orthogonal line (rook-analog).
    Factory,
    /// Forward step, double step from the starting rank (pawn-analog).
    Particle,
}

impl PieceClass {
    /// All classes in catalog order.
    pub const ALL: [PieceClass; 6] = [
        PieceClass::Core,
        PieceClass::Complex,
        PieceClass::Coordinator,
        PieceClass::Vector,
        PieceClass::Factory,
        PieceClass::Particle,
    ];

    /// Chess letter used in piece codes (uppercase).
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            PieceClass::Core => 'K',
            PieceClass::Complex => 'Q',
            PieceClass::Coordinator => 'B',
            PieceClass::Vector => 'N',
            PieceClass::Factory => 'R',
            PieceClass::Particle => 'P',
        }
    }

    /// Class for a chess letter, either case.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'K' => Some(PieceClass::Core),
            'Q' => Some(PieceClass::Complex),
            'B' => Some(PieceClass::Coordinator),
            'N' => Some(PieceClass::Vector),
            'R' => Some(PieceClass::Factory),
            'P' => Some(PieceClass::Particle),
            _ => None,
        }
    }

    /// Whether the class moves along lines of any length.
    #[must_use]
    pub const fn is_slider(self) -> bool {
        matches!(
            self,
            PieceClass::Complex | PieceClass::Coordinator | PieceClass::Factory
        )
    }

    /// Display name of the class for a faction.
    #[must_use]
    pub const fn display_name(self, faction: Faction) -> &'static str {
        match (faction, self) {
            (Faction::Defender, PieceClass::Core) => "helper T-cell",
            (Faction::Defender, PieceClass::Complex) => "MHC complex",
            (Faction::Defender, PieceClass::Coordinator) => "dendritic cell",
            (Faction::Defender, PieceClass::Vector) => "marker protein",
            (Faction::Defender, PieceClass::Factory) => "bone marrow",
            (Faction::Defender, PieceClass::Particle) => "basic cell",
            (Faction::Pathogen, PieceClass::Core) => "viral genome",
            (Faction::Pathogen, PieceClass::Complex) => "envelope complex",
            (Faction::Pathogen, PieceClass::Coordinator) => "fusion protein",
            (Faction::Pathogen, PieceClass::Vector) => "reverse transcriptase",
            (Faction::Pathogen, PieceClass::Factory) => "replication factory",
            (Faction::Pathogen, PieceClass::Particle) => "virion",
        }
    }
}

impl fmt::Display for PieceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceClass::Core => "core",
            PieceClass::Complex => "complex",
            PieceClass::Coordinator => "coordinator",
            PieceClass::Vector => "vector",
            PieceClass::Factory => "factory",
            PieceClass::Particle => "particle",
        };
        f.write_str(name)
    }
}

/// Special ability a piece may activate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    /// Hide the actor from the opponent.
    Conceal,
    /// Give the actor vector movement until its faction's next move.
    Mutate,
    /// Mark an opposing piece as visible regardless of concealment.
    Tag,
    /// Strip concealment from every piece near the actor.
    Reveal,
    /// Create a particle on an empty adjacent square.
    Replicate,
}

/// What an ability's square selection refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Targeting {
    /// The ability acts on the actor itself; no target square.
    Actor,
    /// The target must hold an opposing piece.
    OpposingPiece,
    /// The target must be an empty square next to the actor.
    AdjacentEmpty,
}

impl Ability {
    /// All abilities in catalog order.
    pub const ALL: [Ability; 5] = [
        Ability::Conceal,
        Ability::Mutate,
        Ability::Tag,
        Ability::Reveal,
        Ability::Replicate,
    ];

    /// Energy debited on activation.
    #[must_use]
    pub const fn cost(self) -> u32 {
        match self {
            Ability::Conceal => 3,
            Ability::Mutate => 5,
            Ability::Tag => 2,
            Ability::Reveal => 4,
            Ability::Replicate => 6,
        }
    }

    /// How the ability picks its target.
    #[must_use]
    pub const fn targeting(self) -> Targeting {
        match self {
            Ability::Conceal | Ability::Mutate | Ability::Reveal => Targeting::Actor,
            Ability::Tag => Targeting::OpposingPiece,
            Ability::Replicate => Targeting::AdjacentEmpty,
        }
    }

    /// Whether the ability needs a target square besides the actor.
    #[must_use]
    pub const fn needs_target(self) -> bool {
        !matches!(self.targeting(), Targeting::Actor)
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Ability::Conceal => "conceal",
            Ability::Mutate => "mutate",
            Ability::Tag => "tag",
            Ability::Reveal => "reveal",
            Ability::Replicate => "replicate",
        };
        f.write_str(name)
    }
}

impl FromStr for Ability {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "conceal" | "stealth" => Ok(Ability::Conceal),
            "mutate" | "pattern" => Ok(Ability::Mutate),
            "tag" | "marker" => Ok(Ability::Tag),
            "reveal" | "detect" => Ok(Ability::Reveal),
            "replicate" | "spawn" => Ok(Ability::Replicate),
            _ => Err(GameError::UnknownAbility(s.to_string())),
        }
    }
}

/// Abilities a piece of the given faction and class may invoke.
#[must_use]
pub const fn abilities_of(faction: Faction, class: PieceClass) -> &'static [Ability] {
    match (faction, class) {
        (Faction::Defender, PieceClass::Core | PieceClass::Coordinator) => &[Ability::Reveal],
        (Faction::Defender, PieceClass::Complex) => &[Ability::Reveal, Ability::Tag],
        (Faction::Defender, PieceClass::Vector) => &[Ability::Tag],
        (_, PieceClass::Factory) => &[Ability::Replicate],
        (Faction::Defender, PieceClass::Particle) => &[],
        (
            Faction::Pathogen,
            PieceClass::Core | PieceClass::Coordinator | PieceClass::Particle,
        ) => &[Ability::Conceal],
        (Faction::Pathogen, PieceClass::Complex) => &[Ability::Mutate, Ability::Conceal],
        (Faction::Pathogen, PieceClass::Vector) => &[Ability::Mutate],
    }
}

/// Whether a piece of the given faction and class may invoke `ability`.
#[must_use]
pub fn can_use(faction: Faction, class: PieceClass, ability: Ability) -> bool {
    abilities_of(faction, class).contains(&ability)
}
