//! Dice types and rolling.
//!
//! Checks roll a single d12. The two reserve dice (Sacred and Umbral) roll
//! a d6. Randomness is supplied through the [`Roller`] trait so that a
//! seeded RNG and predetermined faces are interchangeable.

pub mod roll;
pub mod roller;

pub use roll::DieResult;
pub use roller::{FixedRolls, Roller};

use serde::{Deserialize, Serialize};

/// A die type used by the ruleset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Die {
    /// Six-sided die, used by the reserve dice.
    D6,
    /// Twelve-sided die, used by skill, attack, defense and initiative checks.
    D12,
}

impl Die {
    /// Returns the number of sides on this die.
    pub fn sides(self) -> u32 {
        match self {
            Self::D6 => 6,
            Self::D12 => 12,
        }
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::D6 => write!(f, "d6"),
            Self::D12 => write!(f, "d12"),
        }
    }
}

/// What a rolled die was spent on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DiceTag {
    /// A check die.
    #[default]
    Standard,
    /// A reserve die spent through Humanity, with no consequences.
    Sacred,
    /// A reserve die spent through Bestiality, feeding the beast.
    Umbral,
}

impl std::fmt::Display for DiceTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Sacred => write!(f, "sacred"),
            Self::Umbral => write!(f, "umbral"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn die_sides() {
        assert_eq!(Die::D6.sides(), 6);
        assert_eq!(Die::D12.sides(), 12);
    }

    #[test]
    fn die_display() {
        assert_eq!(Die::D6.to_string(), "d6");
        assert_eq!(Die::D12.to_string(), "d12");
    }

    #[test]
    fn dice_tag_display() {
        assert_eq!(DiceTag::Standard.to_string(), "standard");
        assert_eq!(DiceTag::Sacred.to_string(), "sacred");
        assert_eq!(DiceTag::Umbral.to_string(), "umbral");
        assert_eq!(DiceTag::default(), DiceTag::Standard);
    }
}
