//! Single-die results.

use serde::{Deserialize, Serialize};

use super::{DiceTag, Die, Roller};

/// The result of rolling a single die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieResult {
    /// The type of die that was rolled.
    pub die: Die,
    /// What the die was rolled for.
    pub tag: DiceTag,
    /// The value rolled (1 to die.sides()).
    pub value: u32,
}

impl DieResult {
    /// Roll one die through the given roller.
    pub fn roll<R: Roller + ?Sized>(die: Die, tag: DiceTag, roller: &mut R) -> Self {
        Self {
            die,
            tag,
            value: roller.roll(die),
        }
    }

    /// Returns true if the die shows its highest face.
    pub fn is_max(&self) -> bool {
        self.value == self.die.sides()
    }
}

impl std::fmt::Display for DieResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.die, self.value)
    }
}
