//! Dice roll resolution.
//!
//! Every check is `1d12 + skill + modifiers` compared against a
//! difficulty. The gap between total and difficulty picks one of four
//! outcome bands. Reserve dice (Sacred and Umbral) are rolled separately
//! and add a bonus on top.

pub mod check;
pub mod reserve;

pub use check::{
    CheckKind, CheckRequest, CheckResult, Formula, Modifier, ModifierSource, build_formula,
    perform_check,
};
pub use reserve::{ReserveDie, ReserveDieResult, roll_reserve_die, sacred_die, umbral_die};

use serde::{Deserialize, Serialize};

/// Totals at least this far above the difficulty are critical.
pub const CRITICAL_MARGIN: i32 = 5;

/// Totals more than this far below the difficulty fail critically.
pub const PARTIAL_SHORTFALL: i32 = 4;

/// The outcome band of a check against a difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Beat the difficulty by five or more.
    CriticalSuccess {
        /// How far above the difficulty the total was.
        margin: u32,
    },
    /// Met or beat the difficulty.
    Success {
        /// How far above the difficulty the total was.
        margin: u32,
    },
    /// Missed by up to four.
    PartialFailure {
        /// How far below the difficulty the total was.
        shortfall: u32,
    },
    /// Missed by five or more.
    CriticalFailure {
        /// How far below the difficulty the total was.
        shortfall: u32,
    },
}

impl Outcome {
    /// Returns true for either success band.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::CriticalSuccess { .. } | Self::Success { .. })
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CriticalSuccess { margin } => write!(f, "Critical Success (margin {margin})"),
            Self::Success { margin } => write!(f, "Success (margin {margin})"),
            Self::PartialFailure { shortfall } => {
                write!(f, "Partial Failure (short by {shortfall})")
            }
            Self::CriticalFailure { shortfall } => {
                write!(f, "Critical Failure (short by {shortfall})")
            }
        }
    }
}

/// Classify a total against a difficulty. No difficulty means no outcome.
pub fn classify(total: i32, difficulty: Option<i32>) -> Option<Outcome> {
    let difference = total.saturating_sub(difficulty?);
    let margin = difference.unsigned_abs();
    Some(if difference >= CRITICAL_MARGIN {
        Outcome::CriticalSuccess { margin }
    } else if difference >= 0 {
        Outcome::Success { margin }
    } else if difference >= -PARTIAL_SHORTFALL {
        Outcome::PartialFailure { shortfall: margin }
    } else {
        Outcome::CriticalFailure { shortfall: margin }
    })
}
