//! Journal entry types.

use cds_mechanics::{Activation, CheckResult, DamageReport, LedgerEvent, ReserveDieResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single entry in the session journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum JournalEntry {
    /// A check and its result.
    Check {
        /// Who rolled.
        character: String,
        /// The full result.
        result: CheckResult,
        /// When rolled.
        timestamp: DateTime<Utc>,
    },
    /// A Sacred or Umbral die drawn from the reserve.
    ReserveDie {
        /// Who spent the die.
        character: String,
        /// The die, its bonus and the resulting changes.
        result: ReserveDieResult,
        /// When rolled.
        timestamp: DateTime<Utc>,
    },
    /// A resource change not covered by another entry.
    Ledger {
        /// Whose resource moved.
        character: String,
        /// The change.
        event: LedgerEvent,
        /// When recorded.
        timestamp: DateTime<Utc>,
    },
    /// A hit landing on a character.
    Damage {
        /// Who was hit.
        target: String,
        /// What got through the armor.
        report: DamageReport,
        /// When applied.
        timestamp: DateTime<Utc>,
    },
    /// A power activation.
    PowerUsed {
        /// Who activated it.
        character: String,
        /// Power name.
        power: String,
        /// The cost paid.
        activation: Activation,
        /// When activated.
        timestamp: DateTime<Utc>,
    },
    /// A revelation unlocked by a character's understanding.
    Revelation {
        /// Who unlocked it.
        character: String,
        /// Revelation title.
        title: String,
        /// Revelation content.
        content: String,
        /// When unlocked.
        timestamp: DateTime<Utc>,
    },
    /// A free-text note.
    Note {
        /// The note text.
        text: String,
        /// When recorded.
        timestamp: DateTime<Utc>,
    },
}

impl JournalEntry {
    /// When the entry was recorded.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Check { timestamp, .. }
            | Self::ReserveDie { timestamp, .. }
            | Self::Ledger { timestamp, .. }
            | Self::Damage { timestamp, .. }
            | Self::PowerUsed { timestamp, .. }
            | Self::Revelation { timestamp, .. }
            | Self::Note { timestamp, .. } => *timestamp,
        }
    }
}
