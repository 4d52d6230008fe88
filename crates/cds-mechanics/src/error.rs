//! Error types for the rules engine.

use crate::item::ItemId;
use crate::power::Shortfall;
use crate::sheet::{Lineage, PoolKind};

/// Errors that can occur during rule operations.
///
/// None of these are fatal. Every operation that returns one leaves the
/// character state exactly as it was.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// A spend exceeds the value available in a pool.
    #[error("insufficient {pool}: need {required}, have {available}")]
    InsufficientResource {
        /// The pool that could not cover the spend.
        pool: PoolKind,
        /// Amount requested.
        required: u32,
        /// Amount available.
        available: u32,
    },

    /// A power's cost exceeds one or more pools.
    #[error("cannot activate: {}", join_shortfalls(.0))]
    CannotActivate(Vec<Shortfall>),

    /// A skill name is not part of the skill catalogue.
    #[error("unknown skill: {0}")]
    UnknownSkill(String),

    /// A derived-value key is not recognised.
    #[error("unknown lookup key: {0}")]
    UnknownLookupKey(String),

    /// No item with this id belongs to the character.
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    /// The item exists but is not a power.
    #[error("'{0}' is not a power")]
    NotAPower(String),

    /// The item exists but is not a weapon.
    #[error("'{0}' is not a weapon")]
    NotAWeapon(String),

    /// A power was used by a character of the other lineage.
    #[error("'{item}' is a {required} power, character is {actual}")]
    LineageMismatch {
        /// Name of the power.
        item: String,
        /// Lineage the power belongs to.
        required: Lineage,
        /// Lineage of the character attempting to use it.
        actual: Lineage,
    },

    /// The rules configuration could not be parsed.
    #[error("invalid rules config: {0}")]
    InvalidConfig(String),
}

fn join_shortfalls(shortfalls: &[Shortfall]) -> String {
    shortfalls
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Convenience result type for rule operations.
pub type RuleResult<T> = Result<T, RuleError>;
