//! Error types for a play session.

use cds_mechanics::{CharacterId, RuleError};
use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur during a play session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No character with this id is on the roster.
    #[error("character not found: {0}")]
    CharacterNotFound(CharacterId),

    /// A command needs a selected character and none is selected.
    #[error("no character selected")]
    NoSelection,

    /// No encounter is running.
    #[error("no active encounter")]
    NoEncounter,

    /// Invalid choice or input.
    #[error("invalid choice: {0}")]
    InvalidChoice(String),

    /// Unknown command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Rules engine error.
    #[error("{0}")]
    Rules(#[from] RuleError),
}
