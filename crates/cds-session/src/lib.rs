//! Play session over the Contrato de Sangue rules engine.
//!
//! Holds a roster of characters, rolls dice from a seeded generator,
//! journals every roll and resource change, runs combat encounters and
//! unlocks revelations as understanding grows. A text command processor
//! drives it all for the selected character.

pub mod combat;
pub mod config;
pub mod error;
pub mod journal;
pub mod revelation;
pub mod session;

pub use combat::{Encounter, Participant, TurnStart};
pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use journal::{Journal, JournalEntry};
pub use revelation::{Revelation, Revelations};
pub use session::{Session, Strike};
