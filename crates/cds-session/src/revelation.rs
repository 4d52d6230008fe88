//! World-level revelations unlocked by understanding points.
//!
//! A revelation is unlocked once, by the first character whose understanding
//! reaches its threshold, and stays unlocked for everyone.

use cds_mechanics::{CharacterId, CharacterState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Threshold used when none is given.
pub const DEFAULT_REQUIRED_POINTS: u32 = 5;

/// A secret the game master has prepared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revelation {
    /// Unique identifier.
    pub id: Uuid,
    /// Short title.
    pub title: String,
    /// What is revealed.
    pub content: String,
    /// Understanding points needed to unlock.
    pub required_points: u32,
    /// Free-form grouping, "mystery" by default.
    pub category: String,
    /// Who unlocked it, if anyone has.
    pub unlocked_by: Option<CharacterId>,
    /// When it was unlocked.
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl Revelation {
    /// Returns true once someone has unlocked it.
    pub fn is_unlocked(&self) -> bool {
        self.unlocked_by.is_some()
    }
}

/// Registry of every revelation in the game.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Revelations {
    entries: Vec<Revelation>,
}

impl Revelations {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a locked revelation in the "mystery" category.
    pub fn add(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
        required_points: u32,
    ) -> Uuid {
        self.add_in_category(title, content, required_points, "mystery")
    }

    /// Add a locked revelation in a category.
    pub fn add_in_category(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
        required_points: u32,
        category: impl Into<String>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.entries.push(Revelation {
            id,
            title: title.into(),
            content: content.into(),
            required_points,
            category: category.into(),
            unlocked_by: None,
            unlocked_at: None,
        });
        id
    }

    /// Unlock every locked revelation the character's understanding meets.
    ///
    /// Returns the newly unlocked revelations in registry order.
    pub fn unlock_for(&mut self, character: &CharacterState) -> Vec<Revelation> {
        let points = character.understanding_points.value;
        let mut unlocked = Vec::new();
        for revelation in &mut self.entries {
            if revelation.is_unlocked() || points < revelation.required_points {
                continue;
            }
            revelation.unlocked_by = Some(character.id);
            revelation.unlocked_at = Some(Utc::now());
            info!(
                character = %character.id,
                title = %revelation.title,
                required = revelation.required_points,
                "revelation unlocked"
            );
            unlocked.push(revelation.clone());
        }
        unlocked
    }

    /// Get a revelation by id.
    pub fn get(&self, id: Uuid) -> Option<&Revelation> {
        self.entries.iter().find(|r| r.id == id)
    }

    /// Revelations still locked.
    pub fn locked(&self) -> Vec<&Revelation> {
        self.entries.iter().filter(|r| !r.is_unlocked()).collect()
    }

    /// Revelations already unlocked.
    pub fn unlocked(&self) -> Vec<&Revelation> {
        self.entries.iter().filter(|r| r.is_unlocked()).collect()
    }

    /// All revelations.
    pub fn all(&self) -> &[Revelation] {
        &self.entries
    }
}
