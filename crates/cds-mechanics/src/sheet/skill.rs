//! The skill catalogue.

use serde::{Deserialize, Serialize};

use crate::error::RuleError;

/// Every skill a character can train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    /// Strength, climbing, swimming, running.
    Athletics,
    /// Unarmed combat and martial arts.
    Brawl,
    /// Driving and piloting.
    Driving,
    /// Moving unseen, hiding.
    Stealth,
    /// Wilderness, tracking, orientation.
    Survival,
    /// Hacking, programming, digital systems.
    Computers,
    /// Searching for clues, analysing evidence.
    Investigation,
    /// First aid, diagnosis, surgery.
    Medicine,
    /// Supernatural lore and rituals.
    Occultism,
    /// General scientific knowledge.
    Science,
    /// Reading emotions and motives.
    Empathy,
    /// Art, performance, creativity.
    Expression,
    /// Threats, coercion, fear.
    Intimidation,
    /// Convincing, negotiating.
    Persuasion,
    /// Lying, deceiving, manipulating.
    Subterfuge,
    /// Swords, knives and other blades.
    MeleeWeapons,
    /// Pistols, rifles and other guns.
    Firearms,
    /// Dodging, blocking, resisting attacks.
    Defense,
}

impl Skill {
    /// The whole catalogue in sheet order.
    pub const ALL: [Self; 18] = [
        Self::Athletics,
        Self::Brawl,
        Self::Driving,
        Self::Stealth,
        Self::Survival,
        Self::Computers,
        Self::Investigation,
        Self::Medicine,
        Self::Occultism,
        Self::Science,
        Self::Empathy,
        Self::Expression,
        Self::Intimidation,
        Self::Persuasion,
        Self::Subterfuge,
        Self::MeleeWeapons,
        Self::Firearms,
        Self::Defense,
    ];

    /// Mental skills.
    pub const MENTAL: [Self; 5] = [
        Self::Computers,
        Self::Investigation,
        Self::Medicine,
        Self::Occultism,
        Self::Science,
    ];

    /// Social skills.
    pub const SOCIAL: [Self; 5] = [
        Self::Empathy,
        Self::Expression,
        Self::Intimidation,
        Self::Persuasion,
        Self::Subterfuge,
    ];

    /// Stable snake_case key, as used in snapshots and commands.
    pub fn key(self) -> &'static str {
        match self {
            Self::Athletics => "athletics",
            Self::Brawl => "brawl",
            Self::Driving => "driving",
            Self::Stealth => "stealth",
            Self::Survival => "survival",
            Self::Computers => "computers",
            Self::Investigation => "investigation",
            Self::Medicine => "medicine",
            Self::Occultism => "occultism",
            Self::Science => "science",
            Self::Empathy => "empathy",
            Self::Expression => "expression",
            Self::Intimidation => "intimidation",
            Self::Persuasion => "persuasion",
            Self::Subterfuge => "subterfuge",
            Self::MeleeWeapons => "melee_weapons",
            Self::Firearms => "firearms",
            Self::Defense => "defense",
        }
    }

    /// Skills whose successful rolls earn understanding points.
    pub fn is_investigative(self) -> bool {
        matches!(
            self,
            Self::Investigation | Self::Occultism | Self::Computers | Self::Medicine
        )
    }
}

impl std::str::FromStr for Skill {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|skill| skill.key() == normalized)
            .ok_or_else(|| RuleError::UnknownSkill(s.to_string()))
    }
}

impl std::fmt::Display for Skill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
