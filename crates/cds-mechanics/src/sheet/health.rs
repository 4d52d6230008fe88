//! Health and cascading wound conditions.

use serde::{Deserialize, Serialize};

use super::pool::Pool;

/// Wound severity, least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WoundLevel {
    /// At or below 90% health.
    Bruised,
    /// At or below 75% health.
    Hurt,
    /// At or below 50% health.
    Wounded,
    /// At or below 25% health.
    GravelyWounded,
    /// At or below 10% health.
    Crippled,
    /// No health left.
    Incapacitated,
}

impl std::fmt::Display for WoundLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bruised => write!(f, "Bruised"),
            Self::Hurt => write!(f, "Hurt"),
            Self::Wounded => write!(f, "Wounded"),
            Self::GravelyWounded => write!(f, "Gravely Wounded"),
            Self::Crippled => write!(f, "Crippled"),
            Self::Incapacitated => write!(f, "Incapacitated"),
        }
    }
}

/// The six wound flags shown on the sheet.
///
/// Flags cascade: a character at 20% health is bruised, hurt, wounded and
/// gravely wounded at once. Only the most severe one carries a penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WoundConditions {
    /// At or below 90% health.
    pub bruised: bool,
    /// At or below 75% health.
    pub hurt: bool,
    /// At or below 50% health.
    pub wounded: bool,
    /// At or below 25% health.
    pub gravely_wounded: bool,
    /// At or below 10% health.
    pub crippled: bool,
    /// No health left.
    pub incapacitated: bool,
}

impl WoundConditions {
    /// Derive the flags from current and maximum health.
    pub fn from_health(value: u32, max: u32) -> Self {
        let (value, max) = (u64::from(value), u64::from(max));
        let at_or_below = |percent: u64| value * 100 <= max * percent;
        Self {
            bruised: at_or_below(90),
            hurt: at_or_below(75),
            wounded: at_or_below(50),
            gravely_wounded: at_or_below(25),
            crippled: at_or_below(10),
            incapacitated: value == 0,
        }
    }

    /// The most severe flag that is set, checked from most to least severe.
    pub fn most_severe(&self) -> Option<WoundLevel> {
        [
            (self.incapacitated, WoundLevel::Incapacitated),
            (self.crippled, WoundLevel::Crippled),
            (self.gravely_wounded, WoundLevel::GravelyWounded),
            (self.wounded, WoundLevel::Wounded),
            (self.hurt, WoundLevel::Hurt),
            (self.bruised, WoundLevel::Bruised),
        ]
        .into_iter()
        .find_map(|(set, level)| set.then_some(level))
    }
}

/// Health pool plus its wound conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Health {
    /// Current and maximum health.
    #[serde(flatten)]
    pub pool: Pool,
    /// Wound flags, normally derived from the pool.
    #[serde(default)]
    pub conditions: WoundConditions,
}

impl Health {
    /// Full health with no wounds.
    pub fn new(max: u32) -> Self {
        Self {
            pool: Pool::new(max),
            conditions: WoundConditions::default(),
        }
    }

    /// Recompute the wound flags from the pool.
    pub fn refresh_conditions(&mut self) {
        self.conditions = WoundConditions::from_health(self.pool.value, self.pool.max);
    }
}

impl std::fmt::Display for Health {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.conditions.most_severe() {
            Some(level) => write!(f, "{} ({level})", self.pool),
            None => write!(f, "{}", self.pool),
        }
    }
}
