//! Lookup tables mapping a stat to a penalty or frequency.
//!
//! Thresholds are checked from highest to lowest and the first match wins.
//! There is no interpolation between rows. Every other module reads its
//! penalties from here.

use serde::{Deserialize, Serialize};

use crate::sheet::health::{WoundConditions, WoundLevel};

/// Mortality thresholds, highest first.
const MORTALITY_ROWS: [(u32, i32, HuntFrequency); 4] = [
    (13, -3, HuntFrequency::Constant),
    (10, -3, HuntFrequency::Daily),
    (7, -2, HuntFrequency::TwiceWeekly),
    (4, -1, HuntFrequency::Weekly),
];

/// Penalty applied to every roll for the given mortality.
pub fn mortality_penalty(mortality: u32) -> i32 {
    MORTALITY_ROWS
        .iter()
        .find(|(threshold, _, _)| mortality >= *threshold)
        .map_or(0, |(_, penalty, _)| *penalty)
}

/// Penalty for the single most severe wound condition. Conditions do not stack.
pub fn wound_penalty(conditions: &WoundConditions) -> i32 {
    match conditions.most_severe() {
        Some(WoundLevel::Incapacitated) => -10,
        Some(WoundLevel::Crippled) => -5,
        Some(WoundLevel::GravelyWounded) => -4,
        Some(WoundLevel::Wounded) => -3,
        Some(WoundLevel::Hurt) => -2,
        Some(WoundLevel::Bruised) => -1,
        None => 0,
    }
}

/// How often a character must hunt to keep the beast fed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HuntFrequency {
    /// No hunting required.
    None,
    /// Once a week.
    Weekly,
    /// Twice a week.
    TwiceWeekly,
    /// Every day.
    Daily,
    /// Constantly; the character is losing control.
    Constant,
}

impl std::fmt::Display for HuntFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Weekly => write!(f, "once a week"),
            Self::TwiceWeekly => write!(f, "twice a week"),
            Self::Daily => write!(f, "daily"),
            Self::Constant => write!(f, "constantly"),
        }
    }
}

/// Hunting requirement derived from mortality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HuntRequirement {
    /// Whether the character must hunt at all.
    pub required: bool,
    /// How often.
    pub frequency: HuntFrequency,
    /// The mortality penalty at this level.
    pub penalty: i32,
}

/// Hunting requirement for the given mortality.
pub fn hunt_frequency(mortality: u32) -> HuntRequirement {
    match MORTALITY_ROWS
        .iter()
        .find(|(threshold, _, _)| mortality >= *threshold)
    {
        Some(&(_, penalty, frequency)) => HuntRequirement {
            required: true,
            frequency,
            penalty,
        },
        None => HuntRequirement {
            required: false,
            frequency: HuntFrequency::None,
            penalty: 0,
        },
    }
}

/// Understanding points earned by an investigative roll with this total.
pub fn investigation_award(total: i32) -> u32 {
    match total {
        18.. => 3,
        15..=17 => 2,
        12..=14 => 1,
        _ => 0,
    }
}

/// Standard difficulty ladder offered to players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// 5
    Trivial,
    /// 8
    Easy,
    /// 10
    Medium,
    /// 12
    Hard,
    /// 15
    Extreme,
    /// 18
    Legendary,
}

impl Difficulty {
    /// All difficulties, easiest first.
    pub const ALL: [Self; 6] = [
        Self::Trivial,
        Self::Easy,
        Self::Medium,
        Self::Hard,
        Self::Extreme,
        Self::Legendary,
    ];

    /// Target number for this difficulty.
    pub fn value(self) -> i32 {
        match self {
            Self::Trivial => 5,
            Self::Easy => 8,
            Self::Medium => 10,
            Self::Hard => 12,
            Self::Extreme => 15,
            Self::Legendary => 18,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Trivial => "Trivial",
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Extreme => "Extreme",
            Self::Legendary => "Legendary",
        };
        write!(f, "{name} ({})", self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mortality_penalty_rows() {
        assert_eq!(mortality_penalty(0), 0);
        assert_eq!(mortality_penalty(3), 0);
        assert_eq!(mortality_penalty(4), -1);
        assert_eq!(mortality_penalty(6), -1);
        assert_eq!(mortality_penalty(7), -2);
        assert_eq!(mortality_penalty(9), -2);
        assert_eq!(mortality_penalty(10), -3);
        assert_eq!(mortality_penalty(13), -3);
        assert_eq!(mortality_penalty(200), -3);
    }

    #[test]
    fn hunt_at_thirteen_is_constant() {
        assert_eq!(
            hunt_frequency(13),
            HuntRequirement {
                required: true,
                frequency: HuntFrequency::Constant,
                penalty: -3,
            }
        );
        assert_eq!(mortality_penalty(13), -3);
    }

    #[test]
    fn hunt_rows() {
        assert_eq!(hunt_frequency(10).frequency, HuntFrequency::Daily);
        assert_eq!(hunt_frequency(12).frequency, HuntFrequency::Daily);
        assert_eq!(hunt_frequency(7).frequency, HuntFrequency::TwiceWeekly);
        assert_eq!(hunt_frequency(4).frequency, HuntFrequency::Weekly);
        assert_eq!(hunt_frequency(4).penalty, -1);
    }

    #[test]
    fn low_mortality_needs_no_hunt() {
        let req = hunt_frequency(3);
        assert!(!req.required);
        assert_eq!(req.frequency, HuntFrequency::None);
        assert_eq!(req.penalty, 0);
    }

    #[test]
    fn hunt_penalty_matches_mortality_penalty() {
        for m in 0..20 {
            assert_eq!(hunt_frequency(m).penalty, mortality_penalty(m));
        }
    }

    #[test]
    fn wound_penalty_takes_most_severe_only() {
        let conditions = WoundConditions {
            bruised: true,
            hurt: true,
            wounded: true,
            gravely_wounded: true,
            crippled: false,
            incapacitated: false,
        };
        assert_eq!(wound_penalty(&conditions), -4);
        assert_eq!(wound_penalty(&WoundConditions::default()), 0);
    }

    #[test]
    fn wound_penalty_each_level() {
        let mut c = WoundConditions {
            bruised: true,
            ..WoundConditions::default()
        };
        assert_eq!(wound_penalty(&c), -1);
        c.hurt = true;
        assert_eq!(wound_penalty(&c), -2);
        c.wounded = true;
        assert_eq!(wound_penalty(&c), -3);
        c.crippled = true;
        assert_eq!(wound_penalty(&c), -5);
        c.incapacitated = true;
        assert_eq!(wound_penalty(&c), -10);
    }

    #[test]
    fn investigation_award_rows() {
        assert_eq!(investigation_award(-3), 0);
        assert_eq!(investigation_award(11), 0);
        assert_eq!(investigation_award(12), 1);
        assert_eq!(investigation_award(14), 1);
        assert_eq!(investigation_award(15), 2);
        assert_eq!(investigation_award(17), 2);
        assert_eq!(investigation_award(18), 3);
        assert_eq!(investigation_award(30), 3);
    }

    #[test]
    fn difficulty_ladder() {
        let values: Vec<i32> = Difficulty::ALL.iter().map(|d| d.value()).collect();
        assert_eq!(values, vec![5, 8, 10, 12, 15, 18]);
        assert_eq!(Difficulty::Hard.to_string(), "Hard (12)");
    }
}
