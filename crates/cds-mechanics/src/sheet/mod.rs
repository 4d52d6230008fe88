//! Character state: the Balance Eternal, pools, health, skills and items.
//!
//! A [`CharacterState`] is the snapshot the host owns and hands to the
//! engine. Every rule operation mutates it in place; persistence belongs
//! to the host.

pub mod balance;
pub mod health;
pub mod pool;
pub mod skill;

pub use health::{Health, WoundConditions, WoundLevel};
pub use pool::{Pool, PoolKind};
pub use skill::Skill;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::config::RulesConfig;
use crate::error::{RuleError, RuleResult};
use crate::item::{Item, ItemId};
use crate::tables::{self, HuntRequirement};

/// Humanity and bestiality always add up to this.
pub const BALANCE_TOTAL: u32 = 12;

/// Unique identifier for a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CharacterId(pub Uuid);

impl CharacterId {
    /// Generate a new random character id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two supernatural lineages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lineage {
    /// Vampiric lineage.
    Upior,
    /// Lupine lineage.
    Wilkolaki,
}

impl std::fmt::Display for Lineage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upior => write!(f, "Upiór"),
            Self::Wilkolaki => write!(f, "Wilkołaki"),
        }
    }
}

/// Penalties currently applied to every roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Penalties {
    /// From the mortality table.
    pub mortality: i32,
    /// From the most severe wound condition.
    pub wounds: i32,
    /// Sum of the two.
    pub total: i32,
}

/// A player character's mechanical state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterState {
    /// Unique identifier.
    pub id: CharacterId,
    /// Display name.
    pub name: String,
    /// Supernatural lineage.
    pub lineage: Lineage,
    /// 0 to 12. Always `12 - bestiality`.
    pub humanity: u32,
    /// 0 to 12. The source of truth for the Balance Eternal.
    pub bestiality: u32,
    /// Grows through violence and powers; lowered by hunting.
    pub mortality: u32,
    /// Sacred and Umbral dice. Maximum is `bestiality + 1`.
    pub dice_reserve: Pool,
    /// Points earned through investigation.
    pub understanding_points: Pool,
    /// Hit points and wound conditions.
    pub health: Health,
    /// Trained skills. Missing skills are untrained.
    #[serde(default)]
    pub skills: BTreeMap<Skill, u32>,
    /// Owned items in insertion order.
    #[serde(default)]
    pub items: Vec<Item>,
}

impl CharacterState {
    /// A fresh character standing at the middle of the balance.
    pub fn new(name: impl Into<String>, lineage: Lineage) -> Self {
        let mut state = Self {
            id: CharacterId::new(),
            name: name.into(),
            lineage,
            humanity: 6,
            bestiality: 6,
            mortality: 0,
            dice_reserve: Pool::new(7),
            understanding_points: Pool::new(0),
            health: Health::new(10),
            skills: BTreeMap::new(),
            items: Vec::new(),
        };
        state.prepare_derived();
        state
    }

    /// Set bestiality, cascading to humanity and the reserve maximum.
    pub fn with_bestiality(mut self, bestiality: u32) -> Self {
        self.set_bestiality(bestiality, "initial bestiality");
        self
    }

    /// Set a skill value and refresh derived maxima.
    pub fn with_skill(mut self, skill: Skill, value: u32) -> Self {
        self.skills.insert(skill, value);
        self.recompute_understanding_max();
        self
    }

    /// Replace the health pool with a full one of the given size.
    pub fn with_health(mut self, max: u32) -> Self {
        self.health = Health::new(max);
        self
    }

    /// Set mortality.
    pub fn with_mortality(mut self, mortality: u32) -> Self {
        self.mortality = mortality;
        self
    }

    /// Add an item.
    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// A skill's value, 0 if untrained.
    pub fn skill(&self, skill: Skill) -> u32 {
        self.skills.get(&skill).copied().unwrap_or(0)
    }

    /// Look a skill up by name. Unknown names are an error, not zero.
    pub fn skill_by_name(&self, name: &str) -> RuleResult<u32> {
        let skill: Skill = name.parse()?;
        Ok(self.skill(skill))
    }

    /// Find an owned item.
    pub fn item(&self, id: ItemId) -> RuleResult<&Item> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .ok_or(RuleError::ItemNotFound(id))
    }

    /// Mortality and wound penalties under the given rules.
    pub fn penalties(&self, config: &RulesConfig) -> Penalties {
        let mortality = if config.auto_mortality_penalty {
            tables::mortality_penalty(self.mortality)
        } else {
            0
        };
        let wounds = tables::wound_penalty(&self.health.conditions);
        Penalties {
            mortality,
            wounds,
            total: mortality + wounds,
        }
    }

    /// How often this character must hunt.
    pub fn hunt_requirement(&self) -> HuntRequirement {
        tables::hunt_frequency(self.mortality)
    }

    /// Resolve a roll-data key such as `humanity` or `skill.occultism`.
    pub fn derived_value(&self, key: &str) -> RuleResult<i32> {
        let value = match key {
            "humanity" => self.humanity,
            "bestiality" => self.bestiality,
            "mortality" => self.mortality,
            "dice_reserve" => self.dice_reserve.value,
            "dice_reserve.max" => self.dice_reserve.max,
            "understanding_points" => self.understanding_points.value,
            "understanding_points.max" => self.understanding_points.max,
            "health" => self.health.pool.value,
            "health.max" => self.health.pool.max,
            "penalty.mortality" => return Ok(self.penalties(&RulesConfig::default()).mortality),
            "penalty.wounds" => return Ok(self.penalties(&RulesConfig::default()).wounds),
            "penalty.total" => return Ok(self.penalties(&RulesConfig::default()).total),
            other => match other.strip_prefix("skill.") {
                Some(name) => self.skill_by_name(name)?,
                None => return Err(RuleError::UnknownLookupKey(key.to_string())),
            },
        };
        Ok(to_i32(value))
    }

    /// Recompute every derived value and clamp pools into range.
    pub fn prepare_derived(&mut self) {
        self.enforce_balance();
        self.sync_reserve_max();
        self.recompute_understanding_max();
        self.health.pool.clamp();
        debug!(
            character = %self.id,
            humanity = self.humanity,
            bestiality = self.bestiality,
            reserve = %self.dice_reserve,
            understanding = %self.understanding_points,
            "derived values prepared"
        );
    }

    /// Understanding maximum is investigation plus occultism.
    pub fn recompute_understanding_max(&mut self) {
        let max = self
            .skill(Skill::Investigation)
            .saturating_add(self.skill(Skill::Occultism));
        self.understanding_points.set_max(max);
    }
}

/// Saturating conversion for values shown in roll data.
pub(crate) fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::HuntFrequency;

    #[test]
    fn new_character_is_balanced() {
        let c = CharacterState::new("Mira", Lineage::Upior);
        assert_eq!(c.humanity + c.bestiality, BALANCE_TOTAL);
        assert_eq!(c.dice_reserve.max, c.bestiality + 1);
        assert_eq!(c.dice_reserve.value, 7);
        assert_eq!(c.understanding_points, Pool::new(0));
    }

    #[test]
    fn untrained_skill_is_zero_unknown_is_error() {
        let c = CharacterState::new("Mira", Lineage::Upior).with_skill(Skill::Stealth, 3);
        assert_eq!(c.skill(Skill::Stealth), 3);
        assert_eq!(c.skill(Skill::Brawl), 0);
        assert_eq!(c.skill_by_name("stealth").unwrap(), 3);
        assert!(matches!(
            c.skill_by_name("flying"),
            Err(RuleError::UnknownSkill(_))
        ));
    }

    #[test]
    fn understanding_max_follows_skills() {
        let c = CharacterState::new("Mira", Lineage::Upior)
            .with_skill(Skill::Investigation, 3)
            .with_skill(Skill::Occultism, 2);
        assert_eq!(c.understanding_points.max, 5);
    }

    #[test]
    fn understanding_value_clamps_when_max_drops() {
        let mut c = CharacterState::new("Mira", Lineage::Upior).with_skill(Skill::Occultism, 4);
        c.understanding_points.value = 4;
        c.skills.insert(Skill::Occultism, 1);
        c.prepare_derived();
        assert_eq!(c.understanding_points, Pool::with_value(1, 1));
    }

    #[test]
    fn penalties_respect_config() {
        let mut c = CharacterState::new("Mira", Lineage::Upior).with_mortality(7);
        c.health.pool.value = 5;
        c.health.refresh_conditions();

        let full = c.penalties(&RulesConfig::default());
        assert_eq!(full, Penalties { mortality: -2, wounds: -3, total: -5 });

        let no_mortality = c.penalties(&RulesConfig::default().with_auto_mortality_penalty(false));
        assert_eq!(no_mortality.total, -3);
    }

    #[test]
    fn hunt_requirement_from_mortality() {
        let c = CharacterState::new("Mira", Lineage::Wilkolaki).with_mortality(13);
        let hunt = c.hunt_requirement();
        assert!(hunt.required);
        assert_eq!(hunt.frequency, HuntFrequency::Constant);
        assert_eq!(hunt.penalty, -3);
    }

    #[test]
    fn derived_values() {
        let c = CharacterState::new("Mira", Lineage::Upior)
            .with_bestiality(4)
            .with_mortality(5)
            .with_skill(Skill::Occultism, 2);
        assert_eq!(c.derived_value("humanity").unwrap(), 8);
        assert_eq!(c.derived_value("bestiality").unwrap(), 4);
        assert_eq!(c.derived_value("dice_reserve.max").unwrap(), 5);
        assert_eq!(c.derived_value("penalty.mortality").unwrap(), -1);
        assert_eq!(c.derived_value("penalty.total").unwrap(), -1);
        assert_eq!(c.derived_value("skill.occultism").unwrap(), 2);
        assert_eq!(c.derived_value("skill.brawl").unwrap(), 0);
    }

    #[test]
    fn derived_value_rejects_unknown_keys() {
        let c = CharacterState::new("Mira", Lineage::Upior);
        assert!(matches!(
            c.derived_value("charisma"),
            Err(RuleError::UnknownLookupKey(ref k)) if k == "charisma"
        ));
        assert!(matches!(
            c.derived_value("skill.flying"),
            Err(RuleError::UnknownSkill(_))
        ));
    }

    #[test]
    fn snapshot_loads_with_missing_collections() {
        let json = r#"{
            "id": "6f1c1c9e-4a4b-4c1e-9a57-1b0d9c2f7e11",
            "name": "Mira",
            "lineage": "wilkolaki",
            "humanity": 5,
            "bestiality": 7,
            "mortality": 2,
            "dice_reserve": { "value": 3, "max": 8 },
            "understanding_points": { "value": 0, "max": 0 },
            "health": { "value": 10, "max": 10 }
        }"#;
        let c: CharacterState = serde_json::from_str(json).unwrap();
        assert_eq!(c.lineage, Lineage::Wilkolaki);
        assert!(c.skills.is_empty());
        assert!(c.items.is_empty());
        assert_eq!(c.health.conditions, WoundConditions::default());
    }

    #[test]
    fn lineage_display() {
        assert_eq!(Lineage::Upior.to_string(), "Upiór");
        assert_eq!(Lineage::Wilkolaki.to_string(), "Wilkołaki");
    }
}
