//! Items a character can own: advantages, weapons, armor, gear and powers.

pub mod advantage;

pub use advantage::{
    Bonus, BonusKind, EffectTag, LONG_FIGHT_ROUNDS, absorption_bonus, regeneration_bonus,
    skill_bonus,
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::power::PowerCost;
use crate::sheet::{CharacterState, Lineage};

/// Unique identifier for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub Uuid);

impl ItemId {
    /// Generate a new random item id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which lineages may benefit from an advantage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineageAffinity {
    /// Upiór only.
    Upior,
    /// Wilkołaki only.
    Wilkolaki,
    /// Either lineage.
    #[default]
    Both,
}

impl LineageAffinity {
    /// Returns true if a character of `lineage` may use it.
    pub fn admits(self, lineage: Lineage) -> bool {
        matches!(
            (self, lineage),
            (Self::Both, _) | (Self::Upior, Lineage::Upior) | (Self::Wilkolaki, Lineage::Wilkolaki)
        )
    }
}

impl std::fmt::Display for LineageAffinity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upior => write!(f, "{}", Lineage::Upior),
            Self::Wilkolaki => write!(f, "{}", Lineage::Wilkolaki),
            Self::Both => write!(f, "both lineages"),
        }
    }
}

/// Weapon reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Range {
    /// Arm's length.
    #[default]
    Short,
    /// Across a room.
    Medium,
    /// Across a street.
    Long,
}

/// Which skill an attack with a weapon uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponKind {
    /// Blades and clubs; rolls melee weapons.
    #[default]
    Melee,
    /// Guns; rolls firearms.
    Firearm,
}

/// Kind-specific item data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemKind {
    /// A passive trait that grants bonuses.
    Advantage {
        /// Lineages allowed to benefit.
        #[serde(default)]
        lineage: LineageAffinity,
        /// Generic bonus, used when the effect tag has no rule of its own.
        #[serde(default)]
        bonus: Bonus,
        /// Built-in rule this advantage triggers.
        #[serde(default)]
        effect: EffectTag,
        /// Inactive advantages grant nothing.
        #[serde(default = "default_true")]
        active: bool,
    },
    /// Something to hit people with.
    Weapon {
        /// Damage added on a hit.
        #[serde(default)]
        damage: u32,
        /// Reach.
        #[serde(default)]
        range: Range,
        /// Melee or firearm.
        #[serde(default)]
        kind: WeaponKind,
        /// Free-text special rules.
        #[serde(default)]
        special: String,
    },
    /// Protection that absorbs damage.
    Armor {
        /// Damage absorbed per hit.
        #[serde(default)]
        absorption: u32,
        /// Penalty to physical actions while worn.
        #[serde(default)]
        penalty: u32,
        /// Only equipped armor absorbs.
        #[serde(default = "default_true")]
        equipped: bool,
    },
    /// Mundane equipment.
    Gear {
        /// Count carried, at least one.
        #[serde(default = "default_quantity")]
        quantity: u32,
        /// Weight per unit.
        #[serde(default)]
        weight: f64,
        /// Price per unit.
        #[serde(default)]
        price: f64,
    },
    /// A lineage power with an activation cost.
    Power {
        /// Lineage that can use it.
        lineage: Lineage,
        /// Cost paid on activation.
        #[serde(default)]
        cost: PowerCost,
        /// What the power does.
        #[serde(default)]
        effect: String,
        /// How long it lasts.
        #[serde(default)]
        duration: String,
        /// How far it reaches.
        #[serde(default)]
        range: String,
    },
}

fn default_true() -> bool {
    true
}

fn default_quantity() -> u32 {
    1
}

/// An owned item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Kind-specific data.
    pub kind: ItemKind,
}

impl Item {
    /// Create an item of the given kind.
    pub fn new(name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            description: String::new(),
            kind,
        }
    }

    /// An active advantage.
    pub fn advantage(
        name: impl Into<String>,
        lineage: LineageAffinity,
        effect: EffectTag,
        bonus: Bonus,
    ) -> Self {
        Self::new(
            name,
            ItemKind::Advantage {
                lineage,
                bonus,
                effect,
                active: true,
            },
        )
    }

    /// A short-range weapon.
    pub fn weapon(name: impl Into<String>, damage: u32, kind: WeaponKind) -> Self {
        Self::new(
            name,
            ItemKind::Weapon {
                damage,
                range: Range::default(),
                kind,
                special: String::new(),
            },
        )
    }

    /// Equipped armor.
    pub fn armor(name: impl Into<String>, absorption: u32) -> Self {
        Self::new(
            name,
            ItemKind::Armor {
                absorption,
                penalty: 0,
                equipped: true,
            },
        )
    }

    /// Weightless, free gear.
    pub fn gear(name: impl Into<String>, quantity: u32) -> Self {
        let mut item = Self::new(
            name,
            ItemKind::Gear {
                quantity,
                weight: 0.0,
                price: 0.0,
            },
        );
        item.normalize();
        item
    }

    /// A power with the given cost.
    pub fn power(name: impl Into<String>, lineage: Lineage, cost: PowerCost) -> Self {
        Self::new(
            name,
            ItemKind::Power {
                lineage,
                cost,
                effect: String::new(),
                duration: String::new(),
                range: String::new(),
            },
        )
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Pull loaded values back into their legal ranges.
    ///
    /// Gear quantity is at least one; weight and price are never negative.
    pub fn normalize(&mut self) {
        if let ItemKind::Gear {
            quantity,
            weight,
            price,
        } = &mut self.kind
        {
            *quantity = (*quantity).max(1);
            *weight = non_negative(*weight);
            *price = non_negative(*price);
        }
    }

    /// Returns true if a character of `lineage` may use this item.
    ///
    /// Advantages need a matching affinity, powers need the exact lineage.
    pub fn usable_by_lineage(&self, lineage: Lineage) -> bool {
        match &self.kind {
            ItemKind::Advantage { lineage: affinity, .. } => affinity.admits(lineage),
            ItemKind::Power { lineage: owner, .. } => *owner == lineage,
            ItemKind::Weapon { .. } | ItemKind::Armor { .. } | ItemKind::Gear { .. } => true,
        }
    }

    /// Returns true if the character may use this item.
    pub fn usable_by(&self, character: &CharacterState) -> bool {
        self.usable_by_lineage(character.lineage)
    }

    /// Short kind label.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            ItemKind::Advantage { .. } => "advantage",
            ItemKind::Weapon { .. } => "weapon",
            ItemKind::Armor { .. } => "armor",
            ItemKind::Gear { .. } => "gear",
            ItemKind::Power { .. } => "power",
        }
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.max(0.0) }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.kind_name())
    }
}
