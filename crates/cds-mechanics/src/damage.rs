//! Damage types, armor absorption and hits.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RulesConfig;
use crate::item::{ItemKind, absorption_bonus};
use crate::ledger::LedgerEvent;
use crate::sheet::CharacterState;

/// Lethal hits dealing at least this much count as violent.
pub const VIOLENCE_THRESHOLD: u32 = 3;

/// How a hit hurts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    /// Fists and clubs.
    Bashing,
    /// Blades and bullets.
    #[default]
    Lethal,
    /// Fire, sunlight, silver. Armor absorbs half.
    Aggravated,
}

impl std::str::FromStr for DamageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bashing" => Ok(Self::Bashing),
            "lethal" => Ok(Self::Lethal),
            "aggravated" => Ok(Self::Aggravated),
            other => Err(format!("unknown damage type: {other}")),
        }
    }
}

impl std::fmt::Display for DamageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bashing => write!(f, "bashing"),
            Self::Lethal => write!(f, "lethal"),
            Self::Aggravated => write!(f, "aggravated"),
        }
    }
}

/// What happened when a hit landed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageReport {
    /// Damage before armor.
    pub raw: u32,
    /// Damage absorbed.
    pub absorbed: u32,
    /// Damage that reached health.
    pub applied: u32,
    /// Damage type.
    pub damage_type: DamageType,
    /// The health change, if any damage got through.
    pub event: Option<LedgerEvent>,
    /// Whether the attacker should gain mortality for the violence.
    pub violent: bool,
}

impl std::fmt::Display for DamageReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} damage", self.applied, self.damage_type)?;
        if self.absorbed > 0 {
            write!(f, " ({} absorbed)", self.absorbed)?;
        }
        Ok(())
    }
}

/// Total absorption from equipped armor and advantages.
pub fn absorption(state: &CharacterState, damage_type: DamageType) -> u32 {
    let armor: u32 = state
        .items
        .iter()
        .filter_map(|item| match item.kind {
            ItemKind::Armor {
                absorption,
                equipped: true,
                ..
            } => Some(match damage_type {
                DamageType::Aggravated => absorption / 2,
                DamageType::Bashing | DamageType::Lethal => absorption,
            }),
            _ => None,
        })
        .sum();
    armor + absorption_bonus(&state.items, state.lineage)
}

/// Apply a hit through armor.
pub fn take_hit(
    state: &mut CharacterState,
    raw: u32,
    damage_type: DamageType,
    config: &RulesConfig,
) -> DamageReport {
    let absorbed = absorption(state, damage_type).min(raw);
    let applied = raw - absorbed;
    let event = (applied > 0).then(|| state.apply_damage(applied, damage_type, config));
    debug!(character = %state.id, raw, absorbed, applied, %damage_type, "hit");
    DamageReport {
        raw,
        absorbed,
        applied,
        damage_type,
        event,
        violent: damage_type == DamageType::Lethal && applied >= VIOLENCE_THRESHOLD,
    }
}
