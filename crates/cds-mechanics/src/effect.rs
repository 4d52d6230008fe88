//! Temporary combat effects and turn-start automation.
//!
//! A character whose mortality reaches [`LOSS_OF_CONTROL_MORTALITY`] loses
//! control to their lineage's beast for [`EFFECT_ROUNDS`] of their turns.
//! Regeneration advantages heal at the start of each turn.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::item::regeneration_bonus;
use crate::ledger::LedgerEvent;
use crate::resolution::CheckKind;
use crate::sheet::{CharacterState, Lineage, PoolKind, Skill};

/// Mortality at which the beast takes over in combat.
pub const LOSS_OF_CONTROL_MORTALITY: u32 = 13;

/// Turns a loss of control lasts.
pub const EFFECT_ROUNDS: u32 = 3;

/// The beast in command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatEffect {
    /// Wilkołaki fury: harder attacks, worse defense and reasoning.
    BestialFury,
    /// Upiór hunger: sharper attacks, no patience for talk or thought.
    Bloodthirst,
}

impl CombatEffect {
    /// The effect a lineage falls into.
    pub fn for_lineage(lineage: Lineage) -> Self {
        match lineage {
            Lineage::Wilkolaki => Self::BestialFury,
            Lineage::Upior => Self::Bloodthirst,
        }
    }

    /// Modifier to a check of `kind` rolled with `skill`.
    pub fn check_modifier(self, kind: CheckKind, skill: Skill) -> i32 {
        let attack = matches!(kind, CheckKind::Attack { .. });
        let skill_roll = matches!(kind, CheckKind::Skill { .. });
        let mental = skill_roll && Skill::MENTAL.contains(&skill);
        let social = skill_roll && Skill::SOCIAL.contains(&skill);
        match self {
            Self::BestialFury if attack => 3,
            Self::BestialFury if kind == CheckKind::Defense || mental => -2,
            Self::Bloodthirst if attack => 2,
            Self::Bloodthirst if mental || social => -3,
            _ => 0,
        }
    }

    /// Extra damage on a successful strike.
    pub fn damage_bonus(self) -> u32 {
        match self {
            Self::BestialFury => 3,
            Self::Bloodthirst => 0,
        }
    }
}

impl std::fmt::Display for CombatEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BestialFury => write!(f, "bestial fury"),
            Self::Bloodthirst => write!(f, "bloodthirst"),
        }
    }
}

/// An effect with its remaining duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporaryEffect {
    /// What is in effect.
    pub effect: CombatEffect,
    /// Turns left, counting the current one.
    pub rounds_remaining: u32,
}

impl TemporaryEffect {
    /// A fresh effect lasting [`EFFECT_ROUNDS`].
    pub fn new(effect: CombatEffect) -> Self {
        Self {
            effect,
            rounds_remaining: EFFECT_ROUNDS,
        }
    }

    /// Count down one turn. Returns false once the effect has run out.
    pub fn tick(&mut self) -> bool {
        self.rounds_remaining = self.rounds_remaining.saturating_sub(1);
        self.rounds_remaining > 0
    }
}

/// The effect the character falls into, if their mortality is high enough.
pub fn loss_of_control(state: &CharacterState) -> Option<TemporaryEffect> {
    if state.mortality < LOSS_OF_CONTROL_MORTALITY {
        return None;
    }
    let effect = CombatEffect::for_lineage(state.lineage);
    info!(character = %state.id, mortality = state.mortality, %effect, "lost control");
    Some(TemporaryEffect::new(effect))
}

/// Turn-start healing from regeneration advantages.
///
/// Returns `None` when nothing heals or health is already full.
pub fn regenerate(state: &mut CharacterState, round: u32) -> Option<LedgerEvent> {
    let amount = regeneration_bonus(&state.items, state.lineage, round);
    if amount == 0 || state.health.pool.is_full() {
        return None;
    }
    let event = state.add(PoolKind::Health, amount, "regeneration");
    debug!(character = %state.id, round, healed = event.delta(), "regenerated");
    Some(event)
}
