//! Skill, attack, defense and initiative checks.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Outcome, classify};
use crate::config::RulesConfig;
use crate::dice::{DiceTag, Die, DieResult, Roller};
use crate::effect::CombatEffect;
use crate::error::{RuleError, RuleResult};
use crate::item::{ItemId, ItemKind, WeaponKind, skill_bonus};
use crate::sheet::{CharacterId, CharacterState, Skill};
use crate::tables::Difficulty;

/// Where a formula modifier comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierSource {
    /// Supplied by the player or GM.
    Explicit,
    /// Mortality table.
    Mortality,
    /// Most severe wound.
    Wounds,
    /// Active advantages.
    Advantage,
    /// Understanding points spent on the roll.
    UnderstandingSpent,
    /// A temporary combat effect such as bestial fury.
    CombatEffect,
}

impl std::fmt::Display for ModifierSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Explicit => write!(f, "modifier"),
            Self::Mortality => write!(f, "mortality"),
            Self::Wounds => write!(f, "wounds"),
            Self::Advantage => write!(f, "advantages"),
            Self::UnderstandingSpent => write!(f, "understanding"),
            Self::CombatEffect => write!(f, "combat effect"),
        }
    }
}

/// A signed term in a formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifier {
    /// Where it comes from.
    pub source: ModifierSource,
    /// Signed value.
    pub value: i32,
}

/// `1d12 + skill + modifiers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formula {
    /// The die rolled.
    pub die: Die,
    /// Rank in the rolled skill.
    pub skill_value: u32,
    /// Non-zero modifiers in application order.
    pub modifiers: Vec<Modifier>,
}

impl Formula {
    /// A bare formula with no modifiers.
    pub fn new(die: Die, skill_value: u32) -> Self {
        Self {
            die,
            skill_value,
            modifiers: Vec::new(),
        }
    }

    /// Append a modifier. Zero values are dropped.
    pub fn push(&mut self, source: ModifierSource, value: i32) {
        if value != 0 {
            self.modifiers.push(Modifier { source, value });
        }
    }

    /// Sum of all modifiers.
    pub fn modifier_total(&self) -> i32 {
        self.modifiers
            .iter()
            .fold(0i32, |acc, m| acc.saturating_add(m.value))
    }

    /// Value contributed by one source, 0 if absent.
    pub fn modifier(&self, source: ModifierSource) -> i32 {
        self.modifiers
            .iter()
            .filter(|m| m.source == source)
            .map(|m| m.value)
            .sum()
    }

    /// Total for a given die face. Saturates at the `i32` bounds.
    pub fn total(&self, face: u32) -> i32 {
        crate::sheet::to_i32(face)
            .saturating_add(crate::sheet::to_i32(self.skill_value))
            .saturating_add(self.modifier_total())
    }
}

impl std::fmt::Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "1{} + {}", self.die, self.skill_value)?;
        for m in &self.modifiers {
            if m.value < 0 {
                write!(f, " - {}", m.value.unsigned_abs())?;
            } else {
                write!(f, " + {}", m.value)?;
            }
        }
        Ok(())
    }
}

/// What is being rolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CheckKind {
    /// A plain skill roll.
    Skill {
        /// The skill rolled.
        skill: Skill,
    },
    /// An attack, armed or not.
    Attack {
        /// The weapon used. `None` is a brawl.
        weapon: Option<ItemId>,
    },
    /// A defense roll.
    Defense,
    /// An initiative roll.
    Initiative,
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skill { skill } => write!(f, "{skill}"),
            Self::Attack { .. } => write!(f, "attack"),
            Self::Defense => write!(f, "defense"),
            Self::Initiative => write!(f, "initiative"),
        }
    }
}

/// A check to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRequest {
    /// What is being rolled.
    pub kind: CheckKind,
    /// Explicit modifier.
    #[serde(default)]
    pub modifier: i32,
    /// Target number. `None` rolls without an outcome.
    #[serde(default)]
    pub difficulty: Option<i32>,
    /// Understanding points already spent to boost this roll.
    #[serde(default)]
    pub understanding_bonus: u32,
    /// Combat effect the roller is under.
    #[serde(default)]
    pub combat_effect: Option<CombatEffect>,
}

impl CheckRequest {
    fn new(kind: CheckKind) -> Self {
        Self {
            kind,
            modifier: 0,
            difficulty: None,
            understanding_bonus: 0,
            combat_effect: None,
        }
    }

    /// A skill roll.
    pub fn skill(skill: Skill) -> Self {
        Self::new(CheckKind::Skill { skill })
    }

    /// An attack against the default difficulty.
    pub fn attack(weapon: Option<ItemId>) -> Self {
        Self::new(CheckKind::Attack { weapon }).with_difficulty(Difficulty::Medium.value())
    }

    /// A defense roll.
    pub fn defense() -> Self {
        Self::new(CheckKind::Defense)
    }

    /// An initiative roll.
    pub fn initiative() -> Self {
        Self::new(CheckKind::Initiative)
    }

    /// Set the explicit modifier.
    pub fn with_modifier(mut self, modifier: i32) -> Self {
        self.modifier = modifier;
        self
    }

    /// Set the difficulty.
    pub fn with_difficulty(mut self, difficulty: i32) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    /// Remove the difficulty.
    pub fn without_difficulty(mut self) -> Self {
        self.difficulty = None;
        self
    }

    /// Add spent understanding points to the roll.
    pub fn with_understanding_bonus(mut self, points: u32) -> Self {
        self.understanding_bonus = points;
        self
    }

    /// Roll under a combat effect.
    pub fn with_combat_effect(mut self, effect: CombatEffect) -> Self {
        self.combat_effect = Some(effect);
        self
    }
}

/// The result of a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Who rolled.
    pub character: CharacterId,
    /// What was rolled.
    pub kind: CheckKind,
    /// The skill the roll used.
    pub skill: Skill,
    /// The formula rolled.
    pub formula: Formula,
    /// The die as rolled.
    pub die: DieResult,
    /// Die plus skill plus modifiers.
    pub total: i32,
    /// Target number, if any.
    pub difficulty: Option<i32>,
    /// Outcome band, if there was a difficulty.
    pub outcome: Option<Outcome>,
    /// Weapon damage carried by an attack.
    pub damage: Option<u32>,
}

impl CheckResult {
    /// Returns true if the check succeeded against its difficulty.
    pub fn succeeded(&self) -> bool {
        self.outcome.is_some_and(|o| o.is_success())
    }
}

impl std::fmt::Display for CheckResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} = {}", self.kind, self.formula, self.total)?;
        if let Some(difficulty) = self.difficulty {
            write!(f, " vs {difficulty}")?;
        }
        if let Some(outcome) = self.outcome {
            write!(f, ", {outcome}")?;
        }
        if let Some(damage) = self.damage.filter(|d| *d > 0) {
            write!(f, ", damage +{damage}")?;
        }
        Ok(())
    }
}

/// Which skill a check uses, and the weapon damage it carries.
fn check_skill(state: &CharacterState, kind: CheckKind) -> RuleResult<(Skill, Option<u32>)> {
    match kind {
        CheckKind::Skill { skill } => Ok((skill, None)),
        CheckKind::Defense | CheckKind::Initiative => Ok((Skill::Defense, None)),
        CheckKind::Attack { weapon: None } => Ok((Skill::Brawl, Some(0))),
        CheckKind::Attack {
            weapon: Some(id),
        } => {
            let item = state.item(id)?;
            match item.kind {
                ItemKind::Weapon {
                    damage,
                    kind: WeaponKind::Melee,
                    ..
                } => Ok((Skill::MeleeWeapons, Some(damage))),
                ItemKind::Weapon {
                    damage,
                    kind: WeaponKind::Firearm,
                    ..
                } => Ok((Skill::Firearms, Some(damage))),
                _ => Err(RuleError::NotAWeapon(item.name.clone())),
            }
        }
    }
}

/// Assemble the formula for a request without rolling.
pub fn build_formula(
    state: &CharacterState,
    request: &CheckRequest,
    config: &RulesConfig,
) -> RuleResult<(Skill, Formula, Option<u32>)> {
    let (skill, damage) = check_skill(state, request.kind)?;
    let penalties = state.penalties(config);
    let mut formula = Formula::new(Die::D12, state.skill(skill));
    formula.push(ModifierSource::Explicit, request.modifier);
    formula.push(ModifierSource::Mortality, penalties.mortality);
    formula.push(ModifierSource::Wounds, penalties.wounds);
    formula.push(
        ModifierSource::Advantage,
        skill_bonus(&state.items, state.lineage, skill),
    );
    formula.push(
        ModifierSource::UnderstandingSpent,
        crate::sheet::to_i32(request.understanding_bonus),
    );
    if let Some(effect) = request.combat_effect {
        formula.push(
            ModifierSource::CombatEffect,
            effect.check_modifier(request.kind, skill),
        );
    }
    Ok((skill, formula, damage))
}

/// Roll a check. The character is not modified.
pub fn perform_check<R: Roller + ?Sized>(
    state: &CharacterState,
    request: &CheckRequest,
    config: &RulesConfig,
    roller: &mut R,
) -> RuleResult<CheckResult> {
    let (skill, formula, damage) = build_formula(state, request, config)?;
    let die = DieResult::roll(formula.die, DiceTag::Standard, roller);
    let total = formula.total(die.value);
    let outcome = classify(total, request.difficulty);
    debug!(
        character = %state.id,
        check = %request.kind,
        formula = %formula,
        face = die.value,
        total,
        "check rolled"
    );
    Ok(CheckResult {
        character: state.id,
        kind: request.kind,
        skill,
        formula,
        die,
        total,
        difficulty: request.difficulty,
        outcome,
        damage,
    })
}
