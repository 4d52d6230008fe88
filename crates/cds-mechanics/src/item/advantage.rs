//! Advantage bonuses.
//!
//! Each advantage carries an [`EffectTag`] naming the built-in rule it
//! triggers. Tags with a skill rule contribute only through that rule;
//! untagged advantages fall back to their generic [`Bonus`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Item, ItemKind};
use crate::sheet::{Lineage, Skill};

/// Built-in advantage rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectTag {
    /// +1 to mental skills.
    SharpMind,
    /// +1 to athletics.
    BestialStrength,
    /// +1 to survival.
    PrimalInstincts,
    /// +1 to social skills.
    SupernaturalCharm,
    /// +1 damage absorption.
    IronSkin,
    /// +1 damage absorption.
    Resilience,
    /// Heals 1 at turn start once a fight runs long.
    Regeneration,
    /// Heals 1 at every turn start.
    AcceleratedRegeneration,
    /// No built-in rule; the generic bonus applies.
    #[default]
    None,
}

impl EffectTag {
    /// The tag's own skill bonus, or `None` if it has no skill rule.
    fn skill_rule(self, skill: Skill) -> Option<i32> {
        let applies = match self {
            Self::SharpMind => Skill::MENTAL.contains(&skill),
            Self::BestialStrength => skill == Skill::Athletics,
            Self::PrimalInstincts => skill == Skill::Survival,
            Self::SupernaturalCharm => Skill::SOCIAL.contains(&skill),
            Self::IronSkin
            | Self::Resilience
            | Self::Regeneration
            | Self::AcceleratedRegeneration
            | Self::None => return None,
        };
        Some(i32::from(applies))
    }

    /// Extra damage absorption granted.
    pub fn absorption(self) -> u32 {
        match self {
            Self::IronSkin | Self::Resilience => 1,
            _ => 0,
        }
    }

    /// Health regained at the start of a turn in the given round.
    pub fn regeneration(self, round: u32) -> u32 {
        match self {
            Self::AcceleratedRegeneration => 1,
            Self::Regeneration if round >= LONG_FIGHT_ROUNDS => 1,
            _ => 0,
        }
    }
}

/// Rounds after which plain regeneration starts healing in combat.
pub const LONG_FIGHT_ROUNDS: u32 = 60;

/// What a generic bonus targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusKind {
    /// Adds to rolls of one skill.
    #[default]
    Skill,
    /// Narrative effect resolved by the table.
    Special,
}

/// A generic advantage bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bonus {
    /// What it targets.
    #[serde(default)]
    pub kind: BonusKind,
    /// Amount added.
    #[serde(default)]
    pub amount: i32,
    /// The skill it applies to.
    #[serde(default)]
    pub applies_to: Option<Skill>,
}

impl Bonus {
    /// A skill bonus.
    pub fn skill(skill: Skill, amount: i32) -> Self {
        Self {
            kind: BonusKind::Skill,
            amount,
            applies_to: Some(skill),
        }
    }

    fn for_skill(&self, skill: Skill) -> i32 {
        if self.kind == BonusKind::Skill && self.applies_to == Some(skill) {
            self.amount
        } else {
            0
        }
    }
}

/// Active advantages the lineage may benefit from.
fn active_advantages(
    items: &[Item],
    lineage: Lineage,
) -> impl Iterator<Item = (EffectTag, &Bonus)> {
    items.iter().filter_map(move |item| match &item.kind {
        ItemKind::Advantage {
            lineage: affinity,
            bonus,
            effect,
            active: true,
        } if affinity.admits(lineage) => Some((*effect, bonus)),
        _ => None,
    })
}

/// Sum of advantage bonuses to rolls of `skill`.
pub fn skill_bonus(items: &[Item], lineage: Lineage, skill: Skill) -> i32 {
    let total = active_advantages(items, lineage)
        .map(|(effect, bonus)| {
            effect
                .skill_rule(skill)
                .unwrap_or_else(|| bonus.for_skill(skill))
        })
        .sum();
    debug!(%skill, total, "advantage bonus");
    total
}

/// Health regained at turn start in the given round.
pub fn regeneration_bonus(items: &[Item], lineage: Lineage, round: u32) -> u32 {
    active_advantages(items, lineage)
        .map(|(effect, _)| effect.regeneration(round))
        .sum()
}

/// Extra damage absorption from advantages.
pub fn absorption_bonus(items: &[Item], lineage: Lineage) -> u32 {
    active_advantages(items, lineage)
        .map(|(effect, _)| effect.absorption())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::LineageAffinity;

    fn advantage(effect: EffectTag, affinity: LineageAffinity) -> Item {
        Item::advantage(format!("{effect:?}"), affinity, effect, Bonus::default())
    }

    #[test]
    fn sharp_mind_covers_mental_skills() {
        let items = vec![advantage(EffectTag::SharpMind, LineageAffinity::Both)];
        for skill in Skill::MENTAL {
            assert_eq!(skill_bonus(&items, Lineage::Upior, skill), 1);
        }
        assert_eq!(skill_bonus(&items, Lineage::Upior, Skill::Brawl), 0);
    }

    #[test]
    fn single_skill_tags() {
        let items = vec![
            advantage(EffectTag::BestialStrength, LineageAffinity::Wilkolaki),
            advantage(EffectTag::PrimalInstincts, LineageAffinity::Wilkolaki),
        ];
        assert_eq!(skill_bonus(&items, Lineage::Wilkolaki, Skill::Athletics), 1);
        assert_eq!(skill_bonus(&items, Lineage::Wilkolaki, Skill::Survival), 1);
        assert_eq!(skill_bonus(&items, Lineage::Wilkolaki, Skill::Stealth), 0);
    }

    #[test]
    fn wrong_lineage_grants_nothing() {
        let items = vec![advantage(EffectTag::SupernaturalCharm, LineageAffinity::Upior)];
        assert_eq!(skill_bonus(&items, Lineage::Upior, Skill::Persuasion), 1);
        assert_eq!(skill_bonus(&items, Lineage::Wilkolaki, Skill::Persuasion), 0);
    }

    #[test]
    fn inactive_advantage_grants_nothing() {
        let mut item = advantage(EffectTag::SharpMind, LineageAffinity::Both);
        if let ItemKind::Advantage { active, .. } = &mut item.kind {
            *active = false;
        }
        assert_eq!(skill_bonus(&[item], Lineage::Upior, Skill::Science), 0);
    }

    #[test]
    fn untagged_advantage_uses_generic_bonus() {
        let items = vec![Item::advantage(
            "Street Racer",
            LineageAffinity::Both,
            EffectTag::None,
            Bonus::skill(Skill::Driving, 2),
        )];
        assert_eq!(skill_bonus(&items, Lineage::Upior, Skill::Driving), 2);
        assert_eq!(skill_bonus(&items, Lineage::Upior, Skill::Athletics), 0);
    }

    #[test]
    fn tagged_advantage_ignores_generic_bonus() {
        let items = vec![Item::advantage(
            "Sharp Mind",
            LineageAffinity::Both,
            EffectTag::SharpMind,
            Bonus::skill(Skill::Driving, 5),
        )];
        assert_eq!(skill_bonus(&items, Lineage::Upior, Skill::Driving), 0);
    }

    #[test]
    fn special_bonus_never_adds_to_rolls() {
        let bonus = Bonus {
            kind: BonusKind::Special,
            amount: 3,
            applies_to: Some(Skill::Stealth),
        };
        let items = vec![Item::advantage("Shadow", LineageAffinity::Both, EffectTag::None, bonus)];
        assert_eq!(skill_bonus(&items, Lineage::Upior, Skill::Stealth), 0);
    }

    #[test]
    fn absorption_advantages_stack() {
        let items = vec![
            advantage(EffectTag::IronSkin, LineageAffinity::Wilkolaki),
            advantage(EffectTag::Resilience, LineageAffinity::Both),
            advantage(EffectTag::SharpMind, LineageAffinity::Both),
        ];
        assert_eq!(absorption_bonus(&items, Lineage::Wilkolaki), 2);
        assert_eq!(absorption_bonus(&items, Lineage::Upior), 1);
        assert_eq!(skill_bonus(&items, Lineage::Wilkolaki, Skill::Defense), 0);
    }

    #[test]
    fn accelerated_regeneration_heals_every_turn() {
        let items = vec![advantage(
            EffectTag::AcceleratedRegeneration,
            LineageAffinity::Wilkolaki,
        )];
        assert_eq!(regeneration_bonus(&items, Lineage::Wilkolaki, 1), 1);
        assert_eq!(regeneration_bonus(&items, Lineage::Upior, 1), 0);
    }

    #[test]
    fn plain_regeneration_waits_for_a_long_fight() {
        let items = vec![advantage(EffectTag::Regeneration, LineageAffinity::Upior)];
        assert_eq!(regeneration_bonus(&items, Lineage::Upior, LONG_FIGHT_ROUNDS - 1), 0);
        assert_eq!(regeneration_bonus(&items, Lineage::Upior, LONG_FIGHT_ROUNDS), 1);
        assert_eq!(skill_bonus(&items, Lineage::Upior, Skill::Medicine), 0);
    }
}
