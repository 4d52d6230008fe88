//! Sacred and Umbral dice drawn from the dice reserve.
//!
//! A Sacred die is power held in check by humanity: half its face as a
//! bonus, no side effects. An Umbral die unleashes the beast: the full face
//! as a bonus, but bestiality rises by one.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dice::{DiceTag, Die, DieResult, Roller};
use crate::error::{RuleError, RuleResult};
use crate::ledger::LedgerEvent;
use crate::sheet::{CharacterState, PoolKind};

/// The two ways to spend a reserve die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReserveDie {
    /// Half the face, rounded up.
    Sacred,
    /// The full face, plus one bestiality.
    Umbral,
}

impl ReserveDie {
    fn tag(self) -> DiceTag {
        match self {
            Self::Sacred => DiceTag::Sacred,
            Self::Umbral => DiceTag::Umbral,
        }
    }

    /// Bonus granted by a face.
    pub fn bonus(self, face: u32) -> u32 {
        match self {
            Self::Sacred => face.div_ceil(2),
            Self::Umbral => face,
        }
    }
}

impl std::fmt::Display for ReserveDie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sacred => write!(f, "Sacred die"),
            Self::Umbral => write!(f, "Umbral die"),
        }
    }
}

/// The result of spending a reserve die.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveDieResult {
    /// Which kind of die.
    pub which: ReserveDie,
    /// The d6 as rolled.
    pub die: DieResult,
    /// Bonus to add to the check it supports.
    pub bonus: u32,
    /// Reserve spend, then any bestiality change.
    pub events: Vec<LedgerEvent>,
}

impl std::fmt::Display for ReserveDieResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: rolled {}, bonus +{}", self.which, self.die.value, self.bonus)
    }
}

/// Spend one reserve die of the given kind.
pub fn roll_reserve_die<R: Roller + ?Sized>(
    state: &mut CharacterState,
    which: ReserveDie,
    roller: &mut R,
) -> RuleResult<ReserveDieResult> {
    if state.dice_reserve.is_empty() {
        return Err(RuleError::InsufficientResource {
            pool: PoolKind::DiceReserve,
            required: 1,
            available: 0,
        });
    }
    let die = DieResult::roll(Die::D6, which.tag(), roller);
    let bonus = which.bonus(die.value);
    let mut events = vec![state.spend(PoolKind::DiceReserve, 1, &which.to_string())?];
    if which == ReserveDie::Umbral {
        let event = state.shift_bestiality(1, &which.to_string());
        if !event.is_noop() {
            events.push(event);
        }
    }
    debug!(character = %state.id, die = %which, face = die.value, bonus, "reserve die");
    Ok(ReserveDieResult {
        which,
        die,
        bonus,
        events,
    })
}

/// Spend a Sacred die.
pub fn sacred_die<R: Roller + ?Sized>(
    state: &mut CharacterState,
    roller: &mut R,
) -> RuleResult<ReserveDieResult> {
    roll_reserve_die(state, ReserveDie::Sacred, roller)
}

/// Spend an Umbral die.
pub fn umbral_die<R: Roller + ?Sized>(
    state: &mut CharacterState,
    roller: &mut R,
) -> RuleResult<ReserveDieResult> {
    roll_reserve_die(state, ReserveDie::Umbral, roller)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::FixedRolls;
    use crate::ledger::Resource;
    use crate::sheet::Lineage;

    #[test]
    fn sacred_halves_rounding_up() {
        let mut c = CharacterState::new("Mira", Lineage::Upior);
        let before = (c.humanity, c.bestiality, c.mortality);
        let result = sacred_die(&mut c, &mut FixedRolls::new([5])).unwrap();
        assert_eq!(result.bonus, 3);
        assert_eq!(c.dice_reserve.value, 6);
        assert_eq!((c.humanity, c.bestiality, c.mortality), before);
        assert_eq!(result.events.len(), 1);
        assert_eq!(result.die.tag, DiceTag::Sacred);
    }

    #[test]
    fn sacred_bonus_table() {
        let bonuses: Vec<u32> = (1..=6).map(|face| ReserveDie::Sacred.bonus(face)).collect();
        assert_eq!(bonuses, vec![1, 1, 2, 2, 3, 3]);
    }

    #[test]
    fn umbral_feeds_the_beast() {
        let mut c = CharacterState::new("Tomas", Lineage::Wilkolaki).with_bestiality(5);
        assert_eq!(c.dice_reserve.value, 6);
        let result = umbral_die(&mut c, &mut FixedRolls::new([6])).unwrap();
        assert_eq!(result.bonus, 6);
        assert_eq!((c.bestiality, c.humanity), (6, 6));
        assert_eq!(c.dice_reserve.max, 7);
        assert_eq!(c.dice_reserve.value, 5);
        let resources: Vec<Resource> = result.events.iter().map(|e| e.resource).collect();
        assert_eq!(resources, vec![Resource::DiceReserve, Resource::Bestiality]);
        assert_eq!(result.to_string(), "Umbral die: rolled 6, bonus +6");
    }

    #[test]
    fn umbral_at_full_bestiality_only_spends() {
        let mut c = CharacterState::new("Tomas", Lineage::Wilkolaki).with_bestiality(12);
        let result = umbral_die(&mut c, &mut FixedRolls::new([2])).unwrap();
        assert_eq!(c.bestiality, 12);
        assert_eq!(result.events.len(), 1);
    }

    #[test]
    fn empty_reserve_refuses_without_rolling() {
        let mut c = CharacterState::new("Mira", Lineage::Upior);
        c.dice_reserve.value = 0;
        let before = c.clone();
        let mut roller = FixedRolls::new([4]);
        for which in [ReserveDie::Sacred, ReserveDie::Umbral] {
            let err = roll_reserve_die(&mut c, which, &mut roller).unwrap_err();
            assert!(matches!(
                err,
                RuleError::InsufficientResource {
                    pool: PoolKind::DiceReserve,
                    ..
                }
            ));
        }
        assert_eq!(c, before);
        assert_eq!(roller.remaining(), 1);
    }
}
