//! Resource ledger: every change to a pool or stat produces an event.
//!
//! Spends are checked before anything moves. Additions clamp silently at
//! the pool maximum. Each change is logged and returned to the caller so
//! the host can persist or display it.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::RulesConfig;
use crate::damage::DamageType;
use crate::error::{RuleError, RuleResult};
use crate::sheet::{CharacterId, CharacterState, Pool, PoolKind};

/// Anything the ledger can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    /// Dice reserve value.
    DiceReserve,
    /// Understanding points value.
    UnderstandingPoints,
    /// Current health.
    Health,
    /// Mortality.
    Mortality,
    /// Bestiality (humanity follows).
    Bestiality,
}

impl From<PoolKind> for Resource {
    fn from(kind: PoolKind) -> Self {
        match kind {
            PoolKind::DiceReserve => Self::DiceReserve,
            PoolKind::UnderstandingPoints => Self::UnderstandingPoints,
            PoolKind::Health => Self::Health,
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DiceReserve => write!(f, "dice reserve"),
            Self::UnderstandingPoints => write!(f, "understanding points"),
            Self::Health => write!(f, "health"),
            Self::Mortality => write!(f, "mortality"),
            Self::Bestiality => write!(f, "bestiality"),
        }
    }
}

/// A single recorded change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEvent {
    /// Whose resource moved.
    pub character: CharacterId,
    /// Which resource moved.
    pub resource: Resource,
    /// Value before the change.
    pub before: u32,
    /// Value after the change.
    pub after: u32,
    /// Why it moved.
    pub reason: String,
}

impl LedgerEvent {
    /// Build an event and log it.
    pub fn record(
        character: CharacterId,
        resource: Resource,
        before: u32,
        after: u32,
        reason: impl Into<String>,
    ) -> Self {
        let event = Self {
            character,
            resource,
            before,
            after,
            reason: reason.into(),
        };
        info!(
            character = %event.character,
            pool = %event.resource,
            before = event.before,
            after = event.after,
            reason = %event.reason,
            "ledger"
        );
        event
    }

    /// Signed change.
    pub fn delta(&self) -> i64 {
        i64::from(self.after) - i64::from(self.before)
    }

    /// Returns true if the value did not move.
    pub fn is_noop(&self) -> bool {
        self.before == self.after
    }
}

impl std::fmt::Display for LedgerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} -> {} ({})",
            self.resource, self.before, self.after, self.reason
        )
    }
}

impl CharacterState {
    /// Borrow one of the character's pools.
    pub fn pool(&self, kind: PoolKind) -> &Pool {
        match kind {
            PoolKind::DiceReserve => &self.dice_reserve,
            PoolKind::UnderstandingPoints => &self.understanding_points,
            PoolKind::Health => &self.health.pool,
        }
    }

    fn pool_mut(&mut self, kind: PoolKind) -> &mut Pool {
        match kind {
            PoolKind::DiceReserve => &mut self.dice_reserve,
            PoolKind::UnderstandingPoints => &mut self.understanding_points,
            PoolKind::Health => &mut self.health.pool,
        }
    }

    /// Spend from a pool. Fails without touching it if the pool is short.
    pub fn spend(&mut self, kind: PoolKind, amount: u32, reason: &str) -> RuleResult<LedgerEvent> {
        let id = self.id;
        let pool = self.pool_mut(kind);
        let before = pool.value;
        let Some(after) = pool.spend(amount) else {
            warn!(character = %id, pool = %kind, required = amount, available = before, reason, "spend refused");
            return Err(RuleError::InsufficientResource {
                pool: kind,
                required: amount,
                available: before,
            });
        };
        if kind == PoolKind::Health {
            self.health.refresh_conditions();
        }
        Ok(LedgerEvent::record(id, kind.into(), before, after, reason))
    }

    /// Add to a pool, clamping at its maximum.
    pub fn add(&mut self, kind: PoolKind, amount: u32, reason: &str) -> LedgerEvent {
        let id = self.id;
        let pool = self.pool_mut(kind);
        let before = pool.value;
        let after = pool.add(amount);
        if kind == PoolKind::Health {
            self.health.refresh_conditions();
        }
        LedgerEvent::record(id, kind.into(), before, after, reason)
    }

    /// Give back dice to the reserve.
    pub fn recover_reserve(&mut self, amount: u32) -> LedgerEvent {
        self.add(PoolKind::DiceReserve, amount, "reserve recovered")
    }

    /// Restore health.
    pub fn heal(&mut self, amount: u32) -> LedgerEvent {
        self.add(PoolKind::Health, amount, "healed")
    }

    /// Take damage, stopping at zero health.
    ///
    /// Wound conditions are recomputed only when `auto_wounds` is on; with it
    /// off the host manages them by hand.
    pub fn apply_damage(
        &mut self,
        amount: u32,
        damage_type: DamageType,
        config: &RulesConfig,
    ) -> LedgerEvent {
        let before = self.health.pool.value;
        let after = self.health.pool.drain(amount);
        if config.auto_wounds {
            self.health.refresh_conditions();
        }
        LedgerEvent::record(
            self.id,
            Resource::Health,
            before,
            after,
            format!("{damage_type} damage"),
        )
    }

    /// Raise mortality. It has no upper bound.
    pub fn increase_mortality(&mut self, amount: u32, reason: &str) -> LedgerEvent {
        let before = self.mortality;
        self.mortality = self.mortality.saturating_add(amount);
        LedgerEvent::record(self.id, Resource::Mortality, before, self.mortality, reason)
    }

    /// Feed the beast, lowering mortality.
    pub fn hunt(&mut self, reduction: u32) -> LedgerEvent {
        let before = self.mortality;
        self.mortality = self.mortality.saturating_sub(reduction);
        LedgerEvent::record(self.id, Resource::Mortality, before, self.mortality, "hunt")
    }

    /// Drop understanding points to zero, as when a mystery closes.
    pub fn reset_understanding(&mut self) -> LedgerEvent {
        let before = self.understanding_points.value;
        self.understanding_points.value = 0;
        LedgerEvent::record(
            self.id,
            Resource::UnderstandingPoints,
            before,
            0,
            "understanding reset",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{Lineage, Skill, WoundLevel};
    use proptest::prelude::*;

    fn mira() -> CharacterState {
        CharacterState::new("Mira", Lineage::Upior)
            .with_skill(Skill::Investigation, 3)
            .with_skill(Skill::Occultism, 2)
    }

    #[test]
    fn spend_subtracts_and_records() {
        let mut c = mira();
        let event = c.spend(PoolKind::DiceReserve, 2, "ritual").unwrap();
        assert_eq!(c.dice_reserve.value, 5);
        assert_eq!(event.delta(), -2);
        insta::assert_snapshot!(event.to_string(), @"dice reserve: 7 -> 5 (ritual)");
    }

    #[test]
    fn overspend_leaves_state_untouched() {
        let mut c = mira();
        let before = c.clone();
        let err = c.spend(PoolKind::UnderstandingPoints, 1, "hunch").unwrap_err();
        assert!(matches!(
            err,
            RuleError::InsufficientResource {
                pool: PoolKind::UnderstandingPoints,
                required: 1,
                available: 0
            }
        ));
        assert_eq!(c, before);
    }

    #[test]
    fn add_clamps_silently() {
        let mut c = mira();
        let event = c.add(PoolKind::UnderstandingPoints, 10, "clue");
        assert_eq!((event.before, event.after), (0, 5));
    }

    #[test]
    fn recover_reserve_caps_at_max() {
        let mut c = mira();
        c.dice_reserve.value = 6;
        let event = c.recover_reserve(3);
        assert_eq!(event.after, 7);
    }

    #[test]
    fn damage_cascades_conditions() {
        let mut c = mira();
        c.apply_damage(8, DamageType::Lethal, &RulesConfig::default());
        assert_eq!(c.health.pool.value, 2);
        assert_eq!(c.health.conditions.most_severe(), Some(WoundLevel::GravelyWounded));
        assert_eq!(c.penalties(&RulesConfig::default()).wounds, -4);
    }

    #[test]
    fn damage_stops_at_zero() {
        let mut c = mira();
        let event = c.apply_damage(50, DamageType::Bashing, &RulesConfig::default());
        assert_eq!(event.after, 0);
        assert!(c.health.conditions.incapacitated);
        assert_eq!(event.reason, "bashing damage");
    }

    #[test]
    fn damage_without_auto_wounds_keeps_conditions() {
        let mut c = mira();
        c.apply_damage(9, DamageType::Lethal, &RulesConfig::default().with_auto_wounds(false));
        assert_eq!(c.health.pool.value, 1);
        assert_eq!(c.health.conditions.most_severe(), None);
    }

    #[test]
    fn healing_clears_conditions() {
        let mut c = mira();
        c.apply_damage(6, DamageType::Lethal, &RulesConfig::default());
        c.heal(6);
        assert_eq!(c.health.conditions.most_severe(), None);
    }

    #[test]
    fn mortality_up_and_down() {
        let mut c = mira();
        c.increase_mortality(5, "violence");
        assert_eq!(c.mortality, 5);
        let event = c.hunt(10);
        assert_eq!((event.before, event.after), (5, 0));
    }

    #[test]
    fn reset_understanding() {
        let mut c = mira();
        c.add(PoolKind::UnderstandingPoints, 4, "clues");
        let event = c.reset_understanding();
        assert_eq!(event.delta(), -4);
        assert_eq!(c.understanding_points.value, 0);
    }

    #[test]
    fn resource_from_pool_kind() {
        assert_eq!(Resource::from(PoolKind::Health), Resource::Health);
        assert_eq!(Resource::from(PoolKind::DiceReserve), Resource::DiceReserve);
    }

    proptest! {
        #[test]
        fn add_never_exceeds_max(start in 0u32..8, amount in 0u32..1000) {
            let mut c = mira();
            c.dice_reserve.value = start;
            c.add(PoolKind::DiceReserve, amount, "test");
            prop_assert!(c.dice_reserve.value <= c.dice_reserve.max);
        }
    }
}
