//! Power activation costs.
//!
//! Costs are validated in full before any pool moves. Dice reserve and
//! understanding points are checked independently so a refusal lists
//! every shortfall. Mortality is a consequence of use, never a gate.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{RuleError, RuleResult};
use crate::item::{ItemId, ItemKind};
use crate::ledger::LedgerEvent;
use crate::sheet::{CharacterState, PoolKind};

/// What a power costs to activate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PowerCost {
    /// Dice spent from the reserve.
    #[serde(default)]
    pub dice_reserve: u32,
    /// Mortality gained.
    #[serde(default)]
    pub mortality: u32,
    /// Understanding points spent.
    #[serde(default)]
    pub understanding_points: u32,
}

impl PowerCost {
    /// A cost in reserve dice only.
    pub fn dice(dice_reserve: u32) -> Self {
        Self {
            dice_reserve,
            ..Self::default()
        }
    }

    /// Add a mortality cost.
    pub fn with_mortality(mut self, mortality: u32) -> Self {
        self.mortality = mortality;
        self
    }

    /// Add an understanding cost.
    pub fn with_understanding(mut self, points: u32) -> Self {
        self.understanding_points = points;
        self
    }
}

/// One pool that cannot cover its part of a cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    /// The short pool.
    pub pool: PoolKind,
    /// What the cost asks for.
    pub required: u32,
    /// What the pool holds.
    pub available: u32,
}

impl std::fmt::Display for Shortfall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (need {}, have {})",
            self.pool, self.required, self.available
        )
    }
}

/// Whether a cost can be paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Affordability {
    /// Every pool covers its part.
    Affordable,
    /// At least one pool is short.
    Blocked(Vec<Shortfall>),
}

impl Affordability {
    /// Returns true if the cost can be paid.
    pub fn is_affordable(&self) -> bool {
        matches!(self, Self::Affordable)
    }
}

/// The ledger events produced by one activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activation {
    /// The cost that was paid.
    pub cost: PowerCost,
    /// Events in the order they were applied. Zero-cost parts are skipped.
    pub events: Vec<LedgerEvent>,
}

/// Check every pool a cost draws from.
pub fn can_activate(state: &CharacterState, cost: &PowerCost) -> Affordability {
    let checks = [
        (PoolKind::DiceReserve, cost.dice_reserve, state.dice_reserve.value),
        (
            PoolKind::UnderstandingPoints,
            cost.understanding_points,
            state.understanding_points.value,
        ),
    ];
    let shortfalls: Vec<Shortfall> = checks
        .into_iter()
        .filter(|(_, required, available)| required > available)
        .map(|(pool, required, available)| Shortfall {
            pool,
            required,
            available,
        })
        .collect();
    if shortfalls.is_empty() {
        Affordability::Affordable
    } else {
        Affordability::Blocked(shortfalls)
    }
}

/// Pay a cost. Either every part is applied or nothing is.
pub fn activate(
    state: &mut CharacterState,
    cost: &PowerCost,
    reason: &str,
) -> RuleResult<Activation> {
    if let Affordability::Blocked(shortfalls) = can_activate(state, cost) {
        warn!(character = %state.id, reason, "activation refused");
        return Err(RuleError::CannotActivate(shortfalls));
    }

    let mut events = Vec::new();
    if cost.dice_reserve > 0 {
        events.push(state.spend(PoolKind::DiceReserve, cost.dice_reserve, reason)?);
    }
    if cost.understanding_points > 0 {
        events.push(state.spend(
            PoolKind::UnderstandingPoints,
            cost.understanding_points,
            reason,
        )?);
    }
    if cost.mortality > 0 {
        events.push(state.increase_mortality(cost.mortality, reason));
    }
    debug!(character = %state.id, reason, events = events.len(), "activated");
    Ok(Activation { cost: *cost, events })
}

/// Activate one of the character's own powers.
pub fn use_power(state: &mut CharacterState, item: ItemId) -> RuleResult<Activation> {
    let item = state.item(item)?;
    let ItemKind::Power { lineage, cost, .. } = &item.kind else {
        return Err(RuleError::NotAPower(item.name.clone()));
    };
    if *lineage != state.lineage {
        return Err(RuleError::LineageMismatch {
            item: item.name.clone(),
            required: *lineage,
            actual: state.lineage,
        });
    }
    let (cost, name) = (*cost, item.name.clone());
    activate(state, &cost, &name)
}
