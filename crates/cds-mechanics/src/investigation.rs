//! Understanding points earned through investigation.
//!
//! Good rolls on investigative skills award points, connections between
//! clues award one more, and points can be burned for a bonus on the next
//! investigation roll.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RulesConfig;
use crate::dice::Roller;
use crate::error::{RuleError, RuleResult};
use crate::ledger::LedgerEvent;
use crate::resolution::{CheckKind, CheckRequest, CheckResult, perform_check};
use crate::sheet::{CharacterState, PoolKind, Skill};
use crate::tables;

/// How close a character is to solving the mystery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Milestone {
    /// At least half the maximum.
    Halfway,
    /// At least three quarters.
    Close,
    /// At the maximum.
    Complete,
}

impl std::fmt::Display for Milestone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Halfway => write!(f, "begins to understand the truth"),
            Self::Close => write!(f, "is close to unravelling the mystery"),
            Self::Complete => write!(f, "has unravelled the mystery"),
        }
    }
}

/// Everything one investigation produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Investigation {
    /// Where the character looked.
    pub location: String,
    /// Points spent for a bonus, if any.
    pub spent: Option<LedgerEvent>,
    /// The roll.
    pub check: CheckResult,
    /// Points awarded by the roll, if any.
    pub awarded: Option<LedgerEvent>,
    /// Milestone reached after the award.
    pub milestone: Option<Milestone>,
}

/// Award understanding points for an investigative skill check.
///
/// Returns the event only when the character actually gained points.
pub fn award_for_check(state: &mut CharacterState, result: &CheckResult) -> Option<LedgerEvent> {
    let CheckKind::Skill { skill } = result.kind else {
        return None;
    };
    if !skill.is_investigative() {
        return None;
    }
    let points = tables::investigation_award(result.total);
    if points == 0 {
        return None;
    }
    let event = state.add(
        PoolKind::UnderstandingPoints,
        points,
        &format!("{skill} roll"),
    );
    (!event.is_noop()).then_some(event)
}

/// A connection between clues is worth one point.
pub fn record_connection(state: &mut CharacterState, connection: &str) -> LedgerEvent {
    debug!(character = %state.id, connection, "connection made");
    state.add(PoolKind::UnderstandingPoints, 1, "connection discovered")
}

/// Burn points for an equal bonus on an investigation roll.
pub fn spend_for_bonus(
    state: &mut CharacterState,
    points: u32,
    reason: &str,
) -> RuleResult<Option<LedgerEvent>> {
    if points == 0 {
        return Ok(None);
    }
    state
        .spend(PoolKind::UnderstandingPoints, points, reason)
        .map(Some)
}

/// Spend points, roll the skill and collect any award.
///
/// The spend is checked before rolling; an unaffordable spend rolls nothing.
pub fn investigate<R: Roller + ?Sized>(
    state: &mut CharacterState,
    location: &str,
    skill: Skill,
    difficulty: i32,
    points: u32,
    config: &RulesConfig,
    roller: &mut R,
) -> RuleResult<Investigation> {
    if points > state.understanding_points.value {
        return Err(RuleError::InsufficientResource {
            pool: PoolKind::UnderstandingPoints,
            required: points,
            available: state.understanding_points.value,
        });
    }
    let request = CheckRequest::skill(skill)
        .with_difficulty(difficulty)
        .with_understanding_bonus(points);
    let spent = spend_for_bonus(state, points, &format!("investigation at {location}"))?;
    let check = perform_check(state, &request, config, roller)?;
    let awarded = award_for_check(state, &check);
    Ok(Investigation {
        location: location.to_string(),
        spent,
        check,
        awarded,
        milestone: milestone(state),
    })
}

/// The milestone the character's understanding has reached.
pub fn milestone(state: &CharacterState) -> Option<Milestone> {
    let pool = state.understanding_points;
    if pool.max == 0 {
        return None;
    }
    let (value, max) = (u64::from(pool.value), u64::from(pool.max));
    if value >= max {
        Some(Milestone::Complete)
    } else if value * 4 >= max * 3 {
        Some(Milestone::Close)
    } else if value * 2 >= max {
        Some(Milestone::Halfway)
    } else {
        None
    }
}
