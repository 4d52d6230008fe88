//! Rule-resolution engine for the Contrato de Sangue tabletop RPG.
//!
//! Consumes a character state snapshot owned by the host and produces
//! derived values, dice-roll outcomes and resource deltas. Covers the
//! Balance Eternal between Humanity and Bestiality, the dice reserve and
//! its Sacred and Umbral dice, wound and mortality penalties, power costs,
//! advantage bonuses, armor absorption and investigation point accrual.

pub mod config;
pub mod damage;
pub mod dice;
pub mod effect;
pub mod error;
pub mod investigation;
pub mod item;
pub mod ledger;
pub mod power;
pub mod resolution;
pub mod sheet;
pub mod tables;
pub mod validate;

pub use config::RulesConfig;
pub use damage::{DamageReport, DamageType};
pub use dice::{DiceTag, Die, DieResult, FixedRolls, Roller};
pub use effect::{CombatEffect, TemporaryEffect};
pub use error::{RuleError, RuleResult};
pub use investigation::{Investigation, Milestone};
pub use item::{
    Bonus, BonusKind, EffectTag, Item, ItemId, ItemKind, LineageAffinity, Range, WeaponKind,
};
pub use ledger::{LedgerEvent, Resource};
pub use power::{Activation, Affordability, PowerCost, Shortfall};
pub use resolution::{
    CheckKind, CheckRequest, CheckResult, Formula, Modifier, ModifierSource, Outcome, ReserveDie,
    ReserveDieResult,
};
pub use sheet::{
    CharacterId, CharacterState, Health, Lineage, Penalties, Pool, PoolKind, Skill, WoundConditions,
    WoundLevel,
};
pub use tables::{Difficulty, HuntFrequency, HuntRequirement};
pub use validate::{ValidationIssue, validate_character};
