//! Validation of a character snapshot loaded from the host.
//!
//! The engine repairs most of these silently through
//! [`CharacterState::prepare_derived`]; this reports them so the host can
//! tell the player what was fixed or what needs a human decision.

use crate::item::ItemKind;
use crate::sheet::{BALANCE_TOTAL, CharacterState};

/// A warning or error found during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// The character or item name where the issue was found.
    pub subject: String,
    /// A human-readable description of the issue.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl ValidationIssue {
    fn error(subject: &str, message: String) -> Self {
        Self {
            subject: subject.to_string(),
            message,
            is_error: true,
        }
    }

    fn warning(subject: &str, message: String) -> Self {
        Self {
            subject: subject.to_string(),
            message,
            is_error: false,
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level}: {}: {}", self.subject, self.message)
    }
}

/// Check a snapshot for broken invariants.
///
/// Balance and pool drift are errors: they mean the snapshot was edited by
/// hand. Items from the wrong lineage are warnings: they are simply inert.
pub fn validate_character(state: &CharacterState) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let name = state.name.as_str();

    if state.humanity.checked_add(state.bestiality) != Some(BALANCE_TOTAL) {
        issues.push(ValidationIssue::error(
            name,
            format!(
                "humanity ({}) + bestiality ({}) must equal {BALANCE_TOTAL}",
                state.humanity, state.bestiality
            ),
        ));
    }

    if state.bestiality > BALANCE_TOTAL {
        issues.push(ValidationIssue::error(
            name,
            format!("bestiality {} exceeds {BALANCE_TOTAL}", state.bestiality),
        ));
    }

    if state.dice_reserve.max != state.bestiality.saturating_add(1) {
        issues.push(ValidationIssue::error(
            name,
            format!(
                "dice reserve max ({}) should be bestiality + 1 ({})",
                state.dice_reserve.max,
                state.bestiality.saturating_add(1)
            ),
        ));
    }

    for (label, pool) in [
        ("dice reserve", state.dice_reserve),
        ("understanding points", state.understanding_points),
        ("health", state.health.pool),
    ] {
        if pool.value > pool.max {
            issues.push(ValidationIssue::error(
                name,
                format!("{label} {} exceeds max {}", pool.value, pool.max),
            ));
        }
    }

    for item in &state.items {
        if item.usable_by(state) {
            continue;
        }
        let lineage = match &item.kind {
            ItemKind::Power { lineage, .. } => lineage.to_string(),
            ItemKind::Advantage { lineage, .. } => lineage.to_string(),
            _ => continue,
        };
        issues.push(ValidationIssue::warning(
            &item.name,
            format!(
                "{} belongs to {lineage}, {} is {}",
                item.kind_name(),
                state.name,
                state.lineage
            ),
        ));
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Bonus, EffectTag, Item, LineageAffinity};
    use crate::power::PowerCost;
    use crate::sheet::{Lineage, Pool, Skill};

    #[test]
    fn fresh_character_is_valid() {
        let c = CharacterState::new("Mira", Lineage::Upior).with_skill(Skill::Occultism, 2);
        let issues = validate_character(&c);
        assert!(issues.is_empty(), "unexpected issues: {issues:?}");
    }

    #[test]
    fn broken_balance_errors() {
        let mut c = CharacterState::new("Mira", Lineage::Upior);
        c.humanity = 9;
        let issues = validate_character(&c);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error);
        assert!(issues[0].message.contains("must equal 12"));
    }

    #[test]
    fn reserve_drift_errors() {
        let mut c = CharacterState::new("Mira", Lineage::Upior);
        c.dice_reserve = Pool::new(4);
        let issues = validate_character(&c);
        assert!(
            issues
                .iter()
                .any(|i| i.is_error && i.message.contains("should be bestiality + 1 (7)"))
        );
    }

    #[test]
    fn extreme_attributes_report_instead_of_overflowing() {
        let mut c = CharacterState::new("Mira", Lineage::Upior);
        c.humanity = u32::MAX;
        c.bestiality = u32::MAX;
        let issues = validate_character(&c);
        assert!(issues.iter().any(|i| i.message.contains("must equal 12")));
        assert!(issues.iter().any(|i| i.message.contains("exceeds 12")));
        assert!(issues.iter().any(|i| i.message.contains("should be bestiality + 1")));
    }

    #[test]
    fn pool_over_max_errors() {
        let mut c = CharacterState::new("Mira", Lineage::Upior);
        c.health.pool.value = 14;
        let issues = validate_character(&c);
        assert!(
            issues
                .iter()
                .any(|i| i.is_error && i.message == "health 14 exceeds max 10")
        );
    }

    #[test]
    fn wrong_lineage_items_warn() {
        let c = CharacterState::new("Mira", Lineage::Upior)
            .with_item(Item::power("Howl", Lineage::Wilkolaki, PowerCost::default()))
            .with_item(Item::advantage(
                "Bestial Strength",
                LineageAffinity::Wilkolaki,
                EffectTag::BestialStrength,
                Bonus::default(),
            ));
        let issues = validate_character(&c);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| !i.is_error));
        assert_eq!(
            issues[0].to_string(),
            "warning: Howl: power belongs to Wilkołaki, Mira is Upiór"
        );
    }

    #[test]
    fn prepare_derived_clears_errors() {
        let mut c = CharacterState::new("Mira", Lineage::Upior);
        c.humanity = 2;
        c.bestiality = 4;
        c.dice_reserve = Pool { value: 9, max: 9 };
        assert!(!validate_character(&c).is_empty());
        c.prepare_derived();
        assert!(validate_character(&c).is_empty());
    }
}
