//! The Balance Eternal: humanity and bestiality always sum to twelve.
//!
//! Bestiality is the source of truth. Whenever it moves, humanity and the
//! dice reserve maximum follow.

use tracing::warn;

use super::{BALANCE_TOTAL, CharacterState};
use crate::ledger::{LedgerEvent, Resource};

impl CharacterState {
    /// Repair a broken balance. Returns true if anything changed.
    ///
    /// Humanity is recomputed from bestiality; out-of-range bestiality is
    /// pinned to the nearest extreme. Does nothing on a balanced state.
    pub fn enforce_balance(&mut self) -> bool {
        if self.humanity.checked_add(self.bestiality) == Some(BALANCE_TOTAL)
            && self.bestiality <= BALANCE_TOTAL
        {
            return false;
        }
        let (humanity, bestiality) = (self.humanity, self.bestiality);
        self.bestiality = self.bestiality.min(BALANCE_TOTAL);
        self.humanity = BALANCE_TOTAL - self.bestiality;
        warn!(
            character = %self.id,
            humanity_before = humanity,
            bestiality_before = bestiality,
            humanity = self.humanity,
            bestiality = self.bestiality,
            "balance repaired"
        );
        true
    }

    /// Set bestiality, clamped to 0..=12, and cascade.
    pub fn set_bestiality(&mut self, value: u32, reason: &str) -> LedgerEvent {
        let before = self.bestiality;
        self.bestiality = value.min(BALANCE_TOTAL);
        self.humanity = BALANCE_TOTAL - self.bestiality;
        self.sync_reserve_max();
        LedgerEvent::record(
            self.id,
            Resource::Bestiality,
            before,
            self.bestiality,
            reason,
        )
    }

    /// Set humanity, clamped to 0..=12, and cascade.
    pub fn set_humanity(&mut self, value: u32, reason: &str) -> LedgerEvent {
        self.set_bestiality(BALANCE_TOTAL - value.min(BALANCE_TOTAL), reason)
    }

    /// Move bestiality by `delta`, staying inside 0..=12.
    pub fn shift_bestiality(&mut self, delta: i32, reason: &str) -> LedgerEvent {
        let target = self.bestiality.saturating_add_signed(delta);
        self.set_bestiality(target, reason)
    }

    /// Reserve maximum is bestiality plus one. The value is pulled down to fit.
    pub fn sync_reserve_max(&mut self) {
        self.dice_reserve.set_max(self.bestiality.saturating_add(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{Lineage, Pool};
    use proptest::prelude::*;

    fn mira() -> CharacterState {
        CharacterState::new("Mira", Lineage::Upior)
    }

    #[test]
    fn enforce_recomputes_humanity_from_bestiality() {
        let mut c = mira();
        c.humanity = 9;
        c.bestiality = 5;
        assert!(c.enforce_balance());
        assert_eq!((c.humanity, c.bestiality), (7, 5));
    }

    #[test]
    fn enforce_pins_bestiality_overflow() {
        let mut c = mira();
        c.humanity = 0;
        c.bestiality = 15;
        assert!(c.enforce_balance());
        assert_eq!((c.humanity, c.bestiality), (0, 12));
    }

    #[test]
    fn enforce_is_noop_on_balanced_state() {
        let mut c = mira();
        let before = c.clone();
        assert!(!c.enforce_balance());
        assert_eq!(c, before);
    }

    #[test]
    fn set_bestiality_cascades() {
        let mut c = mira();
        let event = c.set_bestiality(9, "frenzy");
        assert_eq!((c.humanity, c.bestiality), (3, 9));
        assert_eq!(c.dice_reserve.max, 10);
        assert_eq!(c.dice_reserve.value, 7);
        assert_eq!((event.before, event.after), (6, 9));
        assert_eq!(event.resource, Resource::Bestiality);
    }

    #[test]
    fn lowering_bestiality_clamps_reserve() {
        let mut c = mira();
        c.set_bestiality(2, "redemption");
        assert_eq!(c.dice_reserve, Pool::new(3));
    }

    #[test]
    fn set_humanity_clamps() {
        let mut c = mira();
        c.set_humanity(40, "saintly");
        assert_eq!((c.humanity, c.bestiality), (12, 0));
        assert_eq!(c.dice_reserve.max, 1);
    }

    #[test]
    fn shift_stops_at_extremes() {
        let mut c = mira().with_bestiality(11);
        c.shift_bestiality(3, "umbral die");
        assert_eq!(c.bestiality, 12);
        c.shift_bestiality(-20, "penance");
        assert_eq!(c.bestiality, 0);
        assert_eq!(c.humanity, 12);
    }

    proptest! {
        #[test]
        fn every_setter_keeps_the_balance(values in prop::collection::vec((0u32..30, any::<bool>()), 1..20)) {
            let mut c = mira();
            for (v, via_humanity) in values {
                if via_humanity {
                    c.set_humanity(v, "test");
                } else {
                    c.set_bestiality(v, "test");
                }
                prop_assert_eq!(c.humanity + c.bestiality, BALANCE_TOTAL);
                prop_assert_eq!(c.dice_reserve.max, c.bestiality + 1);
                prop_assert!(c.dice_reserve.value <= c.dice_reserve.max);
            }
        }

        #[test]
        fn enforce_is_idempotent(humanity in 0u32..30, bestiality in 0u32..30) {
            let mut c = mira();
            c.humanity = humanity;
            c.bestiality = bestiality;
            c.enforce_balance();
            let once = c.clone();
            prop_assert!(!c.enforce_balance());
            prop_assert_eq!(c, once);
        }

        #[test]
        fn enforce_heals_any_snapshot(humanity in any::<u32>(), bestiality in any::<u32>()) {
            let mut c = mira();
            c.humanity = humanity;
            c.bestiality = bestiality;
            c.enforce_balance();
            prop_assert_eq!(c.humanity + c.bestiality, BALANCE_TOTAL);
            prop_assert_eq!(c.bestiality, bestiality.min(BALANCE_TOTAL));
        }
    }
}
