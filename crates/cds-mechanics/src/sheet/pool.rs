//! Bounded resource pools (dice reserve, understanding points, health).
//!
//! A pool is a value clamped between zero and a maximum. The maximum is
//! usually derived from other stats and may move; the value follows it
//! down but never up.

use serde::{Deserialize, Serialize};

/// Which of the character's pools an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolKind {
    /// Special dice spent as Sacred or Umbral dice.
    DiceReserve,
    /// Points accrued through investigation.
    UnderstandingPoints,
    /// Hit points.
    Health,
}

impl std::fmt::Display for PoolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DiceReserve => write!(f, "dice reserve"),
            Self::UnderstandingPoints => write!(f, "understanding points"),
            Self::Health => write!(f, "health"),
        }
    }
}

/// A numeric resource between 0 and `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pool {
    /// Current value.
    pub value: u32,
    /// Maximum value.
    pub max: u32,
}

impl Pool {
    /// Create a pool starting at its maximum.
    pub fn new(max: u32) -> Self {
        Self { value: max, max }
    }

    /// Create a pool with a starting value, clamped to `max`.
    pub fn with_value(value: u32, max: u32) -> Self {
        Self {
            value: value.min(max),
            max,
        }
    }

    /// Add to the value, silently clamping at `max`. Returns the new value.
    pub fn add(&mut self, amount: u32) -> u32 {
        self.value = self.value.saturating_add(amount).min(self.max);
        self.value
    }

    /// Remove `amount` if the pool can cover it. Returns the new value,
    /// or `None` without touching the pool.
    pub fn spend(&mut self, amount: u32) -> Option<u32> {
        let remaining = self.value.checked_sub(amount)?;
        self.value = remaining;
        Some(remaining)
    }

    /// Remove up to `amount`, stopping at zero. Returns the new value.
    pub fn drain(&mut self, amount: u32) -> u32 {
        self.value = self.value.saturating_sub(amount);
        self.value
    }

    /// Move the maximum, pulling the value down if it no longer fits.
    pub fn set_max(&mut self, max: u32) {
        self.max = max;
        self.value = self.value.min(max);
    }

    /// Pull the value back inside the bounds. Returns true if it moved.
    pub fn clamp(&mut self) -> bool {
        let before = self.value;
        self.value = self.value.min(self.max);
        before != self.value
    }

    /// Returns true if the pool is at zero.
    pub fn is_empty(&self) -> bool {
        self.value == 0
    }

    /// Returns true if the pool is at its maximum.
    pub fn is_full(&self) -> bool {
        self.value >= self.max
    }
}

impl std::fmt::Display for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.value, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_starts_at_max() {
        let p = Pool::new(7);
        assert_eq!(p.value, 7);
        assert!(p.is_full());
        assert!(!p.is_empty());
    }

    #[test]
    fn with_value_clamps_initial() {
        let p = Pool::with_value(100, 10);
        assert_eq!(p.value, 10);
    }

    #[test]
    fn add_clamps_to_max() {
        let mut p = Pool::with_value(3, 5);
        assert_eq!(p.add(10), 5);
        assert!(p.is_full());
    }

    #[test]
    fn spend_refuses_overdraw() {
        let mut p = Pool::with_value(2, 5);
        assert_eq!(p.spend(3), None);
        assert_eq!(p.value, 2);
        assert_eq!(p.spend(2), Some(0));
        assert!(p.is_empty());
    }

    #[test]
    fn drain_stops_at_zero() {
        let mut p = Pool::new(4);
        assert_eq!(p.drain(10), 0);
    }

    #[test]
    fn set_max_pulls_value_down_only() {
        let mut p = Pool::new(7);
        p.set_max(4);
        assert_eq!(p, Pool { value: 4, max: 4 });
        p.set_max(9);
        assert_eq!(p, Pool { value: 4, max: 9 });
    }

    #[test]
    fn clamp_reports_movement() {
        let mut p = Pool { value: 9, max: 3 };
        assert!(p.clamp());
        assert_eq!(p.value, 3);
        assert!(!p.clamp());
    }

    #[test]
    fn display() {
        assert_eq!(Pool::with_value(2, 7).to_string(), "2/7");
        assert_eq!(PoolKind::UnderstandingPoints.to_string(), "understanding points");
    }

    proptest! {
        #[test]
        fn add_never_exceeds_max(value in 0u32..50, max in 0u32..50, amount in 0u32..u32::MAX) {
            let mut p = Pool::with_value(value, max);
            p.add(amount);
            prop_assert!(p.value <= p.max);
        }

        #[test]
        fn spend_is_all_or_nothing(value in 0u32..50, amount in 0u32..100) {
            let mut p = Pool::new(value);
            match p.spend(amount) {
                Some(left) => prop_assert_eq!(left, value - amount),
                None => {
                    prop_assert!(amount > value);
                    prop_assert_eq!(p.value, value);
                }
            }
        }
    }
}
