//! Sources of die faces.

use std::collections::VecDeque;

use rand::Rng;
use rand::rngs::StdRng;

use super::Die;

/// Something that can produce a face for a die.
pub trait Roller {
    /// Roll the die, returning a value from 1 to `die.sides()`.
    fn roll(&mut self, die: Die) -> u32;
}

impl Roller for StdRng {
    fn roll(&mut self, die: Die) -> u32 {
        self.random_range(1..=die.sides())
    }
}

/// Predetermined faces, consumed in order.
///
/// Used to replay results that were rolled elsewhere (for instance by the
/// host's own dice roller) and in tests. Faces are clamped to the die's
/// range. Once exhausted, every roll shows 1.
#[derive(Debug, Clone, Default)]
pub struct FixedRolls {
    faces: VecDeque<u32>,
}

impl FixedRolls {
    /// Queue the given faces.
    pub fn new(faces: impl IntoIterator<Item = u32>) -> Self {
        Self {
            faces: faces.into_iter().collect(),
        }
    }

    /// Append another face to the queue.
    pub fn push(&mut self, face: u32) {
        self.faces.push_back(face);
    }

    /// Number of faces left.
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}

impl Roller for FixedRolls {
    fn roll(&mut self, die: Die) -> u32 {
        self.faces
            .pop_front()
            .unwrap_or(1)
            .clamp(1, die.sides())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn std_rng_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            assert!((1..=12).contains(&rng.roll(Die::D12)));
            assert!((1..=6).contains(&rng.roll(Die::D6)));
        }
    }

    #[test]
    fn std_rng_deterministic_with_seed() {
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        for _ in 0..20 {
            assert_eq!(a.roll(Die::D12), b.roll(Die::D12));
        }
    }

    #[test]
    fn fixed_rolls_in_order() {
        let mut rolls = FixedRolls::new([3, 11]);
        assert_eq!(rolls.remaining(), 2);
        assert_eq!(rolls.roll(Die::D12), 3);
        assert_eq!(rolls.roll(Die::D12), 11);
        assert_eq!(rolls.remaining(), 0);
    }

    #[test]
    fn fixed_rolls_clamp_and_exhaust() {
        let mut rolls = FixedRolls::new([12, 0]);
        assert_eq!(rolls.roll(Die::D6), 6);
        assert_eq!(rolls.roll(Die::D6), 1);
        assert_eq!(rolls.roll(Die::D6), 1);
        rolls.push(4);
        assert_eq!(rolls.roll(Die::D6), 4);
    }
}
