//! Random initiative rolls for ranged entities.
//!
//! Rolls must be unpredictable at the table, so the production roller draws
//! from the operating system's CSPRNG instead of a seeded generator. Tests
//! inject their own [`InitiativeRoller`].

use rand::rngs::OsRng;
use rand::{Rng, TryRngCore};

/// Source of initiative values for ranged specs.
pub trait InitiativeRoller {
    /// Draw a value uniformly from `[min, max]` inclusive.
    ///
    /// Callers guarantee `min <= max`.
    fn roll(&self, min: i32, max: i32) -> i32;
}

/// Roller backed by the operating system's secure random source.
#[derive(Clone, Copy, Debug, Default)]
pub struct SecureRoller;

impl InitiativeRoller for SecureRoller {
    fn roll(&self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        OsRng.unwrap_err().random_range(min..=max)
    }
}

impl<F> InitiativeRoller for F
where
    F: Fn(i32, i32) -> i32,
{
    fn roll(&self, min: i32, max: i32) -> i32 {
        self(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secure_roller_stays_within_bounds() {
        let roller = SecureRoller;
        for _ in 0..500 {
            let value = roller.roll(-3, 4);
            assert!((-3..=4).contains(&value));
        }
    }

    #[test]
    fn degenerate_range_returns_its_only_value() {
        assert_eq!(SecureRoller.roll(7, 7), 7);
    }

    #[test]
    fn closures_act_as_rollers() {
        let highest = |_min: i32, max: i32| max;
        assert_eq!(highest.roll(1, 20), 20);
    }
}
