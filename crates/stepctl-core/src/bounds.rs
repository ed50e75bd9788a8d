#![forbid(unsafe_code)]

//! Bounds/step validation and derived boundary predicates.
//!
//! # Invariants
//!
//! 1. `min_value <= max_value` whenever a configuration is settled.
//! 2. A finite `max_value` is an exact multiple of `step_size`, so stepping
//!    from an aligned value can land exactly on the max.
//! 3. Boundary predicates are pure functions of the host's latest snapshot;
//!    nothing here caches or counts.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Inverted bounds | `min > max` | `ConfigError::BoundsInverted` |
//! | Misaligned max | finite `max % step != 0` | `ConfigError::MaxNotMultipleOfStep` |
//! | Bad step | `step <= 0` or non-finite | `ConfigError::InvalidStepSize` |
//!
//! Validation is a pure predicate: no side effects, no partial application.
//! A violation is a host programming error, never a retryable condition.

use crate::error::ConfigError;

/// Which of the two stepper buttons a signal refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Increment,
    Decrement,
}

impl Direction {
    /// The other direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Increment => Self::Decrement,
            Self::Decrement => Self::Increment,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Increment => f.write_str("increment"),
            Self::Decrement => f.write_str("decrement"),
        }
    }
}

/// The host's latest committed view of the value and its bounds.
///
/// Re-read before every repeat tick. The payload of an emission is always
/// derived from the snapshot current at emission time, never from an
/// internal counter: if the host ignores emissions, the same payload
/// repeats, which is intentional and observable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSnapshot {
    pub value: f64,
    pub min_value: f64,
    pub max_value: f64,
    pub step_size: f64,
}

impl StepSnapshot {
    /// Whether one increment step stays within `max_value`.
    ///
    /// With an unbounded max this is true for any finite value.
    #[must_use]
    pub fn can_increment(&self) -> bool {
        if self.max_value == f64::INFINITY {
            return self.value.is_finite();
        }
        self.value + self.step_size <= self.max_value
    }

    /// Whether one decrement step stays within `min_value`.
    #[must_use]
    pub fn can_decrement(&self) -> bool {
        if self.min_value == f64::NEG_INFINITY {
            return self.value.is_finite();
        }
        self.value - self.step_size >= self.min_value
    }

    /// Boundary predicate for the given direction.
    #[must_use]
    pub fn can_step(&self, direction: Direction) -> bool {
        match direction {
            Direction::Increment => self.can_increment(),
            Direction::Decrement => self.can_decrement(),
        }
    }

    /// The value one step away in the given direction.
    #[must_use]
    pub fn proposed(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Increment => self.value + self.step_size,
            Direction::Decrement => self.value - self.step_size,
        }
    }
}

/// Validate a `(min, max, step)` triple.
///
/// Called at construction and whenever `max_value` or `step_size` changes,
/// each re-checked against the other's current value. The multiple check
/// uses the plain floating remainder with no epsilon; callers who need
/// tolerance should align their configuration to exactly representable
/// values (integers, or integer multiples of a power of two).
pub fn validate(min_value: f64, max_value: f64, step_size: f64) -> Result<(), ConfigError> {
    if !(step_size.is_finite() && step_size > 0.0) {
        return Err(ConfigError::InvalidStepSize { step: step_size });
    }
    if min_value > max_value {
        return Err(ConfigError::BoundsInverted {
            min: min_value,
            max: max_value,
        });
    }
    if max_value.is_finite() && max_value % step_size != 0.0 {
        return Err(ConfigError::MaxNotMultipleOfStep {
            max: max_value,
            step: step_size,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn snapshot(value: f64, min: f64, max: f64, step: f64) -> StepSnapshot {
        StepSnapshot {
            value,
            min_value: min,
            max_value: max,
            step_size: step,
        }
    }

    // ── validate ────────────────────────────────────────────────────

    #[test]
    fn rejects_inverted_bounds() {
        let err = validate(2.0, 0.0, 1.0).unwrap_err();
        assert_eq!(err, ConfigError::BoundsInverted { min: 2.0, max: 0.0 });
    }

    #[test]
    fn accepts_equal_bounds() {
        assert!(validate(5.0, 5.0, 1.0).is_ok());
    }

    #[test]
    fn accepts_unbounded_defaults() {
        assert!(validate(f64::NEG_INFINITY, f64::INFINITY, 1.0).is_ok());
    }

    #[test]
    fn rejects_max_not_multiple_of_step() {
        let err = validate(0.0, 3.0, 2.0).unwrap_err();
        assert_eq!(err, ConfigError::MaxNotMultipleOfStep { max: 3.0, step: 2.0 });
    }

    #[test]
    fn accepts_max_multiple_of_step() {
        assert!(validate(0.0, 4.0, 2.0).is_ok());
    }

    #[test]
    fn infinite_max_skips_multiple_check() {
        assert!(validate(0.0, f64::INFINITY, 3.0).is_ok());
    }

    #[test]
    fn negative_max_multiple_is_accepted() {
        assert!(validate(f64::NEG_INFINITY, -4.0, 2.0).is_ok());
    }

    #[test]
    fn rejects_zero_step() {
        assert_eq!(
            validate(0.0, 10.0, 0.0).unwrap_err(),
            ConfigError::InvalidStepSize { step: 0.0 }
        );
    }

    #[test]
    fn rejects_negative_step() {
        assert!(matches!(
            validate(0.0, 10.0, -1.0).unwrap_err(),
            ConfigError::InvalidStepSize { .. }
        ));
    }

    #[test]
    fn rejects_nan_step() {
        assert!(matches!(
            validate(0.0, 10.0, f64::NAN).unwrap_err(),
            ConfigError::InvalidStepSize { .. }
        ));
    }

    proptest! {
        #[test]
        fn inverted_bounds_always_fail(a in -1.0e6f64..1.0e6, gap in 1.0e-3f64..1.0e3) {
            let err = validate(a + gap, a, 1.0).unwrap_err();
            prop_assert!(matches!(err, ConfigError::BoundsInverted { .. }), "expected BoundsInverted, got {:?}", err);
        }

        #[test]
        fn integer_multiples_always_pass(k in 1i64..10_000, step in 1i64..100) {
            let max = (k * step) as f64;
            prop_assert!(validate(0.0, max, step as f64).is_ok());
        }

        #[test]
        fn offset_from_multiple_always_fails(k in 1i64..10_000) {
            // max = 2k + 1 is never a multiple of 2.
            let max = (2 * k + 1) as f64;
            let err = validate(0.0, max, 2.0).unwrap_err();
            prop_assert!(matches!(err, ConfigError::MaxNotMultipleOfStep { .. }), "expected MaxNotMultipleOfStep, got {:?}", err);
        }
    }

    // ── boundary predicates ─────────────────────────────────────────

    #[test]
    fn can_increment_below_max() {
        assert!(snapshot(41.0, 0.0, 42.0, 1.0).can_increment());
    }

    #[test]
    fn cannot_increment_at_max() {
        assert!(!snapshot(42.0, 0.0, 42.0, 1.0).can_increment());
    }

    #[test]
    fn cannot_increment_above_max() {
        assert!(!snapshot(43.0, 0.0, 42.0, 1.0).can_increment());
    }

    #[test]
    fn cannot_increment_when_step_overshoots_max() {
        // 4 + 3 > 6: the step must land inside the bound, not merely start there.
        assert!(!snapshot(4.0, 0.0, 6.0, 3.0).can_increment());
    }

    #[test]
    fn can_decrement_above_min() {
        assert!(snapshot(43.0, 42.0, f64::INFINITY, 1.0).can_decrement());
    }

    #[test]
    fn cannot_decrement_at_min() {
        assert!(!snapshot(42.0, 42.0, f64::INFINITY, 1.0).can_decrement());
    }

    #[test]
    fn unbounded_max_allows_any_finite_value() {
        assert!(snapshot(1.0e300, f64::NEG_INFINITY, f64::INFINITY, 1.0).can_increment());
    }

    #[test]
    fn unbounded_max_rejects_infinite_value() {
        assert!(!snapshot(f64::INFINITY, 0.0, f64::INFINITY, 1.0).can_increment());
    }

    #[test]
    fn proposed_applies_step_in_direction() {
        let snap = snapshot(10.0, 0.0, 100.0, 5.0);
        assert_eq!(snap.proposed(Direction::Increment), 15.0);
        assert_eq!(snap.proposed(Direction::Decrement), 5.0);
    }

    #[test]
    fn direction_opposite() {
        assert_eq!(Direction::Increment.opposite(), Direction::Decrement);
        assert_eq!(Direction::Decrement.opposite(), Direction::Increment);
    }

    #[test]
    fn direction_display() {
        assert_eq!(Direction::Increment.to_string(), "increment");
        assert_eq!(Direction::Decrement.to_string(), "decrement");
    }
}
