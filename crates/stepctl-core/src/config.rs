#![forbid(unsafe_code)]

//! Stepper configuration: the host-supplied snapshot of value, bounds, step
//! size, and auto-repeat settings.
//!
//! Construction never validates; hosts validate explicitly via
//! [`StepperConfig::validate`] at construction time and again on every
//! reconfiguration. A failed validation must keep the previous configuration
//! active (no partial application).

use std::time::Duration;

use crate::bounds::{self, StepSnapshot};
use crate::error::ConfigError;

/// Default auto-repeat interval while a button is held.
pub const DEFAULT_AUTO_TAP_INTERVAL: Duration = Duration::from_millis(250);

/// Host-supplied stepper configuration.
///
/// `value` is owned by the host and read-only to the control core; the core
/// only ever proposes `value ± step_size` deltas.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepperConfig {
    /// Current numeric value.
    pub value: f64,
    /// Inclusive lower bound; `-inf` means unbounded.
    pub min_value: f64,
    /// Inclusive upper bound; `+inf` means unbounded.
    pub max_value: f64,
    /// Magnitude added/subtracted per step. Finite and strictly positive.
    pub step_size: f64,
    /// When set, neither clicks nor presses produce emissions.
    pub disabled: bool,
    /// Whether a sustained press triggers auto-repeat at all.
    pub hold_to_auto_tap: bool,
    /// Time between repeated emissions while held.
    pub auto_tap_interval: Duration,
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self {
            value: 0.0,
            min_value: f64::NEG_INFINITY,
            max_value: f64::INFINITY,
            step_size: 1.0,
            disabled: false,
            hold_to_auto_tap: true,
            auto_tap_interval: DEFAULT_AUTO_TAP_INTERVAL,
        }
    }
}

impl StepperConfig {
    /// Configuration with the given starting value and no bounds.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    pub fn min_value(mut self, min: f64) -> Self {
        self.min_value = min;
        self
    }

    pub fn max_value(mut self, max: f64) -> Self {
        self.max_value = max;
        self
    }

    pub fn step_size(mut self, step: f64) -> Self {
        self.step_size = step;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn hold_to_auto_tap(mut self, hold: bool) -> Self {
        self.hold_to_auto_tap = hold;
        self
    }

    pub fn auto_tap_interval(mut self, interval: Duration) -> Self {
        self.auto_tap_interval = interval;
        self
    }

    /// Validate the whole configuration.
    ///
    /// Checks the bounds/step invariants (see [`bounds::validate`]) plus the
    /// repeat-interval constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        bounds::validate(self.min_value, self.max_value, self.step_size)?;
        if self.auto_tap_interval.is_zero() {
            return Err(ConfigError::InvalidRepeatInterval);
        }
        Ok(())
    }

    /// Derived snapshot consumed by boundary predicates and repeat ticks.
    #[must_use]
    pub fn snapshot(&self) -> StepSnapshot {
        StepSnapshot {
            value: self.value,
            min_value: self.min_value,
            max_value: self.max_value,
            step_size: self.step_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::Direction;

    #[test]
    fn defaults_are_unbounded_step_one() {
        let config = StepperConfig::default();
        assert_eq!(config.min_value, f64::NEG_INFINITY);
        assert_eq!(config.max_value, f64::INFINITY);
        assert_eq!(config.step_size, 1.0);
        assert!(!config.disabled);
        assert!(config.hold_to_auto_tap);
        assert_eq!(config.auto_tap_interval, Duration::from_millis(250));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_chain() {
        let config = StepperConfig::new(42.0)
            .min_value(0.0)
            .max_value(50.0)
            .step_size(2.0)
            .auto_tap_interval(Duration::from_millis(100));
        assert_eq!(config.value, 42.0);
        assert_eq!(config.max_value, 50.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_inverted_bounds() {
        let config = StepperConfig::new(0.0).min_value(2.0).max_value(0.0);
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::BoundsInverted { .. }
        ));
    }

    #[test]
    fn validate_rejects_misaligned_max() {
        let config = StepperConfig::new(0.0).step_size(2.0).max_value(3.0);
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::MaxNotMultipleOfStep { .. }
        ));
    }

    #[test]
    fn validate_rejects_zero_interval() {
        let config = StepperConfig::new(0.0).auto_tap_interval(Duration::ZERO);
        assert_eq!(config.validate().unwrap_err(), ConfigError::InvalidRepeatInterval);
    }

    #[test]
    fn snapshot_mirrors_config() {
        let config = StepperConfig::new(10.0).min_value(0.0).max_value(20.0);
        let snap = config.snapshot();
        assert_eq!(snap.value, 10.0);
        assert_eq!(snap.proposed(Direction::Increment), 11.0);
        assert!(snap.can_increment());
        assert!(snap.can_decrement());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let config = StepperConfig::new(7.0).min_value(0.0).max_value(14.0).step_size(7.0);
        let json = serde_json::to_string(&config).unwrap();
        let back: StepperConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
