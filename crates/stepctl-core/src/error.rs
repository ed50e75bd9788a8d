#![forbid(unsafe_code)]

//! Configuration failure type.
//!
//! A [`ConfigError`] is a synchronous, fatal failure raised when a stepper
//! configuration violates its invariants. It is never retried: an invalid
//! configuration is a programming error on the host's side, not a transient
//! condition. Timer and emission logic is infallible, so this is the only
//! error type in the workspace.

/// Errors from validating a stepper configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `min_value` is greater than `max_value`.
    BoundsInverted { min: f64, max: f64 },
    /// A finite `max_value` is not an exact multiple of `step_size`, so
    /// stepping from an aligned value could never land exactly on the max.
    MaxNotMultipleOfStep { max: f64, step: f64 },
    /// `step_size` is not a finite, strictly positive number.
    InvalidStepSize { step: f64 },
    /// The auto-repeat interval is zero.
    InvalidRepeatInterval,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BoundsInverted { min, max } => {
                write!(f, "min_value {min} exceeds max_value {max}")
            }
            Self::MaxNotMultipleOfStep { max, step } => {
                write!(f, "max_value {max} is not a multiple of step_size {step}")
            }
            Self::InvalidStepSize { step } => {
                write!(f, "step_size must be finite and positive, got {step}")
            }
            Self::InvalidRepeatInterval => {
                write!(f, "auto_tap_interval must be non-zero")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
