#![forbid(unsafe_code)]

//! Rendering-agnostic core for the stepctl stepper control.
//!
//! A stepper is two buttons (increment/decrement) adjusting a bounded numeric
//! value. This crate holds the parts that are independent of any rendering
//! surface: the configuration model, the bounds/step validator, and the
//! derived boundary predicates. The timer-driven auto-repeat machinery lives
//! in `stepctl-runtime`.
//!
//! The control is stateless with respect to the numeric value: the host owns
//! `value` and decides whether to apply each proposed step. Everything here
//! only reads host-supplied snapshots.

pub mod bounds;
pub mod config;
pub mod error;

pub use bounds::{Direction, StepSnapshot, validate};
pub use config::StepperConfig;
pub use error::ConfigError;
