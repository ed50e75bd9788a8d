#![forbid(unsafe_code)]

//! Timer-driven layer of the stepctl stepper control.
//!
//! Converts a sustained "press" input into a periodic stream of step
//! proposals while respecting the host's current boundary state. The model
//! is single-threaded and cooperative: the host drives time by calling
//! [`Stepper::advance_to`] (or [`RepeatController::run_due`] directly) from
//! its event loop, and no two operations ever interleave.
//!
//! Two independent emission paths exist by design:
//!
//! - **Immediate click** ([`Stepper::click`]): a plain tap emits exactly one
//!   proposal, never touching the timer machinery.
//! - **Auto-repeat** ([`RepeatController`]): holding past one interval emits
//!   one proposal per interval until release, cancel, or a boundary.
//!
//! Timer handles are an explicit, inspectable table ([`timer::TimerTable`])
//! so that exactly-once cleanup across every exit path is a testable
//! property rather than a framework side effect.

pub mod clock;
pub mod repeat;
pub mod stepper;
pub mod timer;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use repeat::{RepeatController, RepeatHost, SessionPhase, StepEvent};
pub use stepper::Stepper;
pub use timer::{TimerId, TimerTable};
