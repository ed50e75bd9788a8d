#![forbid(unsafe_code)]

//! Host-side stepper glue: configuration lifecycle plus signal routing.
//!
//! A [`Stepper`] is what a button-rendering layer actually holds. It owns
//! the validated [`StepperConfig`] and a [`RepeatController`], and exposes:
//!
//! - validate-or-fail construction and an explicit [`reconfigure`] entry
//!   point (validation runs synchronously on every configuration change;
//!   a failure leaves the previous configuration active),
//! - the immediate click path ([`click`]) for single taps,
//! - the press/release/cancel signals that feed the repeat controller,
//! - [`advance_to`] for driving due ticks from the host's event loop,
//! - unconditional timer cleanup on [`teardown`] and on drop.
//!
//! The stepper never applies a proposed value itself: emissions are
//! returned to the caller, and only [`set_value`] commits.
//!
//! [`reconfigure`]: Stepper::reconfigure
//! [`click`]: Stepper::click
//! [`advance_to`]: Stepper::advance_to
//! [`set_value`]: Stepper::set_value

use stepctl_core::bounds::{Direction, StepSnapshot};
use stepctl_core::config::StepperConfig;
use stepctl_core::error::ConfigError;
use web_time::Instant;

use crate::clock::{Clock, MonotonicClock};
use crate::repeat::{RepeatController, RepeatHost, StepEvent};

/// A stepper control: validated configuration plus auto-repeat machinery.
#[derive(Debug)]
pub struct Stepper<C: Clock = MonotonicClock> {
    config: StepperConfig,
    repeat: RepeatController<C>,
}

impl Stepper<MonotonicClock> {
    /// Build a stepper over the real clock. Fails if the configuration is
    /// invalid; no control exists until validation passes.
    pub fn new(config: StepperConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, MonotonicClock)
    }
}

impl<C: Clock> Stepper<C> {
    /// Build a stepper over an explicit time source.
    pub fn with_clock(config: StepperConfig, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            repeat: RepeatController::with_clock(clock),
        })
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &StepperConfig {
        &self.config
    }

    /// Replace the configuration, validating first.
    ///
    /// On failure the previous configuration stays active (no partial
    /// application). Reconfiguring to `disabled`, or switching
    /// `hold_to_auto_tap` off, cancels every active repeat session;
    /// disabling is an explicit signal, never polled.
    pub fn reconfigure(&mut self, config: StepperConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if config.disabled || !config.hold_to_auto_tap {
            self.repeat.teardown();
        }
        self.config = config;
        Ok(())
    }

    /// Commit a value. This is the only way the snapshot seen by later
    /// ticks changes; emissions the host ignores are never applied.
    pub fn set_value(&mut self, value: f64) {
        self.config.value = value;
    }

    /// The currently committed value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.config.value
    }

    /// Whether the increment button should be operable.
    #[must_use]
    pub fn can_increment(&self) -> bool {
        !self.config.disabled && self.config.snapshot().can_increment()
    }

    /// Whether the decrement button should be operable.
    #[must_use]
    pub fn can_decrement(&self) -> bool {
        !self.config.disabled && self.config.snapshot().can_decrement()
    }

    /// Immediate single-tap emission path.
    ///
    /// Returns the proposed value, or `None` when the control is disabled
    /// or the boundary predicate forbids the step. Independent of the
    /// auto-repeat timers: a tap emits exactly once regardless of
    /// `hold_to_auto_tap` or hold duration.
    #[must_use]
    pub fn click(&self, direction: Direction) -> Option<f64> {
        if self.config.disabled {
            return None;
        }
        let snapshot = self.config.snapshot();
        if !snapshot.can_step(direction) {
            return None;
        }
        Some(snapshot.proposed(direction))
    }

    /// Press-start signal. Returns whether a repeat session began.
    pub fn press(&mut self, direction: Direction) -> bool {
        let config = self.config.clone();
        self.repeat.press(direction, &config)
    }

    /// Press-end signal.
    pub fn release(&mut self, direction: Direction) {
        self.repeat.release(direction);
    }

    /// Press-interrupted signal (pointer left the control).
    pub fn cancel(&mut self, direction: Direction) {
        self.repeat.cancel(direction);
    }

    /// Drive every repeat tick due at or before `now`, returning the
    /// emissions in order. Each tick reads the configuration as committed
    /// at that moment; apply emissions with [`set_value`](Self::set_value)
    /// between drives to step the payloads forward.
    pub fn advance_to(&mut self, now: Instant) -> Vec<StepEvent> {
        let mut host = CollectingHost {
            snapshot: self.config.snapshot(),
            events: Vec::new(),
        };
        self.repeat.run_due(now, &mut host);
        host.events
    }

    /// End every repeat session, releasing all timers. Called automatically
    /// on drop; explicit calls are idempotent.
    pub fn teardown(&mut self) {
        self.repeat.teardown();
    }

    /// The underlying repeat controller, for introspection.
    #[must_use]
    pub fn repeat(&self) -> &RepeatController<C> {
        &self.repeat
    }
}

impl<C: Clock> Drop for Stepper<C> {
    fn drop(&mut self) {
        self.repeat.teardown();
    }
}

/// Adapter presenting the stepper's own committed config as the host
/// snapshot while collecting emissions for the caller.
struct CollectingHost {
    snapshot: StepSnapshot,
    events: Vec<StepEvent>,
}

impl RepeatHost for CollectingHost {
    fn snapshot(&self) -> StepSnapshot {
        self.snapshot
    }

    fn on_step(&mut self, event: StepEvent) {
        self.events.push(event);
    }
}
