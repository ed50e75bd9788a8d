#![forbid(unsafe_code)]

//! Test harness for the stepctl stepper control.
//!
//! Provides the pieces the integration suites share:
//!
//! - [`RecordingHost`]: a [`RepeatHost`] that records every emission and
//!   either commits each proposed value before the next tick
//!   ([`CommitPolicy::Apply`], mirroring a live parent) or ignores them all
//!   ([`CommitPolicy::Ignore`], mirroring a non-committing preview — the
//!   same payload then repeats, which is part of the contract).
//! - [`hold`]: the canonical press / advance N intervals / release / advance
//!   once more scenario, returning everything emitted.
//!
//! All harness time is a [`ManualClock`]; nothing here sleeps.

use stepctl_core::bounds::{Direction, StepSnapshot};
use stepctl_core::config::StepperConfig;
use stepctl_runtime::clock::ManualClock;
use stepctl_runtime::repeat::{RepeatHost, StepEvent};
use stepctl_runtime::stepper::Stepper;

/// What a [`RecordingHost`] does with each proposed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitPolicy {
    /// Never apply emissions; the snapshot stays fixed.
    Ignore,
    /// Commit each emission before the next tick reads the snapshot.
    Apply,
}

/// A host that records step emissions for later assertions.
#[derive(Debug)]
pub struct RecordingHost {
    snapshot: StepSnapshot,
    policy: CommitPolicy,
    pub events: Vec<StepEvent>,
}

impl RecordingHost {
    #[must_use]
    pub fn new(config: &StepperConfig, policy: CommitPolicy) -> Self {
        Self {
            snapshot: config.snapshot(),
            policy,
            events: Vec::new(),
        }
    }

    /// Commit a value out-of-band, as a parent applying its own update.
    pub fn set_value(&mut self, value: f64) {
        self.snapshot.value = value;
    }

    /// The currently committed value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.snapshot.value
    }

    /// The recorded emission payloads, in order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.events.iter().map(|event| event.value).collect()
    }
}

impl RepeatHost for RecordingHost {
    fn snapshot(&self) -> StepSnapshot {
        self.snapshot
    }

    fn on_step(&mut self, event: StepEvent) {
        if self.policy == CommitPolicy::Apply {
            self.snapshot.value = event.value;
        }
        self.events.push(event);
    }
}

/// Hold a button for `intervals` repeat periods, then release and let one
/// more period elapse to prove no trailing emission fires.
///
/// The stepper must have been built over a clone of `clock`. Emissions are
/// not committed back; pair with [`Stepper::set_value`] in tests that need
/// advancing payloads.
pub fn hold(
    stepper: &mut Stepper<ManualClock>,
    clock: &ManualClock,
    direction: Direction,
    intervals: u32,
) -> Vec<StepEvent> {
    let period = stepper.config().auto_tap_interval;
    stepper.press(direction);

    let mut events = Vec::new();
    for _ in 0..intervals {
        clock.advance(period);
        events.extend(stepper.advance_to(clock.now()));
    }

    stepper.release(direction);
    clock.advance(period);
    events.extend(stepper.advance_to(clock.now()));
    events
}
