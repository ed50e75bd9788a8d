#![forbid(unsafe_code)]

//! Time sources for the repeat controller.
//!
//! Production code uses [`MonotonicClock`] (`web_time::Instant`, so the
//! crate stays portable to wasm targets). Tests and deterministic replay use
//! [`ManualClock`], which only moves when explicitly advanced. Clones of a
//! `ManualClock` share the same underlying instant, so a test can hand one
//! clone to a [`Stepper`](crate::Stepper) and keep another to drive time.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use web_time::Instant;

/// A source of monotonic instants.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// The real monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only advances when told to.
///
/// Single-threaded by construction (`Rc<Cell<_>>`), matching the cooperative
/// execution model of the controller.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    /// A manual clock anchored at the current real instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// The clock's current instant.
    #[must_use]
    pub fn now(&self) -> Instant {
        self.now.get()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}
