#![forbid(unsafe_code)]

//! Explicit periodic timer handles.
//!
//! The repeat controller owns one timer per active session, stored here as
//! an inspectable table instead of opaque framework handles. This makes
//! cleanup a testable property: every armed timer must be cleared exactly
//! once, and [`TimerTable::cleared_count`] lets tests prove it.
//!
//! # Invariants
//!
//! 1. Deadlines chain off the previous deadline (`deadline + period`, never
//!    `now + period`), so ticks stay strictly periodic regardless of how
//!    coarsely the host drives time.
//! 2. `next_due` returns handles in deadline order, ties broken by arm
//!    order.
//! 3. Clearing an unknown handle is a controller bug: it returns `false`
//!    and trips a debug assertion.

use std::time::Duration;

use ahash::AHashMap;
use web_time::Instant;

/// Opaque handle to an armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry {
    deadline: Instant,
    period: Duration,
}

/// Table of armed periodic timers.
#[derive(Debug, Default)]
pub struct TimerTable {
    entries: AHashMap<TimerId, Entry>,
    next_id: u64,
    cleared: u64,
}

impl TimerTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a periodic timer with its first deadline and period.
    pub fn arm(&mut self, deadline: Instant, period: Duration) -> TimerId {
        debug_assert!(!period.is_zero(), "periodic timer with zero period");
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, Entry { deadline, period });
        id
    }

    /// Clear a timer. Returns whether the handle was live.
    ///
    /// Each handle must be cleared exactly once; a `false` return means the
    /// caller lost track of ownership.
    pub fn clear(&mut self, id: TimerId) -> bool {
        let live = self.entries.remove(&id).is_some();
        debug_assert!(live, "timer {id:?} cleared twice or never armed");
        if live {
            self.cleared += 1;
        }
        live
    }

    /// The earliest timer whose deadline is at or before `now`.
    ///
    /// Ties are broken by arm order so interleaved sessions drain
    /// deterministically.
    #[must_use]
    pub fn next_due(&self, now: Instant) -> Option<TimerId> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.deadline <= now)
            .min_by_key(|(id, entry)| (entry.deadline, **id))
            .map(|(id, _)| *id)
    }

    /// Push a timer's deadline forward one period.
    pub fn reschedule(&mut self, id: TimerId) {
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.deadline += entry.period;
        } else {
            debug_assert!(false, "reschedule of cleared timer {id:?}");
        }
    }

    /// Current deadline of a live timer.
    #[must_use]
    pub fn deadline(&self, id: TimerId) -> Option<Instant> {
        self.entries.get(&id).map(|entry| entry.deadline)
    }

    /// Number of live timers.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.entries.len()
    }

    /// Total timers cleared over the table's lifetime.
    #[must_use]
    pub fn cleared_count(&self) -> u64 {
        self.cleared
    }
}
