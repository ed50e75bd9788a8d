#![forbid(unsafe_code)]

//! Auto-repeat controller: a per-direction timer state machine.
//!
//! A session is born from exactly one accepted `press`, mutated only by
//! timer ticks, and destroyed by exactly one of `release`, `cancel`, a
//! boundary-exhausted tick, or `teardown`. Per session the machine is
//! `Idle -> Pressed -> Repeating -> Idle`; increment and decrement sessions
//! may coexist, each owning its own timer.
//!
//! # Invariants
//!
//! 1. Every session's timer is cleared exactly once across all exit paths.
//! 2. Ticks are strictly periodic (the first lands one interval after the
//!    press) and serialized: a tick that ends a session suppresses any
//!    further tick of that session, even within the same drain.
//! 3. Cancellation is synchronous: a deadline that was already due when
//!    `release`/`cancel`/`teardown` ran never fires afterwards.
//! 4. The controller never mutates host state. Before every tick it re-reads
//!    the host's snapshot, and the emitted payload is always
//!    `snapshot.value ± step` from that read — never a running counter.
//!
//! # Failure Modes
//!
//! | Input | Behavior |
//! |-------|----------|
//! | `press` while disabled or with auto-tap off | Rejected, no timer armed |
//! | `press` with a session already active | Rejected, existing session untouched |
//! | `release`/`cancel` with no session | No-op |
//! | Tick with boundary predicate false | Session ends, nothing emitted |

use ahash::AHashMap;
use stepctl_core::bounds::{Direction, StepSnapshot};
use stepctl_core::config::StepperConfig;
use web_time::Instant;

use crate::clock::{Clock, MonotonicClock};
use crate::timer::{TimerId, TimerTable};

/// One repeated step proposal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepEvent {
    pub direction: Direction,
    /// Proposed new value, `snapshot.value ± step_size` at emission time.
    pub value: f64,
    /// 1-based tick index within the session.
    pub tick: u64,
}

/// Host seam consumed at every tick.
///
/// The controller reads `snapshot` afresh before each tick and delivers
/// emissions through `on_step`. Whether an emission is actually applied to
/// the value is entirely the host's decision; an ignoring host sees the
/// same payload repeat, by design.
pub trait RepeatHost {
    fn snapshot(&self) -> StepSnapshot;
    fn on_step(&mut self, event: StepEvent);
}

/// Session lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Press accepted, no tick has emitted yet.
    Pressed,
    /// At least one tick has emitted.
    Repeating,
}

#[derive(Debug)]
struct Session {
    timer: TimerId,
    phase: SessionPhase,
    ticks_emitted: u64,
}

/// Why a session ended, for logging.
#[derive(Debug, Clone, Copy)]
enum StopReason {
    Released,
    Cancelled,
    Boundary,
    Teardown,
}

/// Timer-driven auto-repeat state machine.
///
/// Owns the session map and every timer handle in it; no other component
/// may arm or clear them. Single-threaded and cooperative: the host calls
/// [`run_due`](Self::run_due) from its event loop and no two operations
/// interleave.
#[derive(Debug)]
pub struct RepeatController<C: Clock = MonotonicClock> {
    clock: C,
    timers: TimerTable,
    sessions: AHashMap<Direction, Session>,
}

impl RepeatController<MonotonicClock> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock)
    }
}

impl Default for RepeatController<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> RepeatController<C> {
    /// Controller over an explicit time source.
    #[must_use]
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            timers: TimerTable::new(),
            sessions: AHashMap::new(),
        }
    }

    /// Start a session for `direction`, if allowed.
    ///
    /// Rejected (returning `false`) when the config is disabled, hold-to-tap
    /// is off, or a session for this direction is already active. An
    /// accepted press arms a periodic timer whose first deadline is one
    /// interval from now; the press itself emits nothing — a tap's single
    /// emission travels the host's immediate click path instead.
    pub fn press(&mut self, direction: Direction, config: &StepperConfig) -> bool {
        if config.disabled || !config.hold_to_auto_tap {
            return false;
        }
        if self.sessions.contains_key(&direction) {
            return false;
        }
        let interval = config.auto_tap_interval;
        debug_assert!(!interval.is_zero(), "press with unvalidated zero interval");
        let now = self.clock.now();
        let timer = self.timers.arm(now + interval, interval);
        self.sessions.insert(
            direction,
            Session {
                timer,
                phase: SessionPhase::Pressed,
                ticks_emitted: 0,
            },
        );
        tracing::debug!(%direction, interval_ms = interval.as_millis() as u64, "repeat session started");
        true
    }

    /// Drain every tick due at or before `now`, in deadline order.
    ///
    /// Each tick re-reads `host.snapshot()`. If the boundary predicate for
    /// the session's direction is false the session ends without emitting;
    /// otherwise one [`StepEvent`] is delivered and the timer is
    /// rescheduled one period forward. Driving with a coarse `now` (many
    /// periods at once) yields one tick per elapsed period.
    pub fn run_due(&mut self, now: Instant, host: &mut impl RepeatHost) {
        while let Some(timer) = self.timers.next_due(now) {
            let direction = self
                .sessions
                .iter()
                .find(|(_, session)| session.timer == timer)
                .map(|(direction, _)| *direction);
            let Some(direction) = direction else {
                // Unowned timers cannot exist: sessions and timers are
                // created and destroyed together.
                debug_assert!(false, "due timer {timer:?} has no session");
                self.timers.clear(timer);
                continue;
            };

            let snapshot = host.snapshot();
            if !snapshot.can_step(direction) {
                self.end_session(direction, StopReason::Boundary);
                continue;
            }

            let Some(session) = self.sessions.get_mut(&direction) else {
                continue;
            };
            session.phase = SessionPhase::Repeating;
            session.ticks_emitted += 1;
            let event = StepEvent {
                direction,
                value: snapshot.proposed(direction),
                tick: session.ticks_emitted,
            };
            self.timers.reschedule(timer);
            tracing::trace!(%direction, value = event.value, tick = event.tick, "repeat tick");
            host.on_step(event);
        }
    }

    /// End the session for `direction` after a press-end signal.
    ///
    /// Idempotent: releasing with no active session is a no-op.
    pub fn release(&mut self, direction: Direction) {
        self.end_session(direction, StopReason::Released);
    }

    /// End the session for `direction` after the pointer left the control.
    ///
    /// Same effect as [`release`](Self::release); distinct signal, logged
    /// separately.
    pub fn cancel(&mut self, direction: Direction) {
        self.end_session(direction, StopReason::Cancelled);
    }

    /// End every active session, clearing each outstanding timer exactly
    /// once. Safe to call with nothing active, and safe to call repeatedly.
    pub fn teardown(&mut self) {
        let directions: Vec<Direction> = self.sessions.keys().copied().collect();
        for direction in directions {
            self.end_session(direction, StopReason::Teardown);
        }
    }

    fn end_session(&mut self, direction: Direction, reason: StopReason) {
        if let Some(session) = self.sessions.remove(&direction) {
            self.timers.clear(session.timer);
            tracing::debug!(
                %direction,
                ?reason,
                ticks = session.ticks_emitted,
                "repeat session ended"
            );
        }
    }

    /// Whether a session is active for `direction`.
    #[must_use]
    pub fn is_active(&self, direction: Direction) -> bool {
        self.sessions.contains_key(&direction)
    }

    /// Lifecycle phase of the active session for `direction`, if any.
    #[must_use]
    pub fn phase(&self, direction: Direction) -> Option<SessionPhase> {
        self.sessions.get(&direction).map(|session| session.phase)
    }

    /// Ticks emitted so far by the active session for `direction`.
    #[must_use]
    pub fn ticks_emitted(&self, direction: Direction) -> Option<u64> {
        self.sessions
            .get(&direction)
            .map(|session| session.ticks_emitted)
    }

    /// Number of active sessions (0, 1, or 2).
    #[must_use]
    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Live timers owned by this controller.
    #[must_use]
    pub fn active_timers(&self) -> usize {
        self.timers.active_count()
    }

    /// Timers cleared over this controller's lifetime.
    #[must_use]
    pub fn cleared_timers(&self) -> u64 {
        self.timers.cleared_count()
    }

    /// The controller's time source.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }
}
