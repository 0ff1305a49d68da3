//! Countdown refresh driver.
//!
//! The driver is a wall-clock-based state machine. It does not use internal
//! threads - the caller is responsible for calling `tick()` periodically
//! (see [`crate::ticker`] for the scheduled task that does so).
//!
//! ## State Transitions
//!
//! ```text
//! Counting -> Reached
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut driver = CountdownDriver::new(target, Utc::now());
//! // In a loop, once per second:
//! driver.tick(Utc::now()); // Returns Some(Event::TargetReached) exactly once
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::calculator::{compute, Countdown, Remaining};
use super::target::Target;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverState {
    Counting,
    /// Terminal. No transition leaves this state.
    Reached,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownDriver {
    target: Target,
    state: DriverState,
    /// Last breakdown computed while counting. Zero once reached.
    remaining: Remaining,
    /// Ticks processed since construction, excluding the initial computation.
    ticks: u64,
}

impl CountdownDriver {
    /// Create a driver and run the initial computation immediately, so the
    /// first frame already shows the real remaining time.
    pub fn new(target: Target, now: DateTime<Utc>) -> Self {
        let mut driver = Self {
            target,
            state: DriverState::Counting,
            remaining: Remaining::default(),
            ticks: 0,
        };
        driver.apply(compute(target.at(), now));
        info!(deadline = %target, state = ?driver.state, "countdown started");
        driver
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_reached(&self) -> bool {
        self.state == DriverState::Reached
    }

    pub fn remaining(&self) -> Remaining {
        self.remaining
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Current countdown as last computed.
    pub fn countdown(&self) -> Countdown {
        match self.state {
            DriverState::Counting => Countdown::Counting(self.remaining),
            DriverState::Reached => Countdown::Reached,
        }
    }

    /// Event describing the state right after construction.
    pub fn started_event(&self, now: DateTime<Utc>) -> Event {
        Event::CountdownStarted {
            target: self.target,
            state: self.state,
            remaining: self.countdown().remaining(),
            at: now,
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self, now: DateTime<Utc>) -> Event {
        Event::StateSnapshot {
            target: self.target,
            state: self.state,
            remaining: self.countdown().remaining(),
            remaining_secs: self.remaining.total_seconds(),
            tick: self.ticks,
            at: now,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Call periodically.
    ///
    /// Returns `CountdownTick` while counting, `TargetReached` on the tick
    /// that crosses the target, and `None` afterwards.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if self.state == DriverState::Reached {
            return None;
        }
        self.ticks += 1;
        self.apply(compute(self.target.at(), now));
        match self.state {
            DriverState::Counting => {
                debug!(tick = self.ticks, remaining = ?self.remaining, "countdown tick");
                Some(Event::CountdownTick {
                    remaining: self.remaining,
                    tick: self.ticks,
                    at: now,
                })
            }
            DriverState::Reached => {
                info!(deadline = %self.target, tick = self.ticks, "countdown target reached");
                Some(Event::TargetReached {
                    target: self.target,
                    tick: self.ticks,
                    at: now,
                })
            }
        }
    }

    /// Discard all derived state and restart against `target`.
    pub fn retarget(&mut self, target: Target, now: DateTime<Utc>) -> Event {
        info!(from = %self.target, to = %target, "countdown retargeted");
        *self = Self::new(target, now);
        self.started_event(now)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn apply(&mut self, countdown: Countdown) {
        match countdown {
            Countdown::Counting(remaining) => self.remaining = remaining,
            Countdown::Reached => {
                self.remaining = Remaining::default();
                self.state = DriverState::Reached;
            }
        }
    }
}
