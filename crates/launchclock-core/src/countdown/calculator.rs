//! Time-remaining decomposition.
//!
//! `compute` is a pure function of two instants. It never reads the clock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;

/// Display units, in the order the presentation shell lays them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 4] = [
        TimeUnit::Days,
        TimeUnit::Hours,
        TimeUnit::Minutes,
        TimeUnit::Seconds,
    ];

    pub fn index(self) -> usize {
        match self {
            TimeUnit::Days => 0,
            TimeUnit::Hours => 1,
            TimeUnit::Minutes => 2,
            TimeUnit::Seconds => 3,
        }
    }
}

/// Remaining duration broken into display units.
///
/// `hours < 24`, `minutes < 60`, `seconds < 60`; `days` is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remaining {
    pub days: u64,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl Remaining {
    /// Decompose a strictly positive millisecond difference.
    ///
    /// Sub-second remainders are truncated, never rounded.
    pub fn from_millis(diff_ms: u64) -> Self {
        Self {
            days: diff_ms / MS_PER_DAY,
            hours: ((diff_ms / MS_PER_HOUR) % 24) as u8,
            minutes: ((diff_ms / MS_PER_MINUTE) % 60) as u8,
            seconds: ((diff_ms / MS_PER_SECOND) % 60) as u8,
        }
    }

    /// Whole seconds represented by this breakdown.
    pub fn total_seconds(&self) -> u64 {
        self.days
            .saturating_mul(86_400)
            .saturating_add(u64::from(self.hours) * 3_600)
            .saturating_add(u64::from(self.minutes) * 60)
            .saturating_add(u64::from(self.seconds))
    }

    pub fn get(&self, unit: TimeUnit) -> u64 {
        match unit {
            TimeUnit::Days => self.days,
            TimeUnit::Hours => u64::from(self.hours),
            TimeUnit::Minutes => u64::from(self.minutes),
            TimeUnit::Seconds => u64::from(self.seconds),
        }
    }

    /// `(unit, value)` pairs in display order.
    pub fn units(&self) -> [(TimeUnit, u64); 4] {
        TimeUnit::ALL.map(|unit| (unit, self.get(unit)))
    }
}

/// Result of one countdown computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Countdown {
    Counting(Remaining),
    /// The target is not in the future. Terminal.
    Reached,
}

impl Countdown {
    pub fn is_reached(&self) -> bool {
        matches!(self, Countdown::Reached)
    }

    pub fn remaining(&self) -> Option<Remaining> {
        match self {
            Countdown::Counting(remaining) => Some(*remaining),
            Countdown::Reached => None,
        }
    }
}

/// Compute the remaining time from `now` until `target`.
///
/// `target - now <= 0` yields [`Countdown::Reached`], including the exact
/// boundary `now == target`.
pub fn compute(target: DateTime<Utc>, now: DateTime<Utc>) -> Countdown {
    let diff_ms = (target - now).num_milliseconds();
    if diff_ms <= 0 {
        return Countdown::Reached;
    }
    Countdown::Counting(Remaining::from_millis(diff_ms as u64))
}
