use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::countdown::{Countdown, DriverState, Remaining, Target};

/// Every state change in the countdown produces an Event.
/// The terminal view consumes them; `status --json` prints them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A driver was (re)started and ran its initial computation.
    CountdownStarted {
        target: Target,
        state: DriverState,
        remaining: Option<Remaining>,
        at: DateTime<Utc>,
    },
    /// One tick while counting.
    CountdownTick {
        remaining: Remaining,
        tick: u64,
        at: DateTime<Utc>,
    },
    /// The target instant passed. Emitted exactly once per driver.
    TargetReached {
        target: Target,
        tick: u64,
        at: DateTime<Utc>,
    },
    /// The refresh task was cancelled before reaching the target.
    CountdownCancelled {
        target: Target,
        at: DateTime<Utc>,
    },
    /// The user triggered the action on the celebration panel.
    CelebrationAction {
        theme: String,
        label: String,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        target: Target,
        state: DriverState,
        remaining: Option<Remaining>,
        remaining_secs: u64,
        tick: u64,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Event::CountdownStarted { at, .. }
            | Event::CountdownTick { at, .. }
            | Event::TargetReached { at, .. }
            | Event::CountdownCancelled { at, .. }
            | Event::CelebrationAction { at, .. }
            | Event::StateSnapshot { at, .. } => *at,
        }
    }

    /// The frame this event asks the presentation shell to draw, if any.
    pub fn countdown(&self) -> Option<Countdown> {
        match self {
            Event::CountdownStarted { state, remaining, .. }
            | Event::StateSnapshot { state, remaining, .. } => match (state, remaining) {
                (DriverState::Counting, Some(remaining)) => Some(Countdown::Counting(*remaining)),
                _ => Some(Countdown::Reached),
            },
            Event::CountdownTick { remaining, .. } => Some(Countdown::Counting(*remaining)),
            Event::TargetReached { .. } => Some(Countdown::Reached),
            Event::CountdownCancelled { .. } | Event::CelebrationAction { .. } => None,
        }
    }

    /// Whether this event leaves the countdown in its terminal state.
    pub fn is_terminal(&self) -> bool {
        match self {
            Event::TargetReached { .. } | Event::CountdownCancelled { .. } => true,
            Event::CountdownStarted { state, .. } | Event::StateSnapshot { state, .. } => {
                *state == DriverState::Reached
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 21, 7, 30, 0).unwrap()
    }

    #[test]
    fn tick_maps_to_counting_frame() {
        let remaining = Remaining {
            days: 0,
            hours: 3,
            minutes: 2,
            seconds: 1,
        };
        let event = Event::CountdownTick {
            remaining,
            tick: 4,
            at: at(),
        };
        assert_eq!(event.countdown(), Some(Countdown::Counting(remaining)));
        assert!(!event.is_terminal());
    }

    #[test]
    fn terminal_events() {
        let target = Target::new(at());
        let reached = Event::TargetReached {
            target,
            tick: 1,
            at: at(),
        };
        assert_eq!(reached.countdown(), Some(Countdown::Reached));
        assert!(reached.is_terminal());

        let cancelled = Event::CountdownCancelled { target, at: at() };
        assert_eq!(cancelled.countdown(), None);
        assert!(cancelled.is_terminal());
    }

    #[test]
    fn serializes_with_type_tag() {
        let event = Event::CelebrationAction {
            theme: "cyberpunk".into(),
            label: "ENTER SYSTEM".into(),
            at: at(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "CelebrationAction");
        assert_eq!(json["label"], "ENTER SYSTEM");
        assert_eq!(event.at(), at());
    }
}
