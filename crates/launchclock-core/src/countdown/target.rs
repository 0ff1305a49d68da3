use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Offset applied when no target is supplied.
pub const DEFAULT_OFFSET_DAYS: i64 = 2;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// The instant a countdown runs toward. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Target(DateTime<Utc>);

impl Target {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// `now + days`. Fails only when the result leaves chrono's range.
    pub fn from_now(now: DateTime<Utc>, days: i64) -> Result<Self, ValidationError> {
        let offset = Duration::try_days(days)
            .ok_or_else(|| ValidationError::OutOfRange(format!("{days} days")))?;
        now.checked_add_signed(offset)
            .map(Self)
            .ok_or_else(|| ValidationError::OutOfRange(format!("{now} + {days} days")))
    }

    /// Parse a user-supplied instant.
    ///
    /// RFC 3339 strings carry their own offset. Naive date-times and bare
    /// dates are interpreted in the local time zone; a bare date means local
    /// midnight.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let invalid = || ValidationError::InvalidTarget {
            input: input.to_string(),
        };

        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self(dt.with_timezone(&Utc)));
        }

        let naive = NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
            .ok_or_else(invalid)?;

        // Ambiguous local times (DST fall-back) resolve to the earlier one;
        // nonexistent ones (spring-forward gap) are rejected.
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|local| Self(local.with_timezone(&Utc)))
            .ok_or_else(invalid)
    }

    pub fn at(&self) -> DateTime<Utc> {
        self.0
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl std::str::FromStr for Target {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Target used when none is supplied: `now` plus exactly two days.
pub fn default_target(now: DateTime<Utc>) -> Target {
    // Two days from any representable "now" stays in range in practice.
    Target::from_now(now, DEFAULT_OFFSET_DAYS).unwrap_or(Target(DateTime::<Utc>::MAX_UTC))
}
