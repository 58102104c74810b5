//! Live countdown derivation.
//! Pure interval breakdown plus a cancelable periodic ticker.

pub mod ticker;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Whole-unit breakdown of the interval from a reference instant to a target.
///
/// `total_millis` keeps its sign so callers can detect an already-passed
/// target; the component fields clamp at zero and never go negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountdownParts {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub total_millis: i64,
}

impl CountdownParts {
    /// True once the target instant has been reached or passed.
    pub fn is_elapsed(&self) -> bool {
        self.total_millis <= 0
    }
}

/// Break the interval `target - now` into days, hours, minutes, and seconds.
///
/// Days are 24-hour buckets; each smaller unit is taken from the remainder
/// of the previous one. This function owns no timer; callers decide how
/// often to recompute it, and recomputing with a later `now` only ever
/// shrinks the remaining interval.
pub fn countdown_parts(target: DateTime<Utc>, now: DateTime<Utc>) -> CountdownParts {
    let total = target.signed_duration_since(now);
    let total_millis = total.num_milliseconds();

    let clamped = total.max(Duration::zero());
    let days = clamped.num_days();
    let hours = clamped.num_hours() - days * 24;
    let minutes = clamped.num_minutes() - clamped.num_hours() * 60;
    let seconds = clamped.num_seconds() - clamped.num_minutes() * 60;

    CountdownParts {
        days,
        hours,
        minutes,
        seconds,
        total_millis,
    }
}
