//! Annual recurrence resolution.
//!
//! Converts a stored, year-bearing date into the next date its month/day
//! combination falls on, relative to an explicit reference date. No ambient
//! clock is consulted anywhere in this module.

use chrono::{Datelike, NaiveDate};

use crate::utils::date::clamped_date;

/// Next occurrence of `source`'s month/day on or after `on_or_after`.
///
/// The stored year of `source` is ignored. A candidate is built in the
/// reference year; if it has already passed, the occurrence moves to the
/// following year. A candidate equal to the reference date resolves to the
/// reference date itself, so same-day events count as "today" rather than
/// next year. Feb 29 clamps to Feb 28 in non-leap years
/// (see [`crate::utils::date::clamped_date`]).
pub fn next_occurrence(source: NaiveDate, on_or_after: NaiveDate) -> NaiveDate {
    let candidate = resolve_in_year(source, on_or_after.year());
    if candidate < on_or_after {
        resolve_in_year(source, on_or_after.year() + 1)
    } else {
        candidate
    }
}

/// The occurrence of `source`'s month/day within `year`, leap-day clamp
/// applied.
pub fn resolve_in_year(source: NaiveDate, year: i32) -> NaiveDate {
    match clamped_date(year, source.month(), source.day()) {
        Some(date) => date,
        // Unreachable for a (month, day) pair taken from a real date.
        None => source.with_year(year).unwrap_or(source),
    }
}
