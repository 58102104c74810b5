// Date utility functions
// Shared calendar normalization used by recurrence and aggregation

use chrono::NaiveDate;

/// Gregorian leap-year check.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Build a date from components, clamping Feb 29 to Feb 28 in non-leap years.
///
/// Any code that must turn a (month, day) pair into a concrete date in some
/// other year goes through this, so the leap-day policy lives in exactly one
/// place. Returns `None` only for component pairs that were never a real
/// calendar date.
pub fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if month == 2 && day == 29 && !is_leap_year(year) {
        return NaiveDate::from_ymd_opt(year, 2, 28);
    }
    NaiveDate::from_ymd_opt(year, month, day)
}
