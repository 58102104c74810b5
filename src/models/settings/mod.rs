// Settings module
// Application-wide preferences stored as a singleton row

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Application settings.
///
/// `timezone` names the single canonical zone used for every civil-date
/// derivation: "today"/"this month" filtering, day-key aggregation, the
/// recurrence reference date, and the wish ledger's year comparison. There
/// is deliberately no second, caller-local time reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub timezone: String,
    pub upcoming_window_days: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            upcoming_window_days: 30,
        }
    }
}

impl Settings {
    /// Validate the settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.timezone.parse::<Tz>().is_err() {
            return Err(format!("Unknown timezone: {}", self.timezone));
        }

        if self.upcoming_window_days < 1 || self.upcoming_window_days > 366 {
            return Err("Upcoming window must be between 1 and 366 days".to_string());
        }

        Ok(())
    }

    /// The resolved canonical zone. Falls back to UTC if the stored name no
    /// longer parses (e.g. written by an older build).
    pub fn tz(&self) -> Tz {
        self.timezone.parse().unwrap_or(chrono_tz::UTC)
    }

    /// Civil date of `now` in the canonical zone.
    pub fn reference_date(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.tz()).date_naive()
    }

    /// Calendar year of `now` in the canonical zone.
    pub fn reference_year(&self, now: DateTime<Utc>) -> i32 {
        now.with_timezone(&self.tz()).year()
    }

    /// UTC instant at which `date` begins in the canonical zone.
    ///
    /// Midnight can be ambiguous or skipped around DST transitions; an
    /// ambiguous midnight resolves to its earlier instant and a skipped one
    /// slides forward an hour.
    pub fn day_start(&self, date: NaiveDate) -> DateTime<Utc> {
        let tz = self.tz();
        let midnight = date.and_time(NaiveTime::MIN);

        match tz.from_local_datetime(&midnight) {
            LocalResult::Single(instant) => instant.with_timezone(&Utc),
            LocalResult::Ambiguous(earlier, _) => earlier.with_timezone(&Utc),
            LocalResult::None => tz
                .from_local_datetime(&(midnight + Duration::hours(1)))
                .earliest()
                .map(|instant| instant.with_timezone(&Utc))
                .unwrap_or_else(|| Utc.from_utc_datetime(&midnight)),
        }
    }
}
