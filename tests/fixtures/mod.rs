// Test fixtures - reusable test data
// Provides consistent test data across all test files

use birthday_keeper::models::birthday::Birthday;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Returns June 15, 1950 (a mid-year birthday)
    pub fn grandma_born() -> NaiveDate {
        NaiveDate::from_ymd_opt(1950, 6, 15).unwrap()
    }

    /// Returns Feb 29, 2000 (leap day)
    pub fn leap_day_2000() -> NaiveDate {
        NaiveDate::from_ymd_opt(2000, 2, 29).unwrap()
    }

    /// Returns June 10, 2026 at noon UTC
    pub fn june_10_2026_noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 10, 12, 0, 0).unwrap()
    }
}

/// Sample birthdays for testing
pub mod birthdays {
    use super::*;

    pub fn grandma(owner: &str) -> Birthday {
        Birthday::new(owner, "Grandma", dates::grandma_born()).unwrap()
    }

    pub fn leapling(owner: &str) -> Birthday {
        Birthday::new(owner, "Leapling", dates::leap_day_2000()).unwrap()
    }
}
