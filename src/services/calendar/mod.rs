//! Month-grid filtering and aggregation.
//!
//! Predicates and grouping compare calendar components directly; the stored
//! year of a record never participates. All functions take the reference
//! date explicitly and perform no I/O.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::birthday::Birthday;
use crate::utils::date::clamped_date;

/// Cap applied by [`DayGroup::display_count`].
pub const DISPLAY_COUNT_CAP: usize = 9;

/// Year-independent (month, day) grouping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DayKey {
    pub month: u32,
    pub day: u32,
}

impl DayKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }
}

/// Records sharing one day key, in insertion order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DayGroup {
    pub count: usize,
    pub records: Vec<Birthday>,
}

impl DayGroup {
    /// Saturating presentation hint ("9+"); `count` itself stays exact.
    pub fn display_count(&self) -> String {
        if self.count > DISPLAY_COUNT_CAP {
            format!("{}+", DISPLAY_COUNT_CAP)
        } else {
            self.count.to_string()
        }
    }
}

/// True iff `date`'s month and day both match the reference date.
pub fn is_today(date: NaiveDate, reference: NaiveDate) -> bool {
    date.month() == reference.month() && date.day() == reference.day()
}

/// True iff `date`'s month matches the reference date's month.
pub fn is_this_month(date: NaiveDate, reference: NaiveDate) -> bool {
    date.month() == reference.month()
}

/// Partition records by the (month, day) of `born_on`.
///
/// Every record lands in exactly one group; the sum of group counts equals
/// the input size.
pub fn group_by_day(records: &[Birthday]) -> BTreeMap<DayKey, DayGroup> {
    let mut groups: BTreeMap<DayKey, DayGroup> = BTreeMap::new();

    for record in records {
        let group = groups.entry(DayKey::of(record.born_on)).or_default();
        group.count += 1;
        group.records.push(record.clone());
    }

    groups
}

/// Concrete dates carrying at least one record, normalized onto one nominal
/// display year for calendar-widget highlighting. The leap-day clamp applies
/// when the display year is not a leap year.
pub fn dates_with_events(records: &[Birthday], display_year: i32) -> BTreeSet<NaiveDate> {
    records
        .iter()
        .filter_map(|record| {
            clamped_date(display_year, record.born_on.month(), record.born_on.day())
        })
        .collect()
}
