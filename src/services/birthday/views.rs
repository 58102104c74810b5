//! Derived read views over an owner's birthday records.
//!
//! Every view takes an explicit reference instant and derives the civil
//! date through the configured timezone, so results are reproducible and
//! testable without touching the wall clock.

use super::BirthdayService;
use crate::models::birthday::Birthday;
use crate::services::calendar::{self, DayGroup, DayKey};
use crate::services::countdown::{countdown_parts, CountdownParts};
use crate::services::recurrence::next_occurrence;
use crate::services::settings::SettingsService;
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// A filtered listing, with the count alongside the items.
#[derive(Debug, Clone, Serialize)]
pub struct BirthdayListView {
    pub count: usize,
    pub items: Vec<Birthday>,
}

impl BirthdayListView {
    fn of(items: Vec<Birthday>) -> Self {
        Self {
            count: items.len(),
            items,
        }
    }
}

/// A birthday paired with its next occurrence and the live countdown to it.
#[derive(Debug, Clone, Serialize)]
pub struct UpcomingBirthday {
    pub birthday: Birthday,
    pub next_occurrence: NaiveDate,
    pub countdown: CountdownParts,
}

impl<'a> BirthdayService<'a> {
    /// Birthdays whose month and day match today's date, ignoring year.
    pub fn today(&self, owner_id: &str, now: DateTime<Utc>) -> Result<BirthdayListView> {
        let settings = SettingsService::new(self.conn).get()?;
        let reference = settings.reference_date(now);

        let items = self
            .list_for_owner(owner_id)?
            .into_iter()
            .filter(|b| calendar::is_today(b.born_on, reference))
            .collect();

        Ok(BirthdayListView::of(items))
    }

    /// Birthdays falling in the current calendar month, ignoring year.
    pub fn this_month(&self, owner_id: &str, now: DateTime<Utc>) -> Result<BirthdayListView> {
        let settings = SettingsService::new(self.conn).get()?;
        let reference = settings.reference_date(now);

        let items = self
            .list_for_owner(owner_id)?
            .into_iter()
            .filter(|b| calendar::is_this_month(b.born_on, reference))
            .collect();

        Ok(BirthdayListView::of(items))
    }

    /// Birthdays whose next occurrence falls within the configured upcoming
    /// window, sorted by proximity. The countdown targets local midnight of
    /// the occurrence day.
    pub fn upcoming(&self, owner_id: &str, now: DateTime<Utc>) -> Result<Vec<UpcomingBirthday>> {
        let settings = SettingsService::new(self.conn).get()?;
        let reference = settings.reference_date(now);

        let mut upcoming: Vec<UpcomingBirthday> = self
            .list_for_owner(owner_id)?
            .into_iter()
            .filter_map(|birthday| {
                let occurrence = next_occurrence(birthday.born_on, reference);
                let days_away = (occurrence - reference).num_days();
                if days_away > settings.upcoming_window_days {
                    return None;
                }
                let target = settings.day_start(occurrence);
                Some(UpcomingBirthday {
                    countdown: countdown_parts(target, now),
                    next_occurrence: occurrence,
                    birthday,
                })
            })
            .collect();

        upcoming.sort_by(|a, b| {
            a.next_occurrence
                .cmp(&b.next_occurrence)
                .then_with(|| a.birthday.name.cmp(&b.birthday.name))
        });

        Ok(upcoming)
    }

    /// All of an owner's birthdays grouped by month and day.
    pub fn calendar(&self, owner_id: &str) -> Result<BTreeMap<DayKey, DayGroup>> {
        let records = self.list_for_owner(owner_id)?;
        Ok(calendar::group_by_day(&records))
    }

    /// Concrete dates in `display_year` that carry at least one birthday.
    pub fn highlighted_dates(
        &self,
        owner_id: &str,
        display_year: i32,
    ) -> Result<BTreeSet<NaiveDate>> {
        let records = self.list_for_owner(owner_id)?;
        Ok(calendar::dates_with_events(&records, display_year))
    }
}
