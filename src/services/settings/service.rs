use crate::models::settings::Settings;
use anyhow::{anyhow, Context, Result};
use rusqlite::Connection;

use super::mapper::row_to_settings;

/// Service for the singleton settings row.
///
/// The canonical timezone stored here governs every civil-date derivation
/// (today, this-month, wish-ledger year) for the whole store.
pub struct SettingsService<'a> {
    conn: &'a Connection,
}

impl<'a> SettingsService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Get the current settings
    pub fn get(&self) -> Result<Settings> {
        let settings = self
            .conn
            .query_row(
                "SELECT timezone, upcoming_window_days FROM settings WHERE id = 1",
                [],
                |row| Ok(row_to_settings(row)?),
            )
            .context("Failed to load settings")?;

        Ok(settings)
    }

    /// Update settings
    pub fn update(&self, settings: &Settings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        self.conn
            .execute(
                "UPDATE settings \
                 SET timezone = ?1, \
                     upcoming_window_days = ?2, \
                     updated_at = CURRENT_TIMESTAMP \
                 WHERE id = 1",
                (&settings.timezone, settings.upcoming_window_days),
            )
            .context("Failed to update settings")?;

        Ok(())
    }

    /// Restore the defaults
    pub fn reset(&self) -> Result<()> {
        self.update(&Settings::default())
    }
}
