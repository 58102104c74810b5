use crate::models::settings::Settings;
use rusqlite::Row;

pub fn row_to_settings(row: &Row) -> Result<Settings, rusqlite::Error> {
    Ok(Settings {
        timezone: row.get(0)?,
        upcoming_window_days: row.get(1)?,
    })
}
