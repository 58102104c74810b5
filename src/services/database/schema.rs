use anyhow::{Context, Result};
use rusqlite::Connection;

use super::migrations;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_birthdays_table(conn)?;
    run_birthday_migrations(conn)?;
    create_settings_table(conn)?;
    insert_default_settings(conn)?;
    Ok(())
}

fn create_birthdays_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS birthdays (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id TEXT NOT NULL,
            name TEXT NOT NULL,
            born_on TEXT NOT NULL,
            email TEXT,
            phone TEXT,
            notes TEXT,
            last_wish_sent TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create birthdays table")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_birthdays_owner ON birthdays(owner_id)",
        [],
    )
    .context("Failed to create birthdays owner index")?;

    Ok(())
}

fn run_birthday_migrations(conn: &Connection) -> Result<()> {
    // Both columns postdate the first released table layout.
    migrations::ensure_column(
        conn,
        "birthdays",
        "last_wish_sent",
        "ALTER TABLE birthdays ADD COLUMN last_wish_sent TEXT",
    )?;

    migrations::ensure_column(
        conn,
        "birthdays",
        "notes",
        "ALTER TABLE birthdays ADD COLUMN notes TEXT",
    )?;

    Ok(())
}

fn create_settings_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            timezone TEXT NOT NULL DEFAULT 'UTC',
            upcoming_window_days INTEGER NOT NULL DEFAULT 30,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create settings table")?;

    migrations::ensure_column(
        conn,
        "settings",
        "upcoming_window_days",
        "ALTER TABLE settings ADD COLUMN upcoming_window_days INTEGER NOT NULL DEFAULT 30",
    )?;

    Ok(())
}

fn insert_default_settings(conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO settings (id, timezone, upcoming_window_days)
         VALUES (1, 'UTC', 30)",
        [],
    )
    .context("Failed to insert default settings")?;

    Ok(())
}
