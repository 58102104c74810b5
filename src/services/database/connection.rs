use std::time::Duration;

use anyhow::{Context, Result};
use rusqlite::Connection;

use super::schema;

/// Thin wrapper around the application's SQLite connection.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) a SQLite database at the provided path.
    ///
    /// Enables foreign keys immediately and sets a busy timeout so that
    /// concurrent writers on separate connections queue for the write lock
    /// instead of failing.
    ///
    /// # Examples
    /// ```
    /// use birthday_keeper::services::database::Database;
    /// let db = Database::new(":memory:").unwrap();
    /// ```
    pub fn new(path: &str) -> Result<Self> {
        let conn =
            Connection::open(path).context(format!("Failed to open database at {}", path))?;

        conn.execute("PRAGMA foreign_keys = ON", [])
            .context("Failed to enable foreign keys")?;

        conn.busy_timeout(Duration::from_secs(5))
            .context("Failed to set busy timeout")?;

        Ok(Self { conn })
    }

    /// Provides read/write access to the underlying `rusqlite::Connection`.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Creates tables, runs migrations, and seeds default data.
    pub fn initialize_schema(&self) -> Result<()> {
        schema::initialize_schema(self.connection())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_new_database_in_memory() {
        let result = Database::new(":memory:");
        assert!(result.is_ok(), "Should create in-memory database");
    }

    #[test]
    fn test_new_database_with_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let db_path_str = db_path.to_str().unwrap();

        let result = Database::new(db_path_str);
        assert!(result.is_ok(), "Should create file-based database");
        assert!(Path::new(db_path_str).exists(), "Database file should exist");
    }

    #[test]
    fn test_initialize_schema() {
        let db = Database::new(":memory:").unwrap();
        let result = db.initialize_schema();
        assert!(result.is_ok(), "Schema initialization should succeed");
    }

    #[test]
    fn test_initialize_schema_is_idempotent() {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        let result = db.initialize_schema();
        assert!(result.is_ok(), "Re-running schema setup should succeed");
    }

    #[test]
    fn test_birthdays_table_exists() {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();

        let result: Result<i64, rusqlite::Error> = db.connection().query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='birthdays'",
            [],
            |row| row.get(0),
        );

        assert!(result.is_ok(), "Should be able to query sqlite_master");
        assert_eq!(result.unwrap(), 1, "Birthdays table should exist");
    }

    #[test]
    fn test_default_settings_inserted() {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();

        let timezone: Result<String, rusqlite::Error> = db.connection().query_row(
            "SELECT timezone FROM settings WHERE id = 1",
            [],
            |row| row.get(0),
        );

        assert!(timezone.is_ok(), "Default settings should be inserted");
        assert_eq!(timezone.unwrap(), "UTC");
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let db = Database::new(":memory:").unwrap();

        let result: Result<i64, rusqlite::Error> =
            db.connection()
                .query_row("PRAGMA foreign_keys", [], |row| row.get(0));

        assert!(result.is_ok(), "Should be able to check foreign_keys");
        assert_eq!(result.unwrap(), 1, "Foreign keys should be enabled");
    }
}
