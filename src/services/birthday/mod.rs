//! Birthday record store entry point.
//! Owner-scoped persistence and the derived list/calendar views,
//! organized across focused submodules.

use rusqlite::Connection;

pub mod crud;
pub mod queries;
mod shared;
pub mod views;

/// Service for managing birthday records stored in SQLite.
///
/// Every operation is scoped by `owner_id`: no call can observe or mutate
/// another owner's records, and a foreign-owned record is indistinguishable
/// from a missing one.
pub struct BirthdayService<'a> {
    pub(crate) conn: &'a Connection,
}

impl<'a> BirthdayService<'a> {
    /// Create a new BirthdayService with a database connection
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}
