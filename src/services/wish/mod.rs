//! Wish ledger: at most one wish per record per calendar year.
//!
//! The year boundary is evaluated in the configured timezone, and the
//! send marker is claimed with a single conditional UPDATE so that two
//! concurrent attempts can never both succeed.

use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use log::debug;
use rusqlite::{params, Connection};
use thiserror::Error;

/// A successfully recorded wish.
#[derive(Debug, Clone, PartialEq)]
pub struct SentWish {
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum WishError {
    /// No record with that id is visible to this owner.
    #[error("birthday not found")]
    NotFound,
    /// A wish was already recorded for this record in the current year.
    #[error("wish already sent at {last_sent}")]
    AlreadySent { last_sent: DateTime<Utc> },
    #[error("wish store error: {0}")]
    Store(#[from] rusqlite::Error),
}

/// Ledger over the `last_wish_sent` column of the birthday store.
pub struct WishLedger<'a> {
    conn: &'a Connection,
}

impl<'a> WishLedger<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Try to record a wish for `id` at `now`.
    ///
    /// Succeeds only when the record exists, belongs to `owner_id`, and no
    /// wish is recorded for the year `now` falls in under `tz`. The check
    /// and the write are one statement, so a lost race surfaces as
    /// [`WishError::AlreadySent`] rather than a double send.
    pub fn attempt_send(
        &self,
        owner_id: &str,
        id: i64,
        now: DateTime<Utc>,
        tz: Tz,
    ) -> Result<SentWish, WishError> {
        let local_now = now.with_timezone(&tz);
        let year = local_now.year();

        let tx = self.conn.unchecked_transaction()?;

        // last_wish_sent is rendered in the configured zone, so its first
        // four characters are the year the ledger reasons about.
        let rows_affected = tx.execute(
            "UPDATE birthdays
             SET last_wish_sent = ?1, updated_at = ?2
             WHERE id = ?3 AND owner_id = ?4
               AND (last_wish_sent IS NULL
                OR CAST(substr(last_wish_sent, 1, 4) AS INTEGER) < ?5)",
            params![
                local_now.to_rfc3339(),
                now.to_rfc3339(),
                id,
                owner_id,
                year
            ],
        )?;

        if rows_affected == 0 {
            let prior = tx.query_row(
                "SELECT last_wish_sent FROM birthdays
                 WHERE id = ?1 AND owner_id = ?2 AND last_wish_sent IS NOT NULL",
                params![id, owner_id],
                |row| row.get::<_, String>(0),
            );
            return match prior {
                Ok(rendered) => {
                    let last_sent = parse_sent_at(rendered)?;
                    debug!(
                        "wish for birthday {} refused, already sent at {}",
                        id, last_sent
                    );
                    Err(WishError::AlreadySent { last_sent })
                }
                Err(rusqlite::Error::QueryReturnedNoRows) => Err(WishError::NotFound),
                Err(e) => Err(WishError::Store(e)),
            };
        }

        tx.commit()?;
        Ok(SentWish { sent_at: now })
    }
}

fn parse_sent_at(rendered: String) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(&rendered)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::birthday::Birthday;
    use crate::services::birthday::BirthdayService;
    use crate::services::database::Database;
    use chrono::{NaiveDate, TimeZone};
    use chrono_tz::Tz;

    fn setup_test_db() -> Database {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        db
    }

    fn create_birthday(db: &Database, owner: &str) -> i64 {
        let service = BirthdayService::new(db.connection());
        let birthday = Birthday::new(
            owner,
            "Grandma",
            NaiveDate::from_ymd_opt(1950, 6, 15).unwrap(),
        )
        .unwrap();
        service.create(birthday).unwrap().id.unwrap()
    }

    fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_first_wish_of_the_year_succeeds() {
        let db = setup_test_db();
        let id = create_birthday(&db, "alice");
        let ledger = WishLedger::new(db.connection());

        let now = utc(2026, 6, 15, 9);
        let sent = ledger.attempt_send("alice", id, now, Tz::UTC).unwrap();
        assert_eq!(sent.sent_at, now);

        let stored = BirthdayService::new(db.connection())
            .get("alice", id)
            .unwrap()
            .unwrap();
        assert_eq!(stored.last_wish_sent, Some(now));
    }

    #[test]
    fn test_second_wish_same_year_is_refused() {
        let db = setup_test_db();
        let id = create_birthday(&db, "alice");
        let ledger = WishLedger::new(db.connection());

        let first = utc(2026, 6, 15, 9);
        ledger.attempt_send("alice", id, first, Tz::UTC).unwrap();

        let err = ledger
            .attempt_send("alice", id, utc(2026, 11, 2, 9), Tz::UTC)
            .unwrap_err();
        match err {
            WishError::AlreadySent { last_sent } => assert_eq!(last_sent, first),
            other => panic!("expected AlreadySent, got {other:?}"),
        }
    }

    #[test]
    fn test_prior_year_wish_does_not_block() {
        let db = setup_test_db();
        let id = create_birthday(&db, "alice");
        let ledger = WishLedger::new(db.connection());

        ledger
            .attempt_send("alice", id, utc(2025, 12, 31, 9), Tz::UTC)
            .unwrap();
        let sent = ledger
            .attempt_send("alice", id, utc(2026, 1, 1, 9), Tz::UTC)
            .unwrap();
        assert_eq!(sent.sent_at, utc(2026, 1, 1, 9));
    }

    #[test]
    fn test_year_boundary_follows_configured_zone() {
        let db = setup_test_db();
        let id = create_birthday(&db, "alice");
        let ledger = WishLedger::new(db.connection());
        let sydney: Tz = "Australia/Sydney".parse().unwrap();

        // Dec 31 14:00 UTC is already Jan 1 in Sydney.
        ledger
            .attempt_send("alice", id, utc(2025, 12, 31, 14), sydney)
            .unwrap();

        // Jan 2 UTC is still the same Sydney year, so this is a repeat.
        let err = ledger
            .attempt_send("alice", id, utc(2026, 1, 2, 9), sydney)
            .unwrap_err();
        assert!(matches!(err, WishError::AlreadySent { .. }));
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let db = setup_test_db();
        let ledger = WishLedger::new(db.connection());

        let err = ledger
            .attempt_send("alice", 999, utc(2026, 6, 15, 9), Tz::UTC)
            .unwrap_err();
        assert!(matches!(err, WishError::NotFound));
    }

    #[test]
    fn test_foreign_owner_looks_like_not_found() {
        let db = setup_test_db();
        let id = create_birthday(&db, "alice");
        let ledger = WishLedger::new(db.connection());

        let err = ledger
            .attempt_send("mallory", id, utc(2026, 6, 15, 9), Tz::UTC)
            .unwrap_err();
        assert!(matches!(err, WishError::NotFound));

        // And the real owner is unaffected.
        let stored = BirthdayService::new(db.connection())
            .get("alice", id)
            .unwrap()
            .unwrap();
        assert!(stored.last_wish_sent.is_none());
    }
}
