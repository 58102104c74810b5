use super::shared::{to_naive_date, to_utc_datetime};
use super::BirthdayService;
use crate::models::birthday::Birthday;
use anyhow::Result;
use rusqlite::{self, params, Row};

impl<'a> BirthdayService<'a> {
    /// List an owner's birthdays ordered by the month and day of `born_on`,
    /// ignoring the stored year.
    pub fn list_for_owner(&self, owner_id: &str) -> Result<Vec<Birthday>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, owner_id, name, born_on, email, phone, notes,
                    last_wish_sent, created_at, updated_at
             FROM birthdays
             WHERE owner_id = ?
             ORDER BY substr(born_on, 6) ASC, name ASC",
        )?;

        let birthdays = stmt
            .query_map([owner_id], map_birthday_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(birthdays)
    }

    /// Search an owner's birthdays by name, email, or notes.
    pub fn search(&self, owner_id: &str, query: &str) -> Result<Vec<Birthday>> {
        if query.trim().is_empty() {
            return Ok(vec![]);
        }

        let search_pattern = format!("%{}%", query.to_lowercase());
        let mut stmt = self.conn.prepare(
            "SELECT id, owner_id, name, born_on, email, phone, notes,
                    last_wish_sent, created_at, updated_at
             FROM birthdays
             WHERE owner_id = ?1
               AND (LOWER(name) LIKE ?2
                OR LOWER(COALESCE(email, '')) LIKE ?2
                OR LOWER(COALESCE(notes, '')) LIKE ?2)
             ORDER BY substr(born_on, 6) ASC, name ASC",
        )?;

        let birthdays = stmt
            .query_map(params![owner_id, search_pattern], map_birthday_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(birthdays)
    }
}

pub(super) fn map_birthday_row(row: &Row<'_>) -> Result<Birthday, rusqlite::Error> {
    let last_wish_sent = row
        .get::<_, Option<String>>(7)?
        .map(to_utc_datetime)
        .transpose()?;

    Ok(Birthday {
        id: Some(row.get(0)?),
        owner_id: row.get(1)?,
        name: row.get(2)?,
        born_on: to_naive_date(row.get::<_, String>(3)?)?,
        email: row.get(4)?,
        phone: row.get(5)?,
        notes: row.get(6)?,
        last_wish_sent,
        created_at: Some(to_utc_datetime(row.get::<_, String>(8)?)?),
        updated_at: Some(to_utc_datetime(row.get::<_, String>(9)?)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::database::Database;
    use chrono::NaiveDate;

    fn setup() -> Database {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        db
    }

    fn birthday(owner: &str, name: &str, year: i32, month: u32, day: u32) -> Birthday {
        Birthday::new(
            owner,
            name,
            NaiveDate::from_ymd_opt(year, month, day).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_list_orders_by_month_day_ignoring_year() {
        let db = setup();
        let service = BirthdayService::new(db.connection());

        service.create(birthday("alice", "December", 1970, 12, 1)).unwrap();
        service.create(birthday("alice", "March", 2001, 3, 20)).unwrap();
        service.create(birthday("alice", "January", 1990, 1, 5)).unwrap();

        let names: Vec<String> = service
            .list_for_owner("alice")
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();

        assert_eq!(names, vec!["January", "March", "December"]);
    }

    #[test]
    fn test_list_is_owner_scoped() {
        let db = setup();
        let service = BirthdayService::new(db.connection());

        service.create(birthday("alice", "Mine", 1990, 6, 15)).unwrap();
        service.create(birthday("bob", "Theirs", 1990, 6, 15)).unwrap();

        let mine = service.list_for_owner("alice").unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].name, "Mine");
    }

    #[test]
    fn test_search_matches_name_and_notes() {
        let db = setup();
        let service = BirthdayService::new(db.connection());

        let mut with_notes = birthday("alice", "Uncle Bob", 1972, 3, 4);
        with_notes.notes = Some("Plays Chess".to_string());
        service.create(with_notes).unwrap();
        service.create(birthday("alice", "Grandma", 1950, 6, 15)).unwrap();

        let by_name = service.search("alice", "uncle").unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Uncle Bob");

        let by_notes = service.search("alice", "chess").unwrap();
        assert_eq!(by_notes.len(), 1);

        let nothing = service.search("alice", "zzz").unwrap();
        assert!(nothing.is_empty());
    }

    #[test]
    fn test_search_empty_query_returns_nothing() {
        let db = setup();
        let service = BirthdayService::new(db.connection());
        service.create(birthday("alice", "Grandma", 1950, 6, 15)).unwrap();

        assert!(service.search("alice", "   ").unwrap().is_empty());
    }

    #[test]
    fn test_search_is_owner_scoped() {
        let db = setup();
        let service = BirthdayService::new(db.connection());
        service.create(birthday("bob", "Uncle Bob", 1972, 3, 4)).unwrap();

        assert!(service.search("alice", "uncle").unwrap().is_empty());
    }
}
