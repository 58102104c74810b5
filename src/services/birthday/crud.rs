use super::queries::map_birthday_row;
use super::BirthdayService;
use crate::models::birthday::Birthday;
use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use rusqlite::{self, params};

impl<'a> BirthdayService<'a> {
    /// Create a new birthday record in the database.
    pub fn create(&self, mut birthday: Birthday) -> Result<Birthday> {
        birthday.validate().map_err(|e| anyhow!(e))?;

        let now = Utc::now();
        self.conn
            .execute(
                "INSERT INTO birthdays (
                    owner_id, name, born_on, email, phone, notes,
                    last_wish_sent, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    birthday.owner_id,
                    birthday.name,
                    birthday.born_on.to_string(),
                    birthday.email,
                    birthday.phone,
                    birthday.notes,
                    birthday.last_wish_sent.map(|t| t.to_rfc3339()),
                    now.to_rfc3339(),
                    now.to_rfc3339(),
                ],
            )
            .context("Failed to insert birthday")?;

        birthday.id = Some(self.conn.last_insert_rowid());
        birthday.created_at = Some(now);
        birthday.updated_at = Some(now);

        Ok(birthday)
    }

    /// Retrieve one record by id, scoped to its owner. Records owned by
    /// anyone else read as absent.
    pub fn get(&self, owner_id: &str, id: i64) -> Result<Option<Birthday>> {
        let result = self.conn.query_row(
            "SELECT id, owner_id, name, born_on, email, phone, notes,
                    last_wish_sent, created_at, updated_at
             FROM birthdays WHERE id = ? AND owner_id = ?",
            params![id, owner_id],
            map_birthday_row,
        );

        match result {
            Ok(birthday) => Ok(Some(birthday)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Update the name, date, and descriptive fields of an existing record.
    ///
    /// `last_wish_sent` is deliberately not writable here; the wish ledger
    /// is its only mutator.
    pub fn update(&self, birthday: &Birthday) -> Result<()> {
        let id = birthday
            .id
            .ok_or_else(|| anyhow!("Birthday id is required for update"))?;
        birthday.validate().map_err(|e| anyhow!(e))?;

        let rows_affected = self
            .conn
            .execute(
                "UPDATE birthdays SET
                    name = ?, born_on = ?, email = ?, phone = ?, notes = ?,
                    updated_at = ?
                 WHERE id = ? AND owner_id = ?",
                params![
                    birthday.name,
                    birthday.born_on.to_string(),
                    birthday.email,
                    birthday.phone,
                    birthday.notes,
                    Utc::now().to_rfc3339(),
                    id,
                    birthday.owner_id,
                ],
            )
            .context("Failed to update birthday")?;

        if rows_affected == 0 {
            return Err(anyhow!("Birthday with id {} not found", id));
        }

        Ok(())
    }

    /// Delete an owner's record by id.
    pub fn delete(&self, owner_id: &str, id: i64) -> Result<()> {
        let rows_affected = self
            .conn
            .execute(
                "DELETE FROM birthdays WHERE id = ? AND owner_id = ?",
                params![id, owner_id],
            )
            .context("Failed to delete birthday")?;

        if rows_affected == 0 {
            return Err(anyhow!("Birthday with id {} not found", id));
        }

        Ok(())
    }
}
