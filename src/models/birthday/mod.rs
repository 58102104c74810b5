// Birthday module
// Annually recurring event record scoped to an owner

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Maximum length of the display name.
pub const MAX_NAME_LENGTH: usize = 100;

/// A person whose birthday recurs every year.
///
/// `born_on` keeps its year for storage and display, but recurrence,
/// filtering, and aggregation only ever look at its month and day.
/// `last_wish_sent` is written exclusively by the wish ledger; everything
/// else treats a loaded record as an immutable snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Birthday {
    pub id: Option<i64>,
    pub owner_id: String,
    pub name: String,
    pub born_on: NaiveDate,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub last_wish_sent: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Birthday {
    /// Create a new birthday with required fields.
    ///
    /// # Arguments
    /// * `owner_id` - Owning user, used to scope every store operation
    /// * `name` - Display name (required, non-empty, bounded)
    /// * `born_on` - Date of birth; only month and day drive recurrence
    ///
    /// # Examples
    /// ```
    /// use birthday_keeper::models::birthday::Birthday;
    /// use chrono::NaiveDate;
    ///
    /// let born = NaiveDate::from_ymd_opt(1990, 12, 25).unwrap();
    /// let birthday = Birthday::new("alice", "Grandma", born).unwrap();
    /// ```
    pub fn new(
        owner_id: impl Into<String>,
        name: impl Into<String>,
        born_on: NaiveDate,
    ) -> Result<Self, String> {
        let birthday = Self {
            id: None,
            owner_id: owner_id.into(),
            name: name.into(),
            born_on,
            email: None,
            phone: None,
            notes: None,
            last_wish_sent: None,
            created_at: None,
            updated_at: None,
        };

        birthday.validate()?;
        Ok(birthday)
    }

    /// Create a builder for constructing birthdays with optional fields.
    pub fn builder() -> BirthdayBuilder {
        BirthdayBuilder::new()
    }

    /// Validate the record.
    pub fn validate(&self) -> Result<(), String> {
        if self.owner_id.trim().is_empty() {
            return Err("Owner id cannot be empty".to_string());
        }

        if self.name.trim().is_empty() {
            return Err("Name cannot be empty".to_string());
        }

        if self.name.chars().count() > MAX_NAME_LENGTH {
            return Err(format!("Name cannot exceed {} characters", MAX_NAME_LENGTH));
        }

        if let Some(ref email) = self.email {
            if !email.contains('@') {
                return Err("Email must contain '@'".to_string());
            }
        }

        Ok(())
    }

    /// Whether a wish has ever been recorded for this person.
    pub fn has_been_wished(&self) -> bool {
        self.last_wish_sent.is_some()
    }
}

/// Builder for creating birthdays with optional fields
pub struct BirthdayBuilder {
    owner_id: Option<String>,
    name: Option<String>,
    born_on: Option<NaiveDate>,
    email: Option<String>,
    phone: Option<String>,
    notes: Option<String>,
}

impl BirthdayBuilder {
    pub fn new() -> Self {
        Self {
            owner_id: None,
            name: None,
            born_on: None,
            email: None,
            phone: None,
            notes: None,
        }
    }

    /// Set the owning user.
    pub fn owner_id(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }

    /// Set the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the date of birth.
    pub fn born_on(mut self, born_on: NaiveDate) -> Self {
        self.born_on = Some(born_on);
        self
    }

    /// Set the contact email.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the contact phone number.
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Set free-text notes.
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Build the birthday.
    pub fn build(self) -> Result<Birthday, String> {
        let owner_id = self.owner_id.ok_or("Owner id is required")?;
        let name = self.name.ok_or("Name is required")?;
        let born_on = self.born_on.ok_or("Date of birth is required")?;

        let birthday = Birthday {
            id: None,
            owner_id,
            name,
            born_on,
            email: self.email,
            phone: self.phone,
            notes: self.notes,
            last_wish_sent: None,
            created_at: None,
            updated_at: None,
        };

        birthday.validate()?;
        Ok(birthday)
    }
}

impl Default for BirthdayBuilder {
    fn default() -> Self {
        Self::new()
    }
}
