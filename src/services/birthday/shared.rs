use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{self, Result};

pub(crate) fn to_utc_datetime(value: String) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

pub(crate) fn to_naive_date(value: String) -> Result<NaiveDate> {
    value
        .parse::<NaiveDate>()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}
