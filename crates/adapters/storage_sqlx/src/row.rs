//! Column decoding shared by the row wrappers.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::any::AnyRow;

use mudstore_domain::time::Timestamp;

pub(crate) fn decode_id<T>(row: &AnyRow, column: &str) -> Result<T, sqlx::Error>
where
    T: FromStr<Err = uuid::Error>,
{
    let value: String = row.try_get(column)?;
    T::from_str(&value).map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

pub(crate) fn decode_optional_id<T>(row: &AnyRow, column: &str) -> Result<Option<T>, sqlx::Error>
where
    T: FromStr<Err = uuid::Error>,
{
    let value: Option<String> = row.try_get(column)?;
    value
        .map(|s| T::from_str(&s))
        .transpose()
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

/// Timestamps are stored as RFC 3339 text.
pub(crate) fn decode_timestamp(row: &AnyRow, column: &str) -> Result<Timestamp, sqlx::Error> {
    let value: String = row.try_get(column)?;
    DateTime::parse_from_rfc3339(&value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}
