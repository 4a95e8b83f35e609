//! SQLite row conversion functions.
//!
//! Pure functions for converting between rows and records, testable without
//! a database.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Row;
use serde::{de::DeserializeOwned, Serialize};

use trackhub_core::storage::RepositoryError;

/// Serialize a record body for the `body` column.
pub fn encode_body<T: Serialize>(record: &T) -> Result<String, RepositoryError> {
    serde_json::to_string(record).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

/// Convert a `SELECT body` row back into a record.
pub fn row_to_record<T: DeserializeOwned>(row: &Row) -> rusqlite::Result<T> {
    let body: String = row.get(0)?;
    decode_body(&body)
}

fn decode_body<T: DeserializeOwned>(body: &str) -> rusqlite::Result<T> {
    serde_json::from_str(body).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Format a timestamp for storage.
///
/// Fixed precision keeps the text sortable, which `ORDER BY created_at` relies on.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}
