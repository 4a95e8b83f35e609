//! Serde helpers for request DTOs and query strings.
//!
//! Clients frequently send empty strings for fields they did not fill in.
//! These helpers treat blank values as `None`.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// Deserialize an optional string, treating blank strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}

/// Deserialize an optional `YYYY-MM-DD` date, treating blank strings as None.
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if !s.trim().is_empty() => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// Deserialize an optional UUID, treating blank strings as None.
pub fn deserialize_optional_uuid<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if !s.trim().is_empty() => Uuid::parse_str(s.trim())
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Query {
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        notes: Option<String>,
        #[serde(default, deserialize_with = "deserialize_optional_date")]
        start_date: Option<NaiveDate>,
        #[serde(default, deserialize_with = "deserialize_optional_uuid")]
        parent_id: Option<Uuid>,
    }

    #[test]
    fn test_blank_values_become_none() {
        let json = r#"{"notes": "  ", "start_date": "", "parent_id": ""}"#;
        let query: Query = serde_json::from_str(json).unwrap();
        assert_eq!(
            query,
            Query {
                notes: None,
                start_date: None,
                parent_id: None
            }
        );
    }

    #[test]
    fn test_missing_fields_default_to_none() {
        let query: Query = serde_json::from_str("{}").unwrap();
        assert_eq!(query.notes, None);
        assert_eq!(query.parent_id, None);
    }

    #[test]
    fn test_values_are_parsed_and_trimmed() {
        let json = r#"{
            "notes": " Highway fill-up ",
            "start_date": "2024-06-15",
            "parent_id": "aaaaaaaa-aaaa-aaaa-aaaa-aaaaaaaaaaaa"
        }"#;
        let query: Query = serde_json::from_str(json).unwrap();

        assert_eq!(query.notes.as_deref(), Some("Highway fill-up"));
        assert_eq!(query.start_date, NaiveDate::from_ymd_opt(2024, 6, 15));
        assert_eq!(
            query.parent_id,
            Some(Uuid::parse_str("aaaaaaaa-aaaa-aaaa-aaaa-aaaaaaaaaaaa").unwrap())
        );
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(serde_json::from_str::<Query>(r#"{"start_date": "15/06/2024"}"#).is_err());
        assert!(serde_json::from_str::<Query>(r#"{"parent_id": "not-a-uuid"}"#).is_err());
    }
}
