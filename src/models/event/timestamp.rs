//! ISO-8601 timestamp encoding for event start/end.
//!
//! Writes wall-clock `YYYY-MM-DDTHH:MM:SS`. Reads that form (with optional
//! fractional seconds) as well as offset timestamps such as the `...Z` strings
//! browsers emit, which are converted to local wall-clock time.

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer};

pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub fn format(value: &NaiveDateTime) -> String {
    value.format(FORMAT).to_string()
}

pub fn parse(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Local).naive_local())
}

pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(value))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid ISO-8601 timestamp '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_naive_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 12, 30)
            .unwrap()
            .and_hms_opt(10, 15, 0)
            .unwrap();
        assert_eq!(parse("2024-12-30T10:15:00"), Some(expected));
        assert_eq!(parse("2024-12-30T10:15:00.000"), Some(expected));
    }

    #[test]
    fn test_parse_offset_form() {
        let utc = DateTime::parse_from_rfc3339("2024-12-30T10:15:00Z").unwrap();
        let expected = utc.with_timezone(&Local).naive_local();
        assert_eq!(parse("2024-12-30T10:15:00.000Z"), Some(expected));
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse("tomorrow"), None);
        assert_eq!(parse("2024-13-01T00:00:00"), None);
    }

    #[test]
    fn test_format() {
        let value = NaiveDate::from_ymd_opt(2025, 1, 4)
            .unwrap()
            .and_hms_opt(7, 5, 0)
            .unwrap();
        assert_eq!(format(&value), "2025-01-04T07:05:00");
    }
}
