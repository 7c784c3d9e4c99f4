//! Timestamp coercion at the record boundary.
//!
//! The store hands back timestamps in several textual shapes (RFC 3339 from
//! the REST layer, `timestamptz` text from SQL, bare dates typed into forms).
//! Optional timestamps that cannot be parsed become `None` so that a bad due
//! date reads as "no SLA" instead of comparing unpredictably.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use tracing::warn;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a timestamp in any of the accepted shapes. Naive forms are UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    // Postgres text output: "2024-01-01 00:00:00+00"
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Serde adapter for optional timestamps: unparsable input becomes `None`.
pub mod lenient {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Take any JSON shape so one wrong-typed field cannot fail the record.
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match raw {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(value)) => {
                let parsed = parse_timestamp(&value);
                if parsed.is_none() && !value.trim().is_empty() {
                    warn!(value = %value, "unparsable timestamp, treating as absent");
                }
                parsed
            }
            Some(other) => {
                warn!(value = %other, "non-string timestamp, treating as absent");
                None
            }
        })
    }

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }
}

/// Serde adapter for required timestamps: unparsable input is an error.
pub mod strict {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw:?}")))
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        assert_eq!(
            parse_timestamp("2024-01-01T02:00:00+02:00"),
            Some(utc(2024, 1, 1, 0, 0))
        );
    }

    #[test]
    fn parses_postgres_text() {
        assert_eq!(
            parse_timestamp("2024-01-01 01:30:00.123+00"),
            Some(utc(2024, 1, 1, 1, 30) + chrono::TimeDelta::milliseconds(123))
        );
    }

    #[test]
    fn naive_forms_are_utc() {
        assert_eq!(parse_timestamp("2024-01-01T01:00:00"), Some(utc(2024, 1, 1, 1, 0)));
        assert_eq!(parse_timestamp("2024-01-01 01:00:00"), Some(utc(2024, 1, 1, 1, 0)));
        assert_eq!(parse_timestamp("2024-03-05"), Some(utc(2024, 3, 5, 0, 0)));
    }

    #[derive(Debug, serde::Deserialize)]
    struct Due {
        #[serde(default, with = "lenient")]
        due: Option<DateTime<Utc>>,
    }

    #[test]
    fn lenient_accepts_any_json_shape() {
        let due = |v: serde_json::Value| {
            serde_json::from_value::<Due>(serde_json::json!({ "due": v }))
                .unwrap()
                .due
        };
        assert_eq!(due(serde_json::json!("2024-03-05")), Some(utc(2024, 3, 5, 0, 0)));
        assert_eq!(due(serde_json::json!(1_704_067_200_000_i64)), None);
        assert_eq!(due(serde_json::json!(true)), None);
        assert_eq!(due(serde_json::json!({ "at": "2024-03-05" })), None);
        assert_eq!(due(serde_json::Value::Null), None);
        assert_eq!(serde_json::from_str::<Due>("{}").unwrap().due, None);
    }

    #[test]
    fn garbage_is_none() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("   "), None);
        assert_eq!(parse_timestamp("tomorrow"), None);
        assert_eq!(parse_timestamp("2024-13-40T99:00:00Z"), None);
    }
}
