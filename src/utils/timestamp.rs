//! Wire format for timestamps: `yyyy-MM-dd HH:mm:ss`, no zone, no fractions.
//!
//! Used through `#[serde(with = "...")]` on DTO fields and directly when
//! building query strings.

use chrono::{NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serializer, de};

/// `chrono` format string matching `yyyy-MM-dd HH:mm:ss`.
pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats a timestamp in the wire format.
pub fn format(ts: &NaiveDateTime) -> String {
    ts.format(FORMAT).to_string()
}

/// Parses a timestamp in the wire format.
pub fn parse(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s.trim(), FORMAT)
}

/// Current UTC wall-clock time truncated to whole seconds.
pub fn now() -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    now.with_nanosecond(0).unwrap_or(now)
}

pub fn serialize<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(ts))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(|e| {
        de::Error::custom(format!(
            "invalid timestamp '{raw}', expected yyyy-MM-dd HH:mm:ss: {e}"
        ))
    })
}

/// Same format for optional fields. Missing and `null` both map to `None`.
pub mod option {
    use super::*;

    pub fn serialize<S>(ts: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match ts {
            Some(ts) => serializer.serialize_str(&format(ts)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse(&raw).map(Some).map_err(|e| {
                de::Error::custom(format!(
                    "invalid timestamp '{raw}', expected yyyy-MM-dd HH:mm:ss: {e}"
                ))
            }),
            None => Ok(None),
        }
    }
}
