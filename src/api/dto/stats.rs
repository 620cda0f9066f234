//! DTOs for the statistics endpoint.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_with::{StringWithSeparator, formats::CommaSeparator, serde_as};

use crate::domain::entities::StatEntry;
use crate::utils::timestamp;

/// Query string of `GET /stats`.
///
/// `uris` is a comma-separated list; `unique` defaults to `false`.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct StatsQueryParams {
    #[serde(with = "timestamp")]
    pub start: NaiveDateTime,

    #[serde(with = "timestamp")]
    pub end: NaiveDateTime,

    #[serde_as(as = "Option<StringWithSeparator::<CommaSeparator, String>>")]
    #[serde(default)]
    pub uris: Option<Vec<String>>,

    #[serde(default)]
    pub unique: bool,
}

/// One entry of the `GET /stats` response array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEntryResponse {
    pub app: String,
    pub uri: String,
    pub hits: i64,
}

impl From<StatEntry> for StatEntryResponse {
    fn from(entry: StatEntry) -> Self {
        Self {
            app: entry.app,
            uri: entry.uri,
            hits: entry.hits,
        }
    }
}
