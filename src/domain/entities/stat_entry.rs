//! Aggregated hit count for one `(app, uri)` pair.

use std::cmp::Ordering;

/// Result row of a statistics query.
///
/// Computed fresh for every query and never stored. `hits` holds either the
/// raw hit count or the number of distinct IPs, depending on the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatEntry {
    pub app: String,
    pub uri: String,
    pub hits: i64,
}

impl StatEntry {
    pub fn new(app: impl Into<String>, uri: impl Into<String>, hits: i64) -> Self {
        Self {
            app: app.into(),
            uri: uri.into(),
            hits,
        }
    }

    /// Result ordering: `hits` descending, then `app` and `uri` ascending.
    pub fn ranking(a: &StatEntry, b: &StatEntry) -> Ordering {
        b.hits
            .cmp(&a.hits)
            .then_with(|| a.app.cmp(&b.app))
            .then_with(|| a.uri.cmp(&b.uri))
    }
}
