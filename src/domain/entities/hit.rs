//! Hit entity representing a single recorded visit.

use chrono::NaiveDateTime;

/// A visit recorded against an application URI.
///
/// Hits form an append-only log: once persisted they are never updated or
/// deleted. The `ip` is stored exactly as supplied by the caller and is only
/// used to count distinct visitors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub id: i64,
    pub app: String,
    pub uri: String,
    pub ip: String,
    pub timestamp: NaiveDateTime,
}

impl Hit {
    /// Creates a new Hit instance.
    pub fn new(id: i64, app: String, uri: String, ip: String, timestamp: NaiveDateTime) -> Self {
        Self {
            id,
            app,
            uri,
            ip,
            timestamp,
        }
    }
}

/// Input data for appending a hit to the log.
///
/// By the time a `NewHit` reaches a repository the timestamp has been
/// resolved; the service layer assigns the current time when the caller
/// omitted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHit {
    pub app: String,
    pub uri: String,
    pub ip: String,
    pub timestamp: NaiveDateTime,
}

impl NewHit {
    /// Turns the input into a stored hit carrying the assigned identity.
    pub fn into_hit(self, id: i64) -> Hit {
        Hit::new(id, self.app, self.uri, self.ip, self.timestamp)
    }
}
