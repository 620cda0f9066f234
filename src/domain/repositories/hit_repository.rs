//! Repository trait for the append-only hit log.

use crate::domain::entities::{Hit, NewHit, StatEntry};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDateTime;

/// Filter criteria for grouped statistics queries.
///
/// The window `[start, end]` is inclusive on both ends. An absent or empty
/// `uris` list means "all URIs".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsFilter {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub uris: Option<Vec<String>>,
    pub unique: bool,
}

impl StatsFilter {
    /// Creates a filter over the given window counting every hit.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end,
            uris: None,
            unique: false,
        }
    }

    /// Restricts the query to the given URIs. An empty list is treated as no restriction.
    pub fn with_uris(mut self, uris: Option<Vec<String>>) -> Self {
        self.uris = uris.filter(|list| !list.is_empty());
        self
    }

    /// Switches between raw hit counts and distinct-IP counts.
    pub fn with_unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    /// Returns whether `hit` falls inside the window and the URI restriction.
    pub fn matches(&self, hit: &Hit) -> bool {
        if hit.timestamp < self.start || hit.timestamp > self.end {
            return false;
        }

        match &self.uris {
            Some(uris) => uris.iter().any(|uri| uri == &hit.uri),
            None => true,
        }
    }
}

/// Repository interface for the hit log.
///
/// Writers only ever append; there are no update or delete operations.
/// Readers see whatever has been committed when the query executes.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgHitRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryHitRepository`] - Process-local log
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HitRepository: Send + Sync {
    /// Appends a hit and returns it with its assigned identity.
    ///
    /// Identical hits are stored as distinct records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn append(&self, new_hit: NewHit) -> Result<Hit, AppError>;

    /// Counts hits grouped by `(app, uri)` for the filter.
    ///
    /// Entries are ordered by `hits` descending, ties broken by `app` and
    /// then `uri` ascending. The caller is responsible for rejecting
    /// inverted windows.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn query_grouped(&self, filter: StatsFilter) -> Result<Vec<StatEntry>, AppError>;

    /// Counts every hit in the log.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count_all(&self) -> Result<i64, AppError>;

    /// Checks whether the backing store answers.
    async fn health_check(&self) -> bool;
}
