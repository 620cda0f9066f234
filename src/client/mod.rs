//! Client for the hit stats service.
//!
//! Consuming applications record views and read view counts through this
//! module. Every public operation is failure-opaque: transport errors,
//! non-2xx responses and malformed bodies are logged and turned into an empty
//! result (`0`, an empty list, `false`, or nothing for fire-and-forget calls).
//! Losing a view is acceptable; failing the caller's request is not.
//!
//! # Components
//!
//! - [`StatsClient`] - Capability trait used by callers and mocked in tests
//! - [`HttpStatsClient`] - The HTTP adapter built on `reqwest`
//! - [`ViewTracker`] - Event-oriented helpers (`/events/{id}` URIs, view counts)
//! - [`StatsClientConfig`] - Base URL and timeout
//!
//! # Example
//!
//! ```rust,ignore
//! let client = HttpStatsClient::new(&StatsClientConfig::from_env())?;
//! let tracker = ViewTracker::new(Arc::new(client));
//!
//! tracker.record_event_view("ewm-main-service", 42, "192.168.0.7").await;
//! let views = tracker.get_view_count(42, None).await;
//! ```

mod config;
mod error;
mod http;
mod tracker;

pub use config::StatsClientConfig;
pub use error::ClientError;
pub use http::HttpStatsClient;
pub use tracker::{EVENTS_URI, ViewTracker, event_uri};

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::domain::entities::StatEntry;

/// Operations a consuming application can perform against the stats service.
///
/// None of the methods return errors. Implementations must log failures and
/// return the documented default instead.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsClient: Send + Sync {
    /// Records a hit stamped with the current time. Failures are logged and dropped.
    async fn record_hit(&self, app: &str, uri: &str, ip: &str);

    /// Fetches grouped counts for the window.
    ///
    /// Returns an empty list on any failure. `unique = None` leaves the
    /// server default (`false`) in place.
    async fn get_stats(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        uris: Option<Vec<String>>,
        unique: Option<bool>,
    ) -> Vec<StatEntry>;

    /// Returns the `hits` of the first returned entry whose URI equals `uri`.
    ///
    /// Returns `0` when no entry matches or on any failure.
    async fn get_views_for_uri(
        &self,
        uri: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
        unique: bool,
    ) -> i64;

    /// Probes `GET /health`; `true` only for a 2xx response.
    async fn is_available(&self) -> bool;
}
