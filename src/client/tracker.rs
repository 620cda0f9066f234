//! Event-oriented view tracking on top of [`StatsClient`].

use std::sync::Arc;

use chrono::{Duration, Months, NaiveDateTime};

use super::StatsClient;
use crate::utils::timestamp;

/// URI recorded when the event list is viewed.
pub const EVENTS_URI: &str = "/events";

/// URI recorded when a single event is viewed.
pub fn event_uri(event_id: i64) -> String {
    format!("{EVENTS_URI}/{event_id}")
}

/// Records event views and reads unique view counts.
///
/// Like the underlying client, none of these calls can fail into the caller.
pub struct ViewTracker<C: StatsClient + ?Sized> {
    client: Arc<C>,
}

impl<C: StatsClient + ?Sized> Clone for ViewTracker<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<C: StatsClient + ?Sized> ViewTracker<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Records a view of `/events/{event_id}`.
    pub async fn record_event_view(&self, app: &str, event_id: i64, ip: &str) {
        self.client.record_hit(app, &event_uri(event_id), ip).await;
    }

    /// Records a view of the event list (`/events`).
    pub async fn record_list_view(&self, app: &str, ip: &str) {
        self.client.record_hit(app, EVENTS_URI, ip).await;
    }

    /// Unique views of one event between `since` and now.
    ///
    /// Without `since` the window starts one year before now, so events
    /// without a date still report their views. Returns `0` when the stats
    /// service is unreachable or has no entry for the event.
    pub async fn get_view_count(&self, event_id: i64, since: Option<NaiveDateTime>) -> i64 {
        let end = timestamp::now();
        let start = since.unwrap_or_else(|| one_year_before(end));

        self.client
            .get_views_for_uri(&event_uri(event_id), start, end, true)
            .await
    }

    pub async fn is_available(&self) -> bool {
        self.client.is_available().await
    }
}

fn one_year_before(ts: NaiveDateTime) -> NaiveDateTime {
    ts.checked_sub_months(Months::new(12))
        .unwrap_or(ts - Duration::days(365))
}
