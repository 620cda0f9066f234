mod common;

use hit_stats::client::{
    EVENTS_URI, HttpStatsClient, StatsClient, StatsClientConfig, ViewTracker, event_uri,
};
use hit_stats::domain::repositories::HitRepository;
use std::sync::Arc;
use std::time::Duration;

fn client_for(base_url: &str) -> HttpStatsClient {
    let config = StatsClientConfig::new(base_url).with_timeout(Duration::from_millis(1000));
    HttpStatsClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_record_then_count_views() {
    let (base_url, repo) = common::spawn_server().await;
    let tracker = ViewTracker::new(Arc::new(client_for(&base_url)));

    tracker.record_event_view("ewm-main-service", 7, "1.1.1.1").await;
    tracker.record_event_view("ewm-main-service", 7, "1.1.1.1").await;
    tracker.record_event_view("ewm-main-service", 7, "2.2.2.2").await;
    tracker.record_list_view("ewm-main-service", "1.1.1.1").await;

    assert_eq!(repo.count_all().await.unwrap(), 4);
    assert_eq!(tracker.get_view_count(7, None).await, 2);
    assert_eq!(tracker.get_view_count(8, None).await, 0);
}

#[tokio::test]
async fn test_get_stats_and_views_for_uri() {
    let (base_url, _repo) = common::spawn_server().await;
    let client = client_for(&base_url);

    client.record_hit("svc", &event_uri(1), "1.1.1.1").await;
    client.record_hit("svc", &event_uri(1), "1.1.1.1").await;
    client.record_hit("svc", EVENTS_URI, "3.3.3.3").await;

    let end = chrono::Utc::now().naive_utc() + chrono::Duration::minutes(1);
    let start = end - chrono::Duration::hours(1);

    let all = client.get_stats(start, end, None, None).await;
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].uri, "/events/1");
    assert_eq!(all[0].hits, 2);

    let total = client.get_views_for_uri("/events/1", start, end, false).await;
    let unique = client.get_views_for_uri("/events/1", start, end, true).await;
    assert_eq!(total, 2);
    assert_eq!(unique, 1);

    assert!(client.is_available().await);
}

#[tokio::test]
async fn test_since_excludes_older_views() {
    let (base_url, _repo) = common::spawn_server().await;
    let tracker = ViewTracker::new(Arc::new(client_for(&base_url)));

    tracker.record_event_view("svc", 3, "1.1.1.1").await;

    let future = chrono::Utc::now().naive_utc() + chrono::Duration::minutes(5);
    assert_eq!(tracker.get_view_count(3, Some(future)).await, 0);
}

#[tokio::test]
async fn test_unreachable_server_returns_defaults() {
    let base_url = common::unused_address().await;
    let client = client_for(&base_url);
    let tracker = ViewTracker::new(Arc::new(client.clone()));

    tracker.record_event_view("svc", 1, "1.1.1.1").await;
    tracker.record_list_view("svc", "1.1.1.1").await;

    let end = chrono::Utc::now().naive_utc();
    let start = end - chrono::Duration::days(1);

    assert!(client.get_stats(start, end, None, Some(true)).await.is_empty());
    assert_eq!(client.get_views_for_uri("/events/1", start, end, true).await, 0);
    assert_eq!(tracker.get_view_count(1, None).await, 0);
    assert!(!client.is_available().await);
    assert!(!tracker.is_available().await);
}

#[tokio::test]
async fn test_rejected_query_returns_zero() {
    let (base_url, _repo) = common::spawn_server().await;
    let client = client_for(&base_url);

    let start = common::ts("2024-03-02 00:00:00");
    let end = common::ts("2024-03-01 00:00:00");

    assert!(client.get_stats(start, end, None, None).await.is_empty());
    assert_eq!(client.get_views_for_uri("/events/1", start, end, false).await, 0);
}
