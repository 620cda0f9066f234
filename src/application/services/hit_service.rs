//! Hit recording and statistics service.

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde_json::json;

use crate::domain::entities::{Hit, NewHit, StatEntry};
use crate::domain::repositories::{HitRepository, StatsFilter};
use crate::error::AppError;
use crate::utils::timestamp;

/// Service owning write access to the hit log and answering aggregate queries.
///
/// Generic over the repository so that handlers can run against PostgreSQL,
/// the in-memory log, or a mock.
pub struct HitService<R: HitRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: HitRepository + ?Sized> HitService<R> {
    /// Creates a new hit service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Records a hit, stamping the current time when `timestamp` is absent.
    ///
    /// `ip` is stored as given; no address format is enforced.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `app` or `uri` is blank.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn record_hit(
        &self,
        app: String,
        uri: String,
        ip: String,
        timestamp: Option<NaiveDateTime>,
    ) -> Result<Hit, AppError> {
        if app.trim().is_empty() {
            return Err(AppError::bad_request(
                "App must not be blank",
                json!({ "field": "app" }),
            ));
        }
        if uri.trim().is_empty() {
            return Err(AppError::bad_request(
                "Uri must not be blank",
                json!({ "field": "uri" }),
            ));
        }

        let new_hit = NewHit {
            app,
            uri,
            ip,
            timestamp: timestamp.unwrap_or_else(timestamp::now),
        };

        let hit = self.repository.append(new_hit).await?;
        metrics::counter!("hits_recorded_total").increment(1);
        tracing::info!(
            id = hit.id,
            app = %hit.app,
            uri = %hit.uri,
            "Hit recorded"
        );

        Ok(hit)
    }

    /// Counts hits per `(app, uri)` inside the inclusive window.
    ///
    /// With `unique` set, each group counts distinct IPs instead of hits.
    /// An empty result is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `start` is after `end`.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get_stats(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        uris: Option<Vec<String>>,
        unique: bool,
    ) -> Result<Vec<StatEntry>, AppError> {
        if start > end {
            return Err(AppError::bad_request(
                "start date must be earlier than end date",
                json!({
                    "start": timestamp::format(&start),
                    "end": timestamp::format(&end),
                }),
            ));
        }

        let filter = StatsFilter::new(start, end)
            .with_uris(uris)
            .with_unique(unique);

        metrics::counter!("stats_queries_total").increment(1);
        self.repository.query_grouped(filter).await
    }

    /// Counts every hit in the log.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn count_all_hits(&self) -> Result<i64, AppError> {
        self.repository.count_all().await
    }

    /// Checks whether the underlying store answers.
    pub async fn store_healthy(&self) -> bool {
        self.repository.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockHitRepository;
    use chrono::{Duration, NaiveDate};

    fn ts(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn test_record_hit_keeps_supplied_timestamp() {
        let mut mock_repo = MockHitRepository::new();

        mock_repo
            .expect_append()
            .withf(|new_hit| new_hit.timestamp == ts(10) && new_hit.ip == "1.1.1.1")
            .times(1)
            .returning(|new_hit| Ok(new_hit.into_hit(1)));

        let service = HitService::new(Arc::new(mock_repo));

        let hit = service
            .record_hit(
                "svc".to_string(),
                "/events/1".to_string(),
                "1.1.1.1".to_string(),
                Some(ts(10)),
            )
            .await
            .unwrap();

        assert_eq!(hit.id, 1);
        assert_eq!(hit.timestamp, ts(10));
    }

    #[tokio::test]
    async fn test_record_hit_assigns_now_when_missing() {
        let mut mock_repo = MockHitRepository::new();

        mock_repo
            .expect_append()
            .times(1)
            .returning(|new_hit| Ok(new_hit.into_hit(5)));

        let service = HitService::new(Arc::new(mock_repo));

        let before = timestamp::now();
        let hit = service
            .record_hit(
                "svc".to_string(),
                "/events".to_string(),
                "10.0.0.1".to_string(),
                None,
            )
            .await
            .unwrap();
        let after = timestamp::now();

        assert!(hit.timestamp >= before && hit.timestamp <= after);
    }

    #[tokio::test]
    async fn test_record_hit_rejects_blank_app_and_uri() {
        let mut mock_repo = MockHitRepository::new();
        mock_repo.expect_append().never();

        let service = HitService::new(Arc::new(mock_repo));

        let blank_app = service
            .record_hit(
                "   ".to_string(),
                "/events/1".to_string(),
                "1.1.1.1".to_string(),
                None,
            )
            .await;
        assert!(matches!(blank_app, Err(AppError::Validation { .. })));

        let blank_uri = service
            .record_hit(
                "svc".to_string(),
                String::new(),
                "1.1.1.1".to_string(),
                None,
            )
            .await;
        assert!(matches!(blank_uri, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_record_hit_accepts_any_ip_text() {
        let mut mock_repo = MockHitRepository::new();
        mock_repo
            .expect_append()
            .withf(|new_hit| new_hit.ip == "::1 (proxy)")
            .times(1)
            .returning(|new_hit| Ok(new_hit.into_hit(1)));

        let service = HitService::new(Arc::new(mock_repo));

        let result = service
            .record_hit(
                "svc".to_string(),
                "/events/1".to_string(),
                "::1 (proxy)".to_string(),
                None,
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_get_stats_rejects_inverted_window() {
        let mut mock_repo = MockHitRepository::new();
        mock_repo.expect_query_grouped().never();

        let service = HitService::new(Arc::new(mock_repo));

        let result = service.get_stats(ts(12), ts(11), None, false).await;

        match result {
            Err(AppError::Validation { message, .. }) => {
                assert_eq!(message, "start date must be earlier than end date");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_stats_passes_filter_to_repository() {
        let mut mock_repo = MockHitRepository::new();

        mock_repo
            .expect_query_grouped()
            .withf(|filter| {
                filter.start == ts(1)
                    && filter.end == ts(2)
                    && filter.unique
                    && filter.uris.as_deref() == Some(&["/events/1".to_string()][..])
            })
            .times(1)
            .returning(|_| Ok(vec![StatEntry::new("svc", "/events/1", 2)]));

        let service = HitService::new(Arc::new(mock_repo));

        let stats = service
            .get_stats(ts(1), ts(2), Some(vec!["/events/1".to_string()]), true)
            .await
            .unwrap();

        assert_eq!(stats, vec![StatEntry::new("svc", "/events/1", 2)]);
    }

    #[tokio::test]
    async fn test_get_stats_allows_equal_bounds() {
        let mut mock_repo = MockHitRepository::new();
        mock_repo
            .expect_query_grouped()
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = HitService::new(Arc::new(mock_repo));

        let stats = service.get_stats(ts(3), ts(3), None, false).await.unwrap();
        assert!(stats.is_empty());
    }

    #[tokio::test]
    async fn test_get_stats_inverted_by_one_second() {
        let mut mock_repo = MockHitRepository::new();
        mock_repo.expect_query_grouped().never();

        let service = HitService::new(Arc::new(mock_repo));

        let start = ts(3) + Duration::seconds(1);
        let result = service.get_stats(start, ts(3), None, true).await;

        assert!(result.is_err());
    }
}
