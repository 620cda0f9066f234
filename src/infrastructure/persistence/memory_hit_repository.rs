//! In-memory implementation of the hit log.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::{Hit, NewHit, StatEntry};
use crate::domain::repositories::{HitRepository, StatsFilter};
use crate::error::AppError;

#[derive(Default)]
struct HitLog {
    last_id: i64,
    hits: Vec<Hit>,
}

/// A process-local hit log.
///
/// Selected with `HIT_STORE=memory`. Hits are lost when the process exits.
/// Appends take the write lock for the duration of a push, so concurrent
/// writers never lose records; queries take the read lock and see every hit
/// appended before they acquired it.
pub struct MemoryHitRepository {
    log: RwLock<HitLog>,
}

impl MemoryHitRepository {
    pub fn new() -> Self {
        debug!("Using in-memory hit log");
        Self {
            log: RwLock::new(HitLog::default()),
        }
    }
}

impl Default for MemoryHitRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HitRepository for MemoryHitRepository {
    async fn append(&self, new_hit: NewHit) -> Result<Hit, AppError> {
        let mut log = self.log.write().await;
        log.last_id += 1;
        let hit = new_hit.into_hit(log.last_id);
        log.hits.push(hit.clone());
        Ok(hit)
    }

    async fn query_grouped(&self, filter: StatsFilter) -> Result<Vec<StatEntry>, AppError> {
        let log = self.log.read().await;

        let mut groups: BTreeMap<(&str, &str), (i64, HashSet<&str>)> = BTreeMap::new();
        for hit in log.hits.iter().filter(|hit| filter.matches(hit)) {
            let (total, ips) = groups
                .entry((hit.app.as_str(), hit.uri.as_str()))
                .or_default();
            *total += 1;
            ips.insert(hit.ip.as_str());
        }

        let mut entries: Vec<StatEntry> = groups
            .into_iter()
            .map(|((app, uri), (total, ips))| {
                let hits = if filter.unique {
                    ips.len() as i64
                } else {
                    total
                };
                StatEntry::new(app, uri, hits)
            })
            .collect();

        entries.sort_by(StatEntry::ranking);
        Ok(entries)
    }

    async fn count_all(&self) -> Result<i64, AppError> {
        Ok(self.log.read().await.hits.len() as i64)
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::sync::Arc;

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn new_hit(app: &str, uri: &str, ip: &str, day: u32) -> NewHit {
        NewHit {
            app: app.to_string(),
            uri: uri.to_string(),
            ip: ip.to_string(),
            timestamp: at(day),
        }
    }

    #[tokio::test]
    async fn test_append_assigns_increasing_ids() {
        let repo = MemoryHitRepository::new();

        let first = repo
            .append(new_hit("svc", "/events/1", "1.1.1.1", 1))
            .await
            .unwrap();
        let second = repo
            .append(new_hit("svc", "/events/1", "1.1.1.1", 1))
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.count_all().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_unique_and_total_counts() {
        let repo = MemoryHitRepository::new();
        repo.append(new_hit("svc", "/events/1", "1.1.1.1", 2))
            .await
            .unwrap();
        repo.append(new_hit("svc", "/events/1", "1.1.1.1", 2))
            .await
            .unwrap();
        repo.append(new_hit("svc", "/events/1", "2.2.2.2", 2))
            .await
            .unwrap();

        let filter = StatsFilter::new(at(1), at(3)).with_uris(Some(vec!["/events/1".into()]));

        let unique = repo
            .query_grouped(filter.clone().with_unique(true))
            .await
            .unwrap();
        assert_eq!(unique, vec![StatEntry::new("svc", "/events/1", 2)]);

        let total = repo.query_grouped(filter).await.unwrap();
        assert_eq!(total, vec![StatEntry::new("svc", "/events/1", 3)]);
    }

    #[tokio::test]
    async fn test_distinct_ips_count_the_same_in_both_modes() {
        let repo = MemoryHitRepository::new();
        let ips: Vec<String> = (1..=7).map(|n| format!("10.0.0.{n}")).collect();
        for ip in &ips {
            repo.append(new_hit("svc", "/events/9", ip, 4)).await.unwrap();
        }

        let filter = StatsFilter::new(at(1), at(10));
        let expected = vec![StatEntry::new("svc", "/events/9", ips.len() as i64)];

        let unique = repo
            .query_grouped(filter.clone().with_unique(true))
            .await
            .unwrap();
        let total = repo.query_grouped(filter).await.unwrap();

        assert_eq!(unique, expected);
        assert_eq!(total, expected);
    }

    #[tokio::test]
    async fn test_groups_by_app_and_uri_sorted_by_hits() {
        let repo = MemoryHitRepository::new();
        for ip in ["1.1.1.1", "2.2.2.2", "3.3.3.3"] {
            repo.append(new_hit("svc", "/events/2", ip, 5)).await.unwrap();
        }
        repo.append(new_hit("svc", "/events/1", "1.1.1.1", 5))
            .await
            .unwrap();
        repo.append(new_hit("other", "/events/2", "1.1.1.1", 5))
            .await
            .unwrap();

        let entries = repo
            .query_grouped(StatsFilter::new(at(1), at(10)))
            .await
            .unwrap();

        assert_eq!(
            entries,
            vec![
                StatEntry::new("svc", "/events/2", 3),
                StatEntry::new("other", "/events/2", 1),
                StatEntry::new("svc", "/events/1", 1),
            ]
        );
    }

    #[tokio::test]
    async fn test_window_without_hits_is_empty() {
        let repo = MemoryHitRepository::new();
        repo.append(new_hit("svc", "/events/1", "1.1.1.1", 20))
            .await
            .unwrap();

        let entries = repo
            .query_grouped(StatsFilter::new(at(1), at(10)))
            .await
            .unwrap();

        assert!(entries.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_are_not_lost() {
        let repo = Arc::new(MemoryHitRepository::new());

        let handles: Vec<_> = (0..50)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.append(new_hit("svc", "/events/1", &format!("10.0.0.{i}"), 1))
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap().id);
        }

        assert_eq!(ids.len(), 50);
        assert_eq!(repo.count_all().await.unwrap(), 50);
    }
}
