//! PostgreSQL implementation of the hit log.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Hit, NewHit, StatEntry};
use crate::domain::repositories::{HitRepository, StatsFilter};
use crate::error::AppError;

#[derive(FromRow)]
struct HitRow {
    id: i64,
    app: String,
    uri: String,
    ip: String,
    visited_at: NaiveDateTime,
}

impl From<HitRow> for Hit {
    fn from(row: HitRow) -> Self {
        Hit::new(row.id, row.app, row.uri, row.ip, row.visited_at)
    }
}

#[derive(FromRow)]
struct StatRow {
    app: String,
    uri: String,
    hits: i64,
}

/// PostgreSQL repository for the append-only hit log.
///
/// Every hit is a row in `hits`; aggregation is done by the database with
/// `GROUP BY app, uri`.
pub struct PgHitRepository {
    pool: Arc<PgPool>,
}

impl PgHitRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Returns the timestamps of the oldest and newest hit, if any.
    pub async fn time_range(
        &self,
    ) -> Result<Option<(NaiveDateTime, NaiveDateTime)>, AppError> {
        let row: (Option<NaiveDateTime>, Option<NaiveDateTime>) =
            sqlx::query_as("SELECT MIN(visited_at), MAX(visited_at) FROM hits")
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(match row {
            (Some(first), Some(last)) => Some((first, last)),
            _ => None,
        })
    }
}

#[async_trait]
impl HitRepository for PgHitRepository {
    async fn append(&self, new_hit: NewHit) -> Result<Hit, AppError> {
        let row = sqlx::query_as::<_, HitRow>(
            r#"
            INSERT INTO hits (app, uri, ip, visited_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, app, uri, ip, visited_at
            "#,
        )
        .bind(&new_hit.app)
        .bind(&new_hit.uri)
        .bind(&new_hit.ip)
        .bind(new_hit.timestamp)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn query_grouped(&self, filter: StatsFilter) -> Result<Vec<StatEntry>, AppError> {
        let rows = sqlx::query_as::<_, StatRow>(
            r#"
            SELECT
                app,
                uri,
                CASE WHEN $4::boolean THEN COUNT(DISTINCT ip) ELSE COUNT(*) END AS hits
            FROM hits
            WHERE visited_at BETWEEN $1 AND $2
              AND ($3::text[] IS NULL OR uri = ANY($3))
            GROUP BY app, uri
            ORDER BY hits DESC, app ASC, uri ASC
            "#,
        )
        .bind(filter.start)
        .bind(filter.end)
        .bind(filter.uris.as_deref())
        .bind(filter.unique)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| StatEntry::new(r.app, r.uri, r.hits))
            .collect())
    }

    async fn count_all(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM hits")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
