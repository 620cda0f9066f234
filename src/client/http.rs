//! HTTP adapter for [`StatsClient`].

use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::{Client, Response};
use tracing::{debug, error, warn};
use url::Url;

use super::{ClientError, StatsClient, StatsClientConfig};
use crate::api::dto::hit::HitRequest;
use crate::api::dto::stats::StatEntryResponse;
use crate::domain::entities::StatEntry;
use crate::utils::timestamp;

/// [`StatsClient`] talking to the stats service over HTTP.
///
/// Cheap to clone; clones share the underlying connection pool. Each call
/// makes exactly one request bounded by the configured timeout. Nothing is
/// retried and no outage state is remembered between calls.
#[derive(Clone)]
pub struct HttpStatsClient {
    http: Client,
    base_url: Url,
}

impl HttpStatsClient {
    /// Builds a client for the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if the base URL does not parse and
    /// [`ClientError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: &StatsClientConfig) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(&config.base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = Client::builder()
            .user_agent(concat!("hit-stats-client/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path)?)
    }

    async fn try_record_hit(&self, app: &str, uri: &str, ip: &str) -> Result<(), ClientError> {
        let body = HitRequest {
            app: app.to_string(),
            uri: uri.to_string(),
            ip: ip.to_string(),
            timestamp: Some(timestamp::now()),
        };

        let response = self
            .http
            .post(self.endpoint("hit")?)
            .json(&body)
            .send()
            .await?;
        ensure_success(response).await?;

        debug!("Hit saved: app={}, uri={}, ip={}", app, uri, ip);
        Ok(())
    }

    async fn try_get_stats(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        uris: Option<&[String]>,
        unique: Option<bool>,
    ) -> Result<Vec<StatEntry>, ClientError> {
        let mut url = self.endpoint("stats")?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("start", &timestamp::format(&start));
            query.append_pair("end", &timestamp::format(&end));
            if let Some(uris) = uris.filter(|uris| !uris.is_empty()) {
                query.append_pair("uris", &uris.join(","));
            }
            if let Some(unique) = unique {
                query.append_pair("unique", if unique { "true" } else { "false" });
            }
        }

        let response = self.http.get(url).send().await?;
        let response = ensure_success(response).await?;

        let entries: Vec<StatEntryResponse> =
            response.json().await.map_err(ClientError::Decode)?;

        Ok(entries
            .into_iter()
            .map(|e| StatEntry::new(e.app, e.uri, e.hits))
            .collect())
    }

    async fn try_views_for_uri(
        &self,
        uri: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
        unique: bool,
    ) -> Result<i64, ClientError> {
        let requested = [uri.to_string()];
        let entries = self
            .try_get_stats(start, end, Some(&requested[..]), Some(unique))
            .await?;

        Ok(first_hits_for_uri(&entries, uri).unwrap_or(0))
    }

    async fn try_health(&self) -> Result<(), ClientError> {
        let response = self.http.get(self.endpoint("health")?).send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl StatsClient for HttpStatsClient {
    async fn record_hit(&self, app: &str, uri: &str, ip: &str) {
        or_default("record_hit", self.try_record_hit(app, uri, ip).await)
    }

    async fn get_stats(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        uris: Option<Vec<String>>,
        unique: Option<bool>,
    ) -> Vec<StatEntry> {
        or_default(
            "get_stats",
            self.try_get_stats(start, end, uris.as_deref(), unique).await,
        )
    }

    async fn get_views_for_uri(
        &self,
        uri: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
        unique: bool,
    ) -> i64 {
        or_default(
            "get_views_for_uri",
            self.try_views_for_uri(uri, start, end, unique).await,
        )
    }

    async fn is_available(&self) -> bool {
        match self.try_health().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Stats service is not available: {}", e);
                metrics::counter!("stats_client_failures_total", "operation" => "is_available")
                    .increment(1);
                false
            }
        }
    }
}

/// Single funnel for client failures: log, count, return the empty value.
fn or_default<T: Default>(operation: &'static str, result: Result<T, ClientError>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            error!(operation, "Stats client call failed: {}", e);
            metrics::counter!("stats_client_failures_total", "operation" => operation)
                .increment(1);
            T::default()
        }
    }
}

/// Turns non-2xx responses into [`ClientError::Status`].
async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Picks the first entry for `uri` in the order the server returned them.
fn first_hits_for_uri(entries: &[StatEntry], uri: &str) -> Option<i64> {
    entries.iter().find(|e| e.uri == uri).map(|e| e.hits)
}
