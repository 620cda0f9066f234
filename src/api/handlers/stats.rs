//! Handler for windowed hit statistics.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use crate::api::dto::stats::{StatEntryResponse, StatsQueryParams};
use crate::error::AppError;
use crate::state::AppState;

/// Returns hit counts grouped by `(app, uri)` for a time window.
///
/// # Endpoint
///
/// `GET /stats`
///
/// # Query Parameters
///
/// - `start` (required): Window start, `yyyy-MM-dd HH:mm:ss`
/// - `end` (required): Window end, `yyyy-MM-dd HH:mm:ss` (inclusive)
/// - `uris` (optional): Comma-separated URIs to restrict the query to
/// - `unique` (optional): Count distinct IPs instead of hits (default: false)
///
/// # Response
///
/// ```json
/// [
///   { "app": "ewm-main-service", "uri": "/events/1", "hits": 6 }
/// ]
/// ```
///
/// Entries are sorted by `hits` descending. A window without hits yields `[]`.
///
/// # Errors
///
/// Returns 400 Bad Request if `start` is after `end`, or if a timestamp is
/// missing or malformed.
pub async fn stats_handler(
    State(state): State<AppState>,
    params: Result<Query<StatsQueryParams>, QueryRejection>,
) -> Result<Json<Vec<StatEntryResponse>>, AppError> {
    let Query(params) = params?;
    let entries = state
        .hit_service
        .get_stats(params.start, params.end, params.uris, params.unique)
        .await?;

    Ok(Json(entries.into_iter().map(Into::into).collect()))
}
