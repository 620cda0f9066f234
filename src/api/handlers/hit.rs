//! Handler for hit recording.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::hit::{HitRequest, HitResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Records a single hit.
///
/// # Endpoint
///
/// `POST /hit`
///
/// # Request Body
///
/// ```json
/// {
///   "app": "ewm-main-service",
///   "uri": "/events/1",
///   "ip": "192.163.0.1",
///   "timestamp": "2022-09-06 11:00:23"
/// }
/// ```
///
/// `timestamp` is optional; the server assigns the current time when omitted.
///
/// # Response
///
/// `201 Created` with the stored hit, including its `id`.
///
/// # Errors
///
/// Returns 400 Bad Request if `app` or `uri` is blank or missing, or if the
/// body is not valid JSON for this shape (e.g. a malformed `timestamp`).
pub async fn hit_handler(
    State(state): State<AppState>,
    payload: Result<Json<HitRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<HitResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let hit = state
        .hit_service
        .record_hit(payload.app, payload.uri, payload.ip, payload.timestamp)
        .await?;

    Ok((StatusCode::CREATED, Json(hit.into())))
}
