//! API route configuration.
//!
//! The stats service is an internal component and its endpoints are not
//! authenticated.

use crate::api::handlers::{health_handler, hit_handler, stats_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All hit store routes.
///
/// # Endpoints
///
/// - `POST /hit`     - Record a hit
/// - `GET  /stats`   - Grouped hit counts for a time window
/// - `GET  /health`  - Liveness probe with store check
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/hit", post(hit_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
}
