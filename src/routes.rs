//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /hit`     - Record a hit
//! - `GET  /stats`   - Aggregated hit counts
//! - `GET  /health`  - Health check with store probe
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response spans
//! - **Access log** - One line per request with peer address
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::{access_log, tracing};
use crate::state::AppState;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .merge(api::routes::routes())
        .with_state(state)
        .layer(middleware::from_fn(access_log::layer))
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
