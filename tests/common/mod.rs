#![allow(dead_code)]

use axum::Router;
use hit_stats::api;
use hit_stats::domain::repositories::HitRepository;
use hit_stats::infrastructure::persistence::MemoryHitRepository;
use hit_stats::routes::app_router;
use hit_stats::state::AppState;
use hit_stats::utils::timestamp;
use std::net::SocketAddr;
use std::sync::Arc;

pub fn create_test_state() -> (AppState, Arc<MemoryHitRepository>) {
    let repo = Arc::new(MemoryHitRepository::new());
    let state = AppState::new(repo.clone() as Arc<dyn HitRepository>);
    (state, repo)
}

pub fn create_test_router() -> (Router, Arc<MemoryHitRepository>) {
    let (state, repo) = create_test_state();
    let app = api::routes::routes().with_state(state);
    (app, repo)
}

/// Serves the full application on an ephemeral local port.
pub async fn spawn_server() -> (String, Arc<MemoryHitRepository>) {
    let (state, repo) = create_test_state();
    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            axum::ServiceExt::<axum::extract::Request>::into_make_service_with_connect_info::<
                SocketAddr,
            >(app),
        )
        .await
        .unwrap();
    });

    (format!("http://{addr}"), repo)
}

/// An address nothing listens on.
pub async fn unused_address() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn ts(value: &str) -> chrono::NaiveDateTime {
    timestamp::parse(value).unwrap()
}
