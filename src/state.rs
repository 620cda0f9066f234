//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::HitService;
use crate::domain::repositories::HitRepository;

/// State shared by all handlers.
///
/// The concrete hit store is chosen at startup, so the service is held
/// behind a trait object.
#[derive(Clone)]
pub struct AppState {
    pub hit_service: Arc<HitService<dyn HitRepository>>,
}

impl AppState {
    pub fn new(repository: Arc<dyn HitRepository>) -> Self {
        Self {
            hit_service: Arc::new(HitService::new(repository)),
        }
    }
}
