//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin tool.
//!
//! # Available Services
//!
//! - [`services::hit_service::HitService`] - Hit recording and windowed aggregation

pub mod services;
