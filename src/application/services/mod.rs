//! Business logic services for the application layer.

pub mod hit_service;

pub use hit_service::HitService;
