//! Repository trait definitions for the domain layer.
//!
//! The hit log is modelled as an injected storage abstraction instead of
//! ambient global state. Implementations live in
//! `crate::infrastructure::persistence`; mock implementations are generated
//! via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`HitRepository`] - Append-only hit log with grouped queries
//!
//! # Testing
//!
//! See integration tests in `tests/repository_hit.rs` for usage examples.

pub mod hit_repository;

pub use hit_repository::{HitRepository, StatsFilter};

#[cfg(test)]
pub use hit_repository::MockHitRepository;
