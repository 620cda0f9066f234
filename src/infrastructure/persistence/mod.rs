//! Hit log repository implementations.
//!
//! # Repositories
//!
//! - [`PgHitRepository`] - PostgreSQL-backed durable log
//! - [`MemoryHitRepository`] - Process-local log for development and tests

pub mod memory_hit_repository;
pub mod pg_hit_repository;

pub use memory_hit_repository::MemoryHitRepository;
pub use pg_hit_repository::PgHitRepository;
