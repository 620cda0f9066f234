//! Domain layer containing hit entities and the storage contract.
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Concrete stores live in [`crate::infrastructure::persistence`].
//!
//! # Architecture
//!
//! - [`entities`] - Hits and aggregated statistic entries
//! - [`repositories`] - Hit log trait definition and query filter
//!
//! # Recording Flow
//!
//! 1. HTTP handler validates the incoming [`entities::NewHit`]
//! 2. [`crate::application::services::HitService`] stamps a missing timestamp
//! 3. The hit is appended via [`repositories::HitRepository::append`]
//! 4. Queries aggregate the log with [`repositories::HitRepository::query_grouped`]

pub mod entities;
pub mod repositories;
