//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to one endpoint of the wire protocol.

pub mod health;
pub mod hit;
pub mod stats;

pub use health::health_handler;
pub use hit::hit_handler;
pub use stats::stats_handler;
