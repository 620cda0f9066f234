//! HTTP middleware for request processing.
//!
//! Provides observability middleware.

pub mod access_log;
pub mod tracing;
