//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into hit service operations and formats
//! responses according to the wire protocol.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects shared with the client
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request logging middleware
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
