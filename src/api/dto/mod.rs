//! Data Transfer Objects for the wire protocol.
//!
//! The same types are used by the server handlers and by
//! [`crate::client::HttpStatsClient`], so both sides agree on field names and
//! the `yyyy-MM-dd HH:mm:ss` timestamp format.

pub mod health;
pub mod hit;
pub mod stats;
