//! Utility helpers shared by the server and the client.
//!
//! - [`timestamp`] - The fixed `yyyy-MM-dd HH:mm:ss` wire format for hit timestamps

pub mod timestamp;
