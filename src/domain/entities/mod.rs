//! Core domain entities.
//!
//! - [`Hit`] - A single recorded visit, immutable once stored
//! - [`NewHit`] - Input for appending a hit to the log
//! - [`StatEntry`] - Per `(app, uri)` count computed for one query

pub mod hit;
pub mod stat_entry;

pub use hit::{Hit, NewHit};
pub use stat_entry::StatEntry;
