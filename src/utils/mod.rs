//! Utility modules shared by the draft store and the CLI.
//!
//! - [`datetime`] - Epoch-millisecond clock, date formatting and relative time

pub mod datetime;
