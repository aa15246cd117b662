//! Small tracker for a weekly workout routine. Mark days as done, keep a note of what you
//! trained, and follow your streak through the week. Finished weeks are archived into a history
//! when a new calendar week begins.
//!

pub mod cli;
pub mod fs;
pub mod tracker;
pub mod utils;
