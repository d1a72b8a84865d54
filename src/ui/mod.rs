//! Terminal output for the keel CLI
//!
//! - `views` renders events and outcomes as plain text lines
//! - `sink` forwards controller events to the console
//! - `json` writes NDJSON events for `--json`
//! - `output` prints configuration warnings and errors

pub mod json;
pub mod output;
pub mod sink;
pub mod views;
