//! Terminal styling for dwell reports.
//!
//! Provides Ayu-themed colors, hour formatting and terminal detection for
//! the human-readable output of the CLI.

pub mod styles;
pub mod terminal;
