//! Core types and algorithms for the dwell system.
//!
//! This crate turns a fetched Jira search result into per-issue status and
//! assignee timelines, attributes the time an issue spent in a target status
//! to the people holding it, and rolls that up into a lead-per-issue view.
//! Everything here is synchronous and in-memory; fetching and printing live
//! in the other workspace crates.

pub mod changelog;
pub mod dataset;
pub mod directory;
pub mod jira;
pub mod lead;
pub mod lookup;
pub mod summary;
pub mod timestamp;
pub mod transition;
pub mod workload;
