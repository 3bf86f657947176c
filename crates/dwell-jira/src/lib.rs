//! Jira integration for the dwell system.
//!
//! Provides JQL construction for the two supported search scopes and a
//! blocking client for the Jira Cloud `search/jql` endpoint. Responses are
//! returned as raw JSON so they can be saved verbatim.

pub mod client;
pub mod error;
pub mod jql;

pub use client::{JiraClient, SearchQuery};
pub use error::{JiraError, Result};
