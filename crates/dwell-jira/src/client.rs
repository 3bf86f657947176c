//! Blocking client for the Jira Cloud search API.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, info};
use ureq::Agent;

use crate::error::Result;

/// Path of the enhanced JQL search endpoint.
const SEARCH_PATH: &str = "/rest/api/3/search/jql";

/// Request timeout for a single search call.
const TIMEOUT: Duration = Duration::from_secs(60);

/// Parameters of one search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub jql: String,
    pub max_results: u32,
    pub fields: String,
    pub expand: String,
}

/// Authenticated Jira client.
pub struct JiraClient {
    agent: Agent,
    search_url: String,
    authorization: String,
}

impl std::fmt::Debug for JiraClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraClient")
            .field("search_url", &self.search_url)
            .finish_non_exhaustive()
    }
}

impl JiraClient {
    /// Creates a client for the site at `base_url` using basic
    /// authentication with an account email and API token.
    pub fn new(base_url: &str, email: &str, api_token: &str) -> Self {
        let config = Agent::config_builder().timeout_global(Some(TIMEOUT)).build();
        Self {
            agent: Agent::new_with_config(config),
            search_url: search_url(base_url),
            authorization: basic_auth(email, api_token),
        }
    }

    /// Returns the search endpoint this client talks to.
    pub fn search_url(&self) -> &str {
        &self.search_url
    }

    /// Runs a search and returns the response body unmodified.
    pub fn search(&self, query: &SearchQuery) -> Result<serde_json::Value> {
        info!(jql = %query.jql, max_results = query.max_results, "searching Jira");

        let mut response = self
            .agent
            .get(&self.search_url)
            .header("Accept", "application/json")
            .header("Authorization", self.authorization.as_str())
            .query("jql", &query.jql)
            .query("maxResults", query.max_results.to_string())
            .query("fields", &query.fields)
            .query("expand", &query.expand)
            .call()?;

        let body: serde_json::Value = response.body_mut().read_json()?;
        debug!(
            issues = body["issues"].as_array().map_or(0, Vec::len),
            is_last = ?body.get("isLast"),
            "search complete"
        );
        Ok(body)
    }
}

fn search_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), SEARCH_PATH)
}

/// Builds an HTTP basic `Authorization` header value.
fn basic_auth(user: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", user, password)))
}
