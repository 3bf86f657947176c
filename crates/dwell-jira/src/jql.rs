//! JQL construction.

use chrono::NaiveDate;

use crate::error::{JiraError, Result};

/// What to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchScope {
    /// Specific issues by key.
    Keys(Vec<String>),

    /// Issues of a project updated within `[start, end]`, leaving out
    /// issues whose status is in `excluded_statuses`.
    Updated {
        project: String,
        start: NaiveDate,
        end: NaiveDate,
        excluded_statuses: Vec<String>,
    },
}

impl SearchScope {
    /// Picks the scope from command-line style inputs.
    ///
    /// Issue keys take precedence; otherwise both dates are required.
    pub fn from_inputs(
        keys: &[String],
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        project: &str,
        excluded_statuses: &[String],
    ) -> Result<Self> {
        if !keys.is_empty() {
            return Ok(Self::Keys(keys.to_vec()));
        }
        match (start, end) {
            (Some(start), Some(end)) => {
                if end < start {
                    return Err(JiraError::invalid_search(format!(
                        "end date {} is before start date {}",
                        end, start
                    )));
                }
                Ok(Self::Updated {
                    project: project.to_string(),
                    start,
                    end,
                    excluded_statuses: excluded_statuses.to_vec(),
                })
            }
            _ => Err(JiraError::invalid_search(
                "--start-date and --end-date required when no issue keys provided",
            )),
        }
    }
}

/// Renders a scope as JQL.
pub fn build_jql(scope: &SearchScope) -> String {
    match scope {
        SearchScope::Keys(keys) => format!("key in ({})", keys.join(",")),
        SearchScope::Updated {
            project,
            start,
            end,
            excluded_statuses,
        } => {
            let mut jql = format!(
                "project = {} and updated >= {} and updated <= {}",
                project,
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            );
            if !excluded_statuses.is_empty() {
                let quoted: Vec<String> = excluded_statuses.iter().map(|s| quote(s)).collect();
                jql.push_str(&format!(" and status not in ({})", quoted.join(", ")));
            }
            jql
        }
    }
}

/// Quotes a JQL string literal with single quotes.
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}
