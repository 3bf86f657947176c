//! Quick statistics over a search result.

use std::collections::HashMap;

use serde::Serialize;

use crate::jira::SearchResponse;

/// Name used for issues without an assignee.
pub const UNASSIGNED_NAME: &str = "Unassigned";

/// Issue count for one status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub id: String,
    pub name: String,
    pub count: usize,
}

/// Issue count for one assignee display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssigneeCount {
    pub name: String,
    pub count: usize,
}

/// Distribution of issues over statuses and assignees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub total_issues: usize,
    pub is_last_page: bool,
    pub statuses: Vec<StatusCount>,
    pub assignees: Vec<AssigneeCount>,
}

/// Summarizes a search result.
///
/// Both distributions are sorted by count (descending), then by name.
pub fn summarize(response: &SearchResponse) -> DatasetSummary {
    let mut by_status: HashMap<(&str, &str), usize> = HashMap::new();
    let mut by_assignee: HashMap<&str, usize> = HashMap::new();

    for issue in &response.issues {
        let status = &issue.fields.status;
        *by_status.entry((status.id.as_str(), status.name.as_str())).or_insert(0) += 1;

        let name = issue
            .fields
            .assignee
            .as_ref()
            .map(|a| a.display_name.as_str())
            .unwrap_or(UNASSIGNED_NAME);
        *by_assignee.entry(name).or_insert(0) += 1;
    }

    let mut statuses: Vec<StatusCount> = by_status
        .into_iter()
        .map(|((id, name), count)| StatusCount {
            id: id.to_string(),
            name: name.to_string(),
            count,
        })
        .collect();
    statuses.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut assignees: Vec<AssigneeCount> = by_assignee
        .into_iter()
        .map(|(name, count)| AssigneeCount {
            name: name.to_string(),
            count,
        })
        .collect();
    assignees.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

    DatasetSummary {
        total_issues: response.issues.len(),
        is_last_page: response.is_last.unwrap_or(true),
        statuses,
        assignees,
    }
}
