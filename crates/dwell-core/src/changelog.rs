//! Timeline reconstruction from a Jira changelog.
//!
//! Jira lists histories newest first. Each field's timeline is rebuilt in
//! ascending order and seeded with a synthetic creation entry whose `to` is
//! the value the field held before its first recorded change (or the current
//! value if it never changed).

use std::collections::BTreeMap;

use tracing::debug;

use crate::jira::{FIELD_ASSIGNEE, FIELD_STATUS, RawIssue};
use crate::timestamp::{Timestamp, TimestampError, parse_timestamp};
use crate::transition::{Assignee, Changelog, Timeline, Transition};

/// Builds the status and assignee timelines of one issue.
///
/// # Errors
///
/// Returns [`TimestampError::Malformed`] if the creation timestamp or any
/// relevant history timestamp cannot be parsed.
pub fn build_changelog(issue: &RawIssue) -> Result<Changelog, TimestampError> {
    let created = parse_timestamp(&issue.fields.created)?;

    let mut status_changes = Vec::new();
    let mut assignee_changes = Vec::new();

    // Walk histories oldest first; items within a history keep their order.
    for history in issue.changelog.histories.iter().rev() {
        let relevant = history
            .items
            .iter()
            .any(|item| item.is_jira_field(FIELD_STATUS) || item.is_jira_field(FIELD_ASSIGNEE));
        if !relevant {
            continue;
        }

        let date = parse_timestamp(&history.created)?;
        for item in &history.items {
            if item.is_jira_field(FIELD_STATUS) {
                status_changes.push(Transition::new(date, item.from.clone(), item.to.clone()));
            } else if item.is_jira_field(FIELD_ASSIGNEE) {
                assignee_changes.push(Transition::new(
                    date,
                    Some(Assignee::from_account(item.from.as_deref())),
                    Some(Assignee::from_account(item.to.as_deref())),
                ));
            }
        }
    }

    let current_status = Some(issue.fields.status.id.clone());
    let current_assignee = Some(Assignee::from_account(
        issue.fields.assignee.as_ref().map(|a| a.account_id.as_str()),
    ));

    let statuses = seed_timeline(created, status_changes, current_status);
    let assignees = seed_timeline(created, assignee_changes, current_assignee);

    debug!(
        issue = %issue.key,
        statuses = statuses.len(),
        assignees = assignees.len(),
        "built changelog"
    );

    Ok(Changelog {
        statuses,
        assignees,
    })
}

/// Builds changelogs for every issue in a dataset, keyed by issue id.
///
/// When an id appears more than once the first occurrence wins.
pub fn build_changelogs(issues: &[RawIssue]) -> Result<BTreeMap<String, Changelog>, TimestampError> {
    let mut changelogs = BTreeMap::new();
    for issue in issues {
        if changelogs.contains_key(&issue.id) {
            continue;
        }
        changelogs.insert(issue.id.clone(), build_changelog(issue)?);
    }
    Ok(changelogs)
}

/// Prepends the synthetic creation entry to `changes` and orders the result.
///
/// `changes` must already be oldest first for entries sharing a timestamp;
/// the sort is stable, so their relative order is preserved and the
/// synthetic entry stays ahead of changes made at the creation instant.
fn seed_timeline<T: Clone>(
    created: Timestamp,
    mut changes: Vec<Transition<T>>,
    current: Option<T>,
) -> Timeline<T> {
    changes.sort_by(|a, b| a.date.cmp(&b.date));

    let initial_to = match changes.first() {
        Some(oldest) => oldest.from.clone(),
        None => current,
    };

    let mut timeline = Vec::with_capacity(changes.len() + 1);
    timeline.push(Transition::new(created, None, initial_to));
    timeline.extend(changes);
    timeline
}
