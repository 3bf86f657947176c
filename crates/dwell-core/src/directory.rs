//! Issue and assignee lookup tables built from a search result.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::Serialize;

use crate::jira::{FIELD_ASSIGNEE, RawIssue};
use crate::timestamp::{Timestamp, TimestampError, parse_timestamp};

/// Display data for one issue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueInfo {
    pub key: String,
    pub title: String,
    /// Estimated remaining time in seconds.
    #[serde(rename = "timeestimate")]
    pub time_estimate: Option<i64>,
}

/// Display data for one assignee.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssigneeInfo {
    pub name: String,
    /// When `name` was last observed in the changelog.
    #[serde(serialize_with = "serialize_seen_at")]
    pub seen_at: Timestamp,
}

/// Maps issue ids to display data. The first occurrence of an id wins.
pub fn map_issues(issues: &[RawIssue]) -> BTreeMap<String, IssueInfo> {
    let mut map = BTreeMap::new();
    for issue in issues {
        map.entry(issue.id.clone()).or_insert_with(|| IssueInfo {
            key: issue.key.clone(),
            title: issue.fields.summary.clone(),
            time_estimate: issue.fields.timeestimate,
        });
    }
    map
}

/// Maps account ids to display names, taken from assignee changelog items.
///
/// When an account shows up under several names, the name from the most
/// recent history entry is kept.
///
/// # Errors
///
/// Returns [`TimestampError::Malformed`] if a history carrying an assignee
/// change has an unparseable timestamp.
pub fn map_assignees(issues: &[RawIssue]) -> Result<BTreeMap<String, AssigneeInfo>, TimestampError> {
    let mut map: BTreeMap<String, AssigneeInfo> = BTreeMap::new();
    for issue in issues {
        for history in &issue.changelog.histories {
            for item in &history.items {
                if !item.is_jira_field(FIELD_ASSIGNEE) {
                    continue;
                }
                let Some(account_id) = item.to.as_ref() else {
                    continue;
                };

                let seen_at = parse_timestamp(&history.created)?;
                let name = item.to_string.clone().unwrap_or_default();
                match map.entry(account_id.clone()) {
                    Entry::Vacant(slot) => {
                        slot.insert(AssigneeInfo { name, seen_at });
                    }
                    Entry::Occupied(mut slot) => {
                        if seen_at > slot.get().seen_at {
                            slot.insert(AssigneeInfo { name, seen_at });
                        }
                    }
                }
            }
        }
    }
    Ok(map)
}

/// Returns the display name of an account, if it is known.
pub fn assignee_name<'a>(map: &'a BTreeMap<String, AssigneeInfo>, account_id: &str) -> Option<&'a str> {
    map.get(account_id).map(|info| info.name.as_str())
}

fn serialize_seen_at<S: serde::Serializer>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&crate::timestamp::format_timestamp(ts))
}
