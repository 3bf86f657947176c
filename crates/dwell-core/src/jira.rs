//! Raw Jira search-result model.
//!
//! These types mirror the subset of the `/rest/api/3/search/jql` response
//! (with `expand=changelog`) that the workload computation needs. Unknown
//! fields are ignored so a full `fields=*all` payload deserializes cleanly.

use serde::{Deserialize, Serialize};

/// Value of `fieldtype` for built-in Jira fields.
pub const FIELDTYPE_JIRA: &str = "jira";

/// Name of the status field in changelog items.
pub const FIELD_STATUS: &str = "status";

/// Name of the assignee field in changelog items.
pub const FIELD_ASSIGNEE: &str = "assignee";

/// Top-level search response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub issues: Vec<RawIssue>,

    #[serde(default, rename = "isLast", skip_serializing_if = "Option::is_none")]
    pub is_last: Option<bool>,
}

/// One issue as returned by the search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawIssue {
    pub id: String,
    pub key: String,
    pub fields: RawFields,
    #[serde(default)]
    pub changelog: RawChangelog,
}

/// The issue fields used by dwell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFields {
    #[serde(default)]
    pub summary: String,

    /// Remaining estimate in seconds.
    #[serde(default)]
    pub timeestimate: Option<i64>,

    pub created: String,

    pub status: RawStatus,

    #[serde(default)]
    pub assignee: Option<RawUser>,
}

/// A status reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStatus {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// A user reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUser {
    pub account_id: String,
    #[serde(default)]
    pub display_name: String,
}

/// Expanded changelog of an issue. Histories are newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawChangelog {
    #[serde(default)]
    pub histories: Vec<History>,
}

/// One changelog entry: a set of field changes made at the same instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct History {
    pub created: String,
    #[serde(default)]
    pub items: Vec<HistoryItem>,
}

/// A single field change inside a [`History`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub field: String,

    #[serde(default)]
    pub fieldtype: String,

    #[serde(default)]
    pub from: Option<String>,

    #[serde(default)]
    pub from_string: Option<String>,

    #[serde(default)]
    pub to: Option<String>,

    #[serde(default)]
    pub to_string: Option<String>,
}

impl HistoryItem {
    /// Returns `true` if this item is a change of the built-in field `name`.
    pub fn is_jira_field(&self, name: &str) -> bool {
        self.field == name && self.fieldtype == FIELDTYPE_JIRA
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for [`RawIssue`] values, mostly useful for fixtures.
///
/// History entries are added oldest first and stored newest first, the way
/// Jira returns them.
#[derive(Debug, Clone)]
pub struct RawIssueBuilder {
    issue: RawIssue,
}

impl RawIssueBuilder {
    pub fn new(id: impl Into<String>, created: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            issue: RawIssue {
                key: format!("DW-{}", id),
                id,
                fields: RawFields {
                    summary: String::new(),
                    timeestimate: None,
                    created: created.into(),
                    status: RawStatus {
                        id: String::new(),
                        name: String::new(),
                    },
                    assignee: None,
                },
                changelog: RawChangelog::default(),
            },
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.issue.key = key.into();
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.issue.fields.summary = summary.into();
        self
    }

    pub fn timeestimate(mut self, seconds: i64) -> Self {
        self.issue.fields.timeestimate = Some(seconds);
        self
    }

    pub fn status(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.issue.fields.status = RawStatus {
            id: id.into(),
            name: name.into(),
        };
        self
    }

    pub fn assignee(mut self, account_id: impl Into<String>, name: impl Into<String>) -> Self {
        self.issue.fields.assignee = Some(RawUser {
            account_id: account_id.into(),
            display_name: name.into(),
        });
        self
    }

    /// Records a status change at `created`.
    pub fn status_change(self, created: &str, from: &str, to: &str) -> Self {
        self.change(
            created,
            HistoryItem {
                field: FIELD_STATUS.to_string(),
                fieldtype: FIELDTYPE_JIRA.to_string(),
                from: Some(from.to_string()),
                from_string: None,
                to: Some(to.to_string()),
                to_string: None,
            },
        )
    }

    /// Records an assignee change at `created`. `None` means unassigned.
    pub fn assignee_change(self, created: &str, from: Option<&str>, to: Option<&str>) -> Self {
        self.change(
            created,
            HistoryItem {
                field: FIELD_ASSIGNEE.to_string(),
                fieldtype: FIELDTYPE_JIRA.to_string(),
                from: from.map(str::to_string),
                from_string: from.map(|f| format!("User {}", f)),
                to: to.map(str::to_string),
                to_string: to.map(|t| format!("User {}", t)),
            },
        )
    }

    /// Records an arbitrary changelog item at `created`.
    pub fn change(mut self, created: &str, item: HistoryItem) -> Self {
        self.issue.changelog.histories.insert(
            0,
            History {
                created: created.to_string(),
                items: vec![item],
            },
        );
        self
    }

    pub fn build(self) -> RawIssue {
        self.issue
    }
}
