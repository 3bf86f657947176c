//! Transition and timeline types.
//!
//! A [`Timeline`] is the ordered history of one field of one issue. Its first
//! entry is always synthetic: it carries the value the field had when the
//! issue was created and has no `from` value.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::timestamp::{Timestamp, format_timestamp};

/// Label used for the unassigned bucket in human-facing and keyed output.
pub const UNASSIGNED_LABEL: &str = "unassigned";

// ---------------------------------------------------------------------------
// Assignee
// ---------------------------------------------------------------------------

/// Who held an issue.
///
/// `Unassigned` is a real state of the issue, distinct from "no value known"
/// (which is `Option::None` around an `Assignee`). Ordering puts
/// `Unassigned` before every account id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Assignee {
    Unassigned,
    User(String),
}

impl Assignee {
    /// Maps a nullable Jira account id onto an assignee.
    pub fn from_account(account_id: Option<&str>) -> Self {
        match account_id {
            Some(id) => Self::User(id.to_string()),
            None => Self::Unassigned,
        }
    }

    /// Returns the account id, or `None` when unassigned.
    pub fn account_id(&self) -> Option<&str> {
        match self {
            Self::User(id) => Some(id),
            Self::Unassigned => None,
        }
    }

    /// Returns a string usable as a map key: the account id, or
    /// [`UNASSIGNED_LABEL`].
    pub fn key(&self) -> &str {
        self.account_id().unwrap_or(UNASSIGNED_LABEL)
    }
}

impl fmt::Display for Assignee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for Assignee {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// Transition
// ---------------------------------------------------------------------------

/// A change of one field at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transition<T> {
    #[serde(serialize_with = "serialize_timestamp")]
    pub date: Timestamp,
    pub from: Option<T>,
    pub to: Option<T>,
}

impl<T> Transition<T> {
    pub fn new(date: Timestamp, from: Option<T>, to: Option<T>) -> Self {
        Self { date, from, to }
    }

    /// Returns `true` for the synthetic creation entry (no prior value).
    pub fn is_initial(&self) -> bool {
        self.from.is_none()
    }
}

/// A status change; values are Jira status ids.
pub type StatusTransition = Transition<String>;

/// An assignee change.
pub type AssigneeTransition = Transition<Assignee>;

/// Ordered transitions of a single field of a single issue.
pub type Timeline<T> = Vec<Transition<T>>;

/// Both timelines of one issue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Changelog {
    pub statuses: Timeline<String>,
    pub assignees: Timeline<Assignee>,
}

fn serialize_timestamp<S: Serializer>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(ts))
}
