//! Attribution of target-status time to assignees.
//!
//! For each issue the status timeline is scanned for windows spent in the
//! target status, and a single forward cursor over the assignee timeline
//! splits each window among whoever held the issue during it. The cursor is
//! shared by all windows of an issue, so the sweep is linear in the length
//! of both timelines.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::timestamp::{Timestamp, seconds_between};
use crate::transition::{Assignee, Changelog, Transition};

/// Seconds per assignee for one issue.
pub type IssueAllocation = BTreeMap<Assignee, f64>;

/// Seconds per assignee, per issue id.
pub type Allocation = BTreeMap<String, IssueAllocation>;

/// A closed interval `[start, end)` during which an issue held the target
/// status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl Window {
    pub fn seconds(&self) -> f64 {
        seconds_between(&self.start, &self.end)
    }
}

/// Returns the closed target-status windows of a status timeline, in order.
///
/// A window ends at every transition leaving `target` and starts at the
/// transition before it. A stay in `target` with no exit yet is not a
/// window.
pub fn target_windows(statuses: &[Transition<String>], target: &str) -> Vec<Window> {
    statuses
        .windows(2)
        .filter(|pair| pair[1].from.as_deref() == Some(target))
        .map(|pair| Window {
            start: pair[0].date,
            end: pair[1].date,
        })
        .collect()
}

/// Splits the target-status time of one issue among its assignees.
///
/// Returns `None` when the issue never left `target`. Overlaps of zero
/// length are not recorded, so the returned map may be empty.
pub fn allocate(
    statuses: &[Transition<String>],
    assignees: &[Transition<Assignee>],
    target: &str,
) -> Option<IssueAllocation> {
    let windows = target_windows(statuses, target);
    if windows.is_empty() {
        return None;
    }

    let mut totals = IssueAllocation::new();
    let mut cursor = 0;

    for window in &windows {
        trace!(start = %window.start, end = %window.end, "allocating window");

        while cursor < assignees.len() && assignees[cursor].date < window.start {
            cursor += 1;
        }

        let mut start = window.start;
        loop {
            let Some(transition) = assignees.get(cursor) else {
                // Past the last change: the final holder keeps the issue.
                let holder = assignees.last().and_then(|t| t.to.as_ref());
                credit(&mut totals, holder, &start, &window.end);
                break;
            };

            // Whoever gave the issue up at this transition held it until then.
            let until = transition.date.min(window.end);
            credit(&mut totals, transition.from.as_ref(), &start, &until);

            if transition.date >= window.end {
                // Still held past this window; a later window re-examines it.
                break;
            }
            start = transition.date;
            cursor += 1;
        }
    }

    Some(totals)
}

/// Computes the allocation for every issue.
///
/// Issues that never left `target` are absent from the result.
pub fn calculate_workload(changelogs: &BTreeMap<String, Changelog>, target: &str) -> Allocation {
    let mut workload = Allocation::new();
    for (issue_id, log) in changelogs {
        if let Some(allocation) = allocate(&log.statuses, &log.assignees, target) {
            debug!(issue = %issue_id, assignees = allocation.len(), "allocated issue");
            workload.insert(issue_id.clone(), allocation);
        }
    }
    workload
}

/// Adds the length of `[start, end)` to `holder`'s total.
///
/// Intervals without a holder precede the issue's creation and are dropped.
fn credit(totals: &mut IssueAllocation, holder: Option<&Assignee>, start: &Timestamp, end: &Timestamp) {
    let seconds = seconds_between(start, end);
    if seconds <= 0.0 {
        return;
    }
    match holder {
        Some(assignee) => *totals.entry(assignee.clone()).or_insert(0.0) += seconds,
        None => trace!(seconds, "dropping interval with no holder"),
    }
}
