//! Lead selection: the assignee who held each issue longest.

use std::collections::BTreeMap;

use crate::directory::IssueInfo;
use crate::transition::Assignee;
use crate::workload::{Allocation, IssueAllocation};

/// Issues led by one assignee, with the seconds the lead spent on each.
pub type LeadIssues = BTreeMap<String, f64>;

/// Issues grouped by their lead.
pub type LeadGroup = BTreeMap<Assignee, LeadIssues>;

/// Returns the assignee with the most time on an issue, with that time.
///
/// Ties go to the smallest assignee ([`Assignee::Unassigned`] first, then
/// account ids in lexicographic order). Returns `None` for an empty
/// allocation.
pub fn select_lead(allocation: &IssueAllocation) -> Option<(&Assignee, f64)> {
    let mut lead: Option<(&Assignee, f64)> = None;
    // Ascending key order, so only a strictly larger score displaces the lead.
    for (assignee, seconds) in allocation {
        match lead {
            Some((_, best)) if *seconds <= best => {}
            _ => lead = Some((assignee, *seconds)),
        }
    }
    lead
}

/// Regroups a workload by lead.
///
/// Every issue with a non-empty allocation contributes exactly one entry,
/// under its lead. Issues with an empty allocation are skipped.
pub fn group_by_lead(workload: &Allocation) -> LeadGroup {
    let mut groups = LeadGroup::new();
    for (issue_id, allocation) in workload {
        if let Some((lead, seconds)) = select_lead(allocation) {
            groups
                .entry(lead.clone())
                .or_default()
                .insert(issue_id.clone(), seconds);
        }
    }
    groups
}

/// Sums the estimates of a lead's issues, in seconds.
///
/// Unknown issues and issues without an estimate count as zero.
pub fn total_estimate(issues: &LeadIssues, directory: &BTreeMap<String, IssueInfo>) -> i64 {
    issues
        .keys()
        .filter_map(|id| directory.get(id))
        .filter_map(|info| info.time_estimate)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn user(id: &str) -> Assignee {
        Assignee::User(id.to_string())
    }

    #[test]
    fn scenario_lead_selection() {
        let workload = Allocation::from([
            (
                "I1".to_string(),
                IssueAllocation::from([(user("A"), 5.0), (user("B"), 10.0)]),
            ),
            ("I2".to_string(), IssueAllocation::from([(user("A"), 20.0)])),
        ]);

        let groups = group_by_lead(&workload);

        let want = LeadGroup::from([
            (user("B"), LeadIssues::from([("I1".to_string(), 10.0)])),
            (user("A"), LeadIssues::from([("I2".to_string(), 20.0)])),
        ]);
        assert_eq!(groups, want);
    }

    #[test]
    fn empty_allocations_are_skipped() {
        let workload = Allocation::from([("I1".to_string(), IssueAllocation::new())]);
        assert!(group_by_lead(&workload).is_empty());
    }

    #[test]
    fn ties_go_to_smallest_assignee() {
        let allocation = IssueAllocation::from([(user("b"), 7.0), (user("a"), 7.0), (user("c"), 1.0)]);
        assert_eq!(select_lead(&allocation), Some((&user("a"), 7.0)));

        let with_unassigned = IssueAllocation::from([(user("a"), 7.0), (Assignee::Unassigned, 7.0)]);
        assert_eq!(select_lead(&with_unassigned), Some((&Assignee::Unassigned, 7.0)));
    }

    #[test]
    fn unassigned_can_lead() {
        let workload = Allocation::from([(
            "I1".to_string(),
            IssueAllocation::from([(Assignee::Unassigned, 9.0), (user("a"), 1.0)]),
        )]);
        let groups = group_by_lead(&workload);
        assert_eq!(groups[&Assignee::Unassigned]["I1"], 9.0);
    }

    #[test]
    fn total_estimate_ignores_missing() {
        let directory = BTreeMap::from([
            (
                "1".to_string(),
                IssueInfo {
                    key: "DW-1".into(),
                    title: "One".into(),
                    time_estimate: Some(3600),
                },
            ),
            (
                "2".to_string(),
                IssueInfo {
                    key: "DW-2".into(),
                    title: "Two".into(),
                    time_estimate: None,
                },
            ),
        ]);
        let issues = LeadIssues::from([
            ("1".to_string(), 1.0),
            ("2".to_string(), 1.0),
            ("3".to_string(), 1.0),
        ]);
        assert_eq!(total_estimate(&issues, &directory), 3600);
    }
}
