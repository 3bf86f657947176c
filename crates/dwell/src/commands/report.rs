//! `dwell report` -- attribute time in a status to assignees.
//!
//! Loads the dataset, rebuilds every issue's status and assignee timelines,
//! splits the time each issue spent in the target status among its
//! assignees and prints the result per issue and/or per lead.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use dwell_core::changelog::build_changelogs;
use dwell_core::directory::{AssigneeInfo, IssueInfo, map_assignees, map_issues};
use dwell_core::lead::{LeadGroup, group_by_lead, total_estimate};
use dwell_core::workload::{Allocation, calculate_workload};
use dwell_ui::styles::{Style, banner, format_seconds};
use serde::Serialize;
use tracing::info;

use crate::cli::ReportArgs;
use crate::context::RuntimeContext;
use crate::output::{display_name, leads_view, output_json, workload_view};

/// Key and title shown for an issue missing from the directory.
const UNKNOWN_KEY: &str = "UNKNOWN";
const UNKNOWN_TITLE: &str = "Unknown Issue";

/// Execute the `dwell report` command.
pub fn run(ctx: &RuntimeContext, args: &ReportArgs) -> Result<()> {
    let status_id = ctx.config.resolve_status(&args.status);
    let response = ctx.load_dataset()?;

    let issues = map_issues(&response.issues);
    let assignees = map_assignees(&response.issues).context("cannot read assignee history")?;
    let changelogs = build_changelogs(&response.issues).context("cannot build changelogs")?;

    let workload = calculate_workload(&changelogs, status_id);
    let leads = group_by_lead(&workload);
    info!(
        status = status_id,
        issues = response.issues.len(),
        measured = workload.len(),
        leads = leads.len(),
        "workload computed"
    );

    if ctx.json {
        output_json(&serde_json::json!({
            "status": status_id,
            "workload": workload_view(&workload),
            "leads": leads_view(&leads),
        }));
        return Ok(());
    }

    if ctx.verbose {
        print_debug("Issue Map", &issues)?;
        print_debug("Assignee Map", &assignees)?;
        print_debug("Changelog", &changelogs)?;
        print_debug("Workload", &workload_view(&workload))?;
        println!();
    }

    let style = Style::detect();
    if args.report.includes_issues() {
        print!("{}", issue_report(&workload, &issues, &assignees, style));
    }
    if args.report.includes_assignees() {
        print!("{}", assignee_report(&leads, &issues, &assignees, style));
    }
    Ok(())
}

fn print_debug<T: Serialize>(title: &str, value: &T) -> Result<()> {
    println!("{}", banner(&format!("DEBUG: {}", title)));
    println!("{}", serde_json::to_string_pretty(value)?);
    println!();
    Ok(())
}

fn issue_heading(issue_id: &str, issues: &BTreeMap<String, IssueInfo>) -> (String, String) {
    match issues.get(issue_id) {
        Some(info) => (info.key.clone(), info.title.clone()),
        None => (UNKNOWN_KEY.to_string(), UNKNOWN_TITLE.to_string()),
    }
}

/// Per issue, every assignee with the seconds they held it, longest first.
fn issue_report(
    workload: &Allocation,
    issues: &BTreeMap<String, IssueInfo>,
    assignees: &BTreeMap<String, AssigneeInfo>,
    style: Style,
) -> String {
    let mut out = style.banner("Issues Report");
    out.push('\n');

    for (issue_id, allocation) in workload {
        let (key, title) = issue_heading(issue_id, issues);
        out.push_str(&format!(
            "\n{} {}: {} ===\n",
            style.accent(&key),
            style.muted(&format!("[{}]", issue_id)),
            title
        ));

        if allocation.is_empty() {
            out.push_str("  No assignees found\n");
            continue;
        }

        let mut ranked: Vec<_> = allocation.iter().collect();
        // Stable sort keeps assignee order for equal scores.
        ranked.sort_by(|a, b| b.1.total_cmp(a.1));
        for (assignee, seconds) in ranked {
            out.push_str(&format!(
                "  {}: {}\n",
                display_name(assignee, assignees),
                format_seconds(*seconds)
            ));
        }
    }
    out.push_str("\n\n");
    out
}

/// Per lead, total estimated hours and the issues they led.
fn assignee_report(
    leads: &LeadGroup,
    issues: &BTreeMap<String, IssueInfo>,
    assignees: &BTreeMap<String, AssigneeInfo>,
    style: Style,
) -> String {
    let mut out = style.banner("Assignees Report");
    out.push('\n');

    for (lead, led) in leads {
        let total = total_estimate(led, issues);
        out.push_str(&format!(
            "\n{} {}: {} ===\n",
            display_name(lead, assignees),
            style.muted(&format!("[{}]", lead.key())),
            style.hours(total as f64)
        ));

        let mut ranked: Vec<_> = led.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(a.1));
        for (issue_id, _) in ranked {
            let (key, title) = issue_heading(issue_id, issues);
            let estimate = issues
                .get(issue_id.as_str())
                .and_then(|info| info.time_estimate)
                .unwrap_or(0);
            out.push_str(&format!(
                "  {} {}: {} - {}\n",
                style.accent(&key),
                style.muted(&format!("[{}]", issue_id)),
                title,
                style.hours(estimate as f64)
            ));
        }
    }
    out.push_str("\n\n");
    out
}
