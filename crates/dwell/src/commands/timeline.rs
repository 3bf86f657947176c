//! `dwell timeline` -- show the reconstructed timelines of one issue.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use dwell_core::changelog::build_changelog;
use dwell_core::directory::map_assignees;
use dwell_core::jira::{FIELD_STATUS, RawIssue};
use dwell_core::lookup::find_at;
use dwell_core::timestamp::{format_timestamp, parse_timestamp};
use dwell_core::transition::{Assignee, Transition};
use dwell_ui::styles::{render_accent, render_bold, render_muted, render_separator};

use crate::cli::TimelineArgs;
use crate::context::RuntimeContext;
use crate::output::{display_name, output_json, output_table};

/// Execute the `dwell timeline` command.
pub fn run(ctx: &RuntimeContext, args: &TimelineArgs) -> Result<()> {
    let response = ctx.load_dataset()?;
    let issue = find_issue(&response.issues, &args.issue).with_context(|| {
        format!(
            "issue '{}' not found in {}",
            args.issue,
            ctx.data_path.display()
        )
    })?;

    let changelog = build_changelog(issue)
        .with_context(|| format!("cannot build changelog of {}", issue.key))?;
    let assignees = map_assignees(&response.issues).context("cannot read assignee history")?;
    let statuses = status_names(&response.issues);

    let at = args
        .at
        .as_deref()
        .map(parse_timestamp)
        .transpose()
        .context("invalid --at timestamp")?;

    let active = at.as_ref().map(|at| {
        (
            find_at(&changelog.statuses, at, args.inclusive),
            find_at(&changelog.assignees, at, args.inclusive),
        )
    });

    if ctx.json {
        let active_json = match (&at, &active) {
            (Some(at), Some((status, assignee))) => serde_json::json!({
                "date": format_timestamp(at),
                "inclusive": args.inclusive,
                "status": status,
                "assignee": assignee,
            }),
            _ => serde_json::Value::Null,
        };
        output_json(&serde_json::json!({
            "id": issue.id,
            "key": issue.key,
            "title": issue.fields.summary,
            "changelog": changelog,
            "active": active_json,
        }));
        return Ok(());
    }

    println!(
        "{} {}: {}",
        render_accent(&issue.key),
        render_muted(&format!("[{}]", issue.id)),
        render_bold(&issue.fields.summary)
    );
    println!("{}", render_separator());

    println!("\nStatus:");
    let status_rows: Vec<Vec<String>> = changelog
        .statuses
        .iter()
        .map(|t| row(t, |id: &String| status_label(id, &statuses)))
        .collect();
    output_table(&["DATE", "FROM", "TO"], &status_rows);

    println!("\nAssignee:");
    let assignee_rows: Vec<Vec<String>> = changelog
        .assignees
        .iter()
        .map(|t| row(t, |a: &Assignee| display_name(a, &assignees)))
        .collect();
    output_table(&["DATE", "FROM", "TO"], &assignee_rows);

    if let (Some(at), Some((status, assignee))) = (at.as_ref(), active) {
        let mode = if args.inclusive { "at or before" } else { "before" };
        println!("\nActive {} {}:", mode, format_timestamp(at));
        if let Some(t) = status {
            println!("  status:   {}", holder(t, |id: &String| status_label(id, &statuses)));
        }
        if let Some(t) = assignee {
            println!("  assignee: {}", holder(t, |a: &Assignee| display_name(a, &assignees)));
        }
    }
    Ok(())
}

/// Finds an issue by id or, failing that, by key.
fn find_issue<'a>(issues: &'a [RawIssue], id_or_key: &str) -> Option<&'a RawIssue> {
    issues
        .iter()
        .find(|i| i.id == id_or_key)
        .or_else(|| issues.iter().find(|i| i.key.eq_ignore_ascii_case(id_or_key)))
}

/// Status id to name, from current statuses and status changelog items.
fn status_names(issues: &[RawIssue]) -> BTreeMap<String, String> {
    let mut names = BTreeMap::new();
    for issue in issues {
        let status = &issue.fields.status;
        if !status.name.is_empty() {
            names.insert(status.id.clone(), status.name.clone());
        }
        let items = issue
            .changelog
            .histories
            .iter()
            .flat_map(|h| &h.items)
            .filter(|item| item.is_jira_field(FIELD_STATUS));
        for item in items {
            for (id, name) in [(&item.from, &item.from_string), (&item.to, &item.to_string)] {
                if let (Some(id), Some(name)) = (id, name) {
                    names.entry(id.clone()).or_insert_with(|| name.clone());
                }
            }
        }
    }
    names
}

fn status_label(id: &str, names: &BTreeMap<String, String>) -> String {
    match names.get(id) {
        Some(name) => format!("{} [{}]", name, id),
        None => format!("[{}]", id),
    }
}

fn row<T>(t: &Transition<T>, label: impl Fn(&T) -> String) -> Vec<String> {
    vec![
        format_timestamp(&t.date),
        t.from.as_ref().map(&label).unwrap_or_else(|| "-".to_string()),
        t.to.as_ref().map(&label).unwrap_or_else(|| "-".to_string()),
    ]
}

/// The value a field held after `t`.
fn holder<T>(t: &Transition<T>, label: impl Fn(&T) -> String) -> String {
    t.to.as_ref().map(label).unwrap_or_else(|| "-".to_string())
}
