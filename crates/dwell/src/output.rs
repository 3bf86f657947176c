//! Output formatting helpers for the `dwell` CLI.
//!
//! Provides JSON output, table formatting and the JSON views of workload
//! and lead results.

use std::collections::BTreeMap;
use std::io::{self, Write};

use dwell_core::directory::{AssigneeInfo, assignee_name};
use dwell_core::lead::LeadGroup;
use dwell_core::summary::UNASSIGNED_NAME;
use dwell_core::transition::Assignee;
use dwell_core::workload::Allocation;
use serde::Serialize;

/// Print a value as pretty-printed JSON to stdout.
///
/// Terminates the process with exit code 1 if serialization fails.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print a simple table with headers and rows to stdout.
pub fn output_table(headers: &[&str], rows: &[Vec<String>]) {
    let table = format_table(headers, rows);
    if !table.is_empty() {
        let _ = write!(io::stdout().lock(), "{}", table);
    }
}

/// Lays out a table with left-aligned columns sized to their widest cell.
///
/// Returns an empty string when there are no rows.
pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let render_row = |cells: Vec<&str>| -> String {
        let last = cells.len().saturating_sub(1);
        let mut line = String::new();
        for (i, cell) in cells.into_iter().enumerate() {
            if i > 0 {
                line.push_str("  ");
            }
            if i < last && i < widths.len() {
                line.push_str(&format!("{:<width$}", cell, width = widths[i]));
            } else {
                line.push_str(cell);
            }
        }
        line.push('\n');
        line
    };

    let mut out = render_row(headers.to_vec());
    let rules: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&render_row(rules.iter().map(String::as_str).collect()));
    for row in rows {
        out.push_str(&render_row(row.iter().map(String::as_str).collect()));
    }
    out
}

/// Human-readable name of an assignee.
///
/// Account ids missing from the directory render as `Unknown (<id>)`.
pub fn display_name(assignee: &Assignee, directory: &BTreeMap<String, AssigneeInfo>) -> String {
    match assignee {
        Assignee::Unassigned => UNASSIGNED_NAME.to_string(),
        Assignee::User(id) => assignee_name(directory, id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Unknown ({})", id)),
    }
}

/// Workload keyed by issue id, then by assignee key.
pub type WorkloadView = BTreeMap<String, BTreeMap<String, f64>>;

/// Lead groups keyed by assignee key, then by issue id.
pub type LeadsView = BTreeMap<String, BTreeMap<String, f64>>;

/// Converts a workload into string-keyed maps for JSON output.
pub fn workload_view(workload: &Allocation) -> WorkloadView {
    workload
        .iter()
        .map(|(issue_id, allocation)| {
            let by_key = allocation
                .iter()
                .map(|(assignee, seconds)| (assignee.key().to_string(), *seconds))
                .collect();
            (issue_id.clone(), by_key)
        })
        .collect()
}

/// Converts lead groups into string-keyed maps for JSON output.
pub fn leads_view(leads: &LeadGroup) -> LeadsView {
    leads
        .iter()
        .map(|(assignee, issues)| (assignee.key().to_string(), issues.clone()))
        .collect()
}
