//! `dwell info` -- summarize the saved dataset.

use anyhow::Result;
use dwell_core::summary::{DatasetSummary, summarize};
use dwell_ui::styles::Style;

use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `dwell info` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let response = ctx.load_dataset()?;
    let summary = summarize(&response);

    if ctx.json {
        output_json(&summary);
    } else {
        print!("{}", render_summary(&summary, Style::detect()));
    }
    Ok(())
}

/// Renders the summary as text.
fn render_summary(summary: &DatasetSummary, style: Style) -> String {
    let mut out = String::new();
    out.push_str(&format!("Total issues: {}\n", style.bold(&summary.total_issues.to_string())));
    out.push_str(&format!("Last page: {}\n", summary.is_last_page));

    out.push_str("\nStatus distribution:\n");
    for status in &summary.statuses {
        out.push_str(&format!(
            "  {} {}: {}\n",
            style.muted(&format!("[{}]", status.id)),
            status.name,
            style.accent(&status.count.to_string())
        ));
    }

    out.push_str("\nAssignee distribution:\n");
    for assignee in &summary.assignees {
        out.push_str(&format!(
            "  {}: {}\n",
            assignee.name,
            style.accent(&assignee.count.to_string())
        ));
    }
    out
}
