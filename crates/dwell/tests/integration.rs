//! End-to-end CLI integration tests for the `dwell` binary.
//!
//! Every test runs the binary as a subprocess via `assert_cmd` inside its
//! own temporary directory, against the saved search result in
//! `tests/fixtures/search.json`. Nothing here talks to Jira.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/search.json")
}

/// Build a `Command` targeting the cargo-built `dwell` binary with a clean
/// environment: no colors, no config or Jira settings leaking in from the
/// host.
fn dwell(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("dwell").unwrap();
    cmd.current_dir(dir.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("DWELL_CONFIG")
        .env_remove("DWELL_DATA_FILE")
        .env_remove("JIRA_URL")
        .env_remove("JIRA_USER_EMAIL")
        .env_remove("JIRA_USER_API_TOKEN")
        .env_remove("JIRA_PROJECT");
    cmd
}

/// Runs `dwell` against the fixture with `--json` and parses stdout.
fn json(dir: &TempDir, args: &[&str]) -> serde_json::Value {
    let data = fixture();
    let output = dwell(dir)
        .args(args)
        .arg("--json")
        .arg("--data")
        .arg(&data)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "dwell {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

// ---------------------------------------------------------------------------
// info
// ---------------------------------------------------------------------------

#[test]
fn info_prints_distributions() {
    let tmp = TempDir::new().unwrap();
    dwell(&tmp)
        .arg("info")
        .arg("--data")
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("Total issues: 3"))
        .stdout(predicate::str::contains("Last page: true"))
        .stdout(predicate::str::contains("[10002] Done: 2"))
        .stdout(predicate::str::contains("[10111] In Progress: 1"))
        .stdout(predicate::str::contains("Unassigned: 1"));
}

#[test]
fn info_json() {
    let tmp = TempDir::new().unwrap();
    let summary = json(&tmp, &["info"]);
    assert_eq!(summary["total_issues"], 3);
    assert_eq!(summary["is_last_page"], true);
    assert_eq!(summary["statuses"][0]["id"], "10002");
    assert_eq!(summary["statuses"][0]["count"], 2);
    let names: Vec<&str> = summary["assignees"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ada Lovelace", "Grace Hopper", "Unassigned"]);
}

#[test]
fn numeric_environment_values_do_not_break_commands() {
    let tmp = TempDir::new().unwrap();
    dwell(&tmp)
        .arg("info")
        .arg("--data")
        .arg(fixture())
        .env("JIRA_PROJECT", "10200")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total issues: 3"));

    let output = dwell(&tmp)
        .args(["config", "--json"])
        .env("JIRA_PROJECT", "10200")
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let shown: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(shown["config"]["jira"]["project"], "10200");
}

#[test]
fn missing_dataset_suggests_search() {
    let tmp = TempDir::new().unwrap();
    dwell(&tmp)
        .arg("info")
        .assert()
        .failure()
        .stderr(predicate::str::contains("search.json not found"))
        .stderr(predicate::str::contains("dwell search"));
}

#[test]
fn errors_are_json_under_json_flag() {
    let tmp = TempDir::new().unwrap();
    let output = dwell(&tmp).args(["info", "--json"]).output().unwrap();
    assert!(!output.status.success());
    let err: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert!(err["error"].as_str().unwrap().contains("not found"));
}

// ---------------------------------------------------------------------------
// report
// ---------------------------------------------------------------------------

#[test]
fn report_json_development() {
    let tmp = TempDir::new().unwrap();
    let report = json(&tmp, &["report"]);

    assert_eq!(report["status"], "10111");
    let workload = &report["workload"];
    assert_eq!(workload["10001"]["acc-ada"], 3600.0);
    assert_eq!(workload["10001"]["acc-grace"], 7200.0);
    assert_eq!(workload["10003"]["unassigned"], 86400.0);
    // Still in development: the open window is not counted.
    assert!(workload.get("10002").is_none());

    let leads = &report["leads"];
    assert_eq!(leads["acc-grace"]["10001"], 7200.0);
    assert_eq!(leads["unassigned"]["10003"], 86400.0);
    assert!(leads.get("acc-ada").is_none());
}

#[test]
fn report_status_alias_and_id_agree() {
    let tmp = TempDir::new().unwrap();
    let by_alias = json(&tmp, &["report", "--status", "review"]);
    let by_id = json(&tmp, &["report", "--status", "10359"]);
    assert_eq!(by_alias, by_id);
    assert_eq!(by_alias["workload"]["10003"]["unassigned"], 10800.0);
    assert_eq!(by_alias["workload"].as_object().unwrap().len(), 1);
}

#[test]
fn report_text_both() {
    let tmp = TempDir::new().unwrap();
    dwell(&tmp)
        .args(["report", "--report", "both", "--data"])
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Issues Report ==="))
        .stdout(predicate::str::contains("DW-1 [10001]: Login page ==="))
        .stdout(predicate::str::contains("  Grace Hopper: 7200.00"))
        .stdout(predicate::str::contains("  Ada Lovelace: 3600.00"))
        .stdout(predicate::str::contains("=== Assignees Report ==="))
        .stdout(predicate::str::contains(
            "Grace Hopper [acc-grace]: 2.00 hours ===",
        ))
        .stdout(predicate::str::contains(
            "  DW-3 [10003]: Search index - 1.00 hours",
        ))
        .stdout(predicate::str::contains("DW-2").not());
}

#[test]
fn report_none_prints_nothing() {
    let tmp = TempDir::new().unwrap();
    dwell(&tmp)
        .args(["report", "--report", "none", "--data"])
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn report_verbose_dumps_debug_sections() {
    let tmp = TempDir::new().unwrap();
    dwell(&tmp)
        .args(["report", "--report", "none", "-v", "--data"])
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("=== DEBUG: Issue Map ==="))
        .stdout(predicate::str::contains("=== DEBUG: Assignee Map ==="))
        .stdout(predicate::str::contains("=== DEBUG: Changelog ==="))
        .stdout(predicate::str::contains("=== DEBUG: Workload ==="));
}

// ---------------------------------------------------------------------------
// timeline
// ---------------------------------------------------------------------------

#[test]
fn timeline_lookup_is_exclusive_by_default() {
    let tmp = TempDir::new().unwrap();
    let at = "2023-01-02T10:00:00.000+0000";

    let before = json(&tmp, &["timeline", "DW-1", "--at", at]);
    assert_eq!(before["active"]["assignee"]["to"], "acc-ada");
    assert_eq!(before["active"]["status"]["to"], "10111");

    let inclusive = json(&tmp, &["timeline", "DW-1", "--at", at, "--inclusive"]);
    assert_eq!(inclusive["active"]["assignee"]["to"], "acc-grace");
}

#[test]
fn timeline_clamps_to_creation() {
    let tmp = TempDir::new().unwrap();
    let early = json(&tmp, &["timeline", "10003", "--at", "2020-01-01T00:00:00.000+0000"]);
    assert_eq!(early["key"], "DW-3");
    assert_eq!(early["active"]["status"]["from"], serde_json::Value::Null);
    assert_eq!(early["active"]["status"]["to"], "10000");
    // Unassigned is a value of its own, unlike the missing prior value.
    assert_eq!(early["active"]["assignee"]["from"], serde_json::Value::Null);
    assert_eq!(early["active"]["assignee"]["to"], "unassigned");
}

#[test]
fn timeline_text() {
    let tmp = TempDir::new().unwrap();
    dwell(&tmp)
        .args(["timeline", "DW-1", "--data"])
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("DW-1 [10001]: Login page"))
        .stdout(predicate::str::contains("In Progress [10111]"))
        .stdout(predicate::str::contains("Grace Hopper"));
}

#[test]
fn timeline_unknown_issue_fails() {
    let tmp = TempDir::new().unwrap();
    dwell(&tmp)
        .args(["timeline", "DW-99", "--data"])
        .arg(fixture())
        .assert()
        .failure()
        .stderr(predicate::str::contains("issue 'DW-99' not found"));
}

#[test]
fn timeline_rejects_bad_timestamp() {
    let tmp = TempDir::new().unwrap();
    dwell(&tmp)
        .args(["timeline", "DW-1", "--at", "yesterday", "--data"])
        .arg(fixture())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --at timestamp"));
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

#[test]
fn config_file_sets_dataset_and_aliases() {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir(tmp.path().join("data")).unwrap();
    std::fs::copy(fixture(), tmp.path().join("data/issues.json")).unwrap();
    std::fs::write(
        tmp.path().join(".dwell.yaml"),
        "data_file: data/issues.json\nstatuses:\n  qa: \"10359\"\n",
    )
    .unwrap();

    let output = dwell(&tmp)
        .args(["report", "--status", "qa", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["status"], "10359");
    assert_eq!(report["workload"]["10003"]["unassigned"], 10800.0);
}

#[test]
fn config_redacts_token() {
    let tmp = TempDir::new().unwrap();
    dwell(&tmp)
        .arg("config")
        .env("JIRA_URL", "https://example.atlassian.net")
        .env("JIRA_USER_API_TOKEN", "very-secret-token")
        .assert()
        .success()
        .stdout(predicate::str::contains("https://example.atlassian.net"))
        .stdout(predicate::str::contains("********"))
        .stdout(predicate::str::contains("very-secret-token").not());
}

// ---------------------------------------------------------------------------
// search (offline failure paths only)
// ---------------------------------------------------------------------------

#[test]
fn search_requires_credentials() {
    let tmp = TempDir::new().unwrap();
    dwell(&tmp)
        .args(["search", "-i", "DW-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("JIRA_URL"))
        .stderr(predicate::str::contains("JIRA_USER_API_TOKEN"));
}

#[test]
fn search_requires_dates_without_keys() {
    let tmp = TempDir::new().unwrap();
    dwell(&tmp)
        .args(["search", "-s", "2023-01-01"])
        .env("JIRA_URL", "https://example.atlassian.net")
        .env("JIRA_USER_EMAIL", "a@example.com")
        .env("JIRA_USER_API_TOKEN", "token")
        .env("JIRA_PROJECT", "DW")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--start-date and --end-date"));
}

#[test]
fn search_keys_conflict_with_dates() {
    let tmp = TempDir::new().unwrap();
    dwell(&tmp)
        .args(["search", "-i", "DW-1", "-s", "2023-01-01"])
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// completion
// ---------------------------------------------------------------------------

#[test]
fn completion_bash() {
    let tmp = TempDir::new().unwrap();
    dwell(&tmp)
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dwell"));
}
