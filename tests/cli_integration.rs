//! Integration tests for the `tk` CLI.
//!
//! Each test creates a temp workspace, runs `tk` as a subprocess,
//! and verifies stdout and/or the snapshot file.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use pretty_assertions::assert_eq;

/// Get the path to the built `tk` binary.
fn tk_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("tk");
    path
}

/// Create a workspace holding the given tasks.
fn create_test_workspace(root: &Path, tasks: &[(&str, bool)]) {
    let data_dir = root.join(".ticklist");
    fs::create_dir_all(&data_dir).unwrap();
    let records: Vec<serde_json::Value> = tasks
        .iter()
        .map(|(text, completed)| serde_json::json!({ "text": text, "completed": completed }))
        .collect();
    fs::write(
        data_dir.join("tasks.json"),
        serde_json::to_string_pretty(&records).unwrap(),
    )
    .unwrap();
}

/// Read the snapshot back as (text, completed) pairs.
fn read_snapshot(root: &Path) -> Vec<(String, bool)> {
    let content = fs::read_to_string(root.join(".ticklist/tasks.json")).unwrap();
    let records: Vec<serde_json::Value> = serde_json::from_str(&content).unwrap();
    records
        .iter()
        .map(|r| {
            (
                r["text"].as_str().unwrap().to_string(),
                r["completed"].as_bool().unwrap(),
            )
        })
        .collect()
}

fn pairs(items: &[(&str, bool)]) -> Vec<(String, bool)> {
    items.iter().map(|(t, c)| (t.to_string(), *c)).collect()
}

/// Run `tk` with the given args in the given directory, returning (stdout, stderr, success).
fn run_tk(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(tk_bin())
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run tk");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `tk` expecting success, return stdout.
fn run_tk_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_tk(dir, args);
    if !success {
        panic!(
            "tk {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------

#[test]
fn test_init_creates_data_dir() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_tk_ok(tmp.path(), &["init"]);
    assert!(out.contains("initialized"));
    assert!(tmp.path().join(".ticklist/config.toml").exists());
    assert!(read_snapshot(tmp.path()).is_empty());
}

#[test]
fn test_init_twice_requires_force() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_tk_ok(tmp.path(), &["init"]);
    let (_, stderr, success) = run_tk(tmp.path(), &["init"]);
    assert!(!success);
    assert!(stderr.contains("already exists"));
    run_tk_ok(tmp.path(), &["init", "--force"]);
}

#[test]
fn test_init_keeps_tasks_on_force() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_workspace(tmp.path(), &[("keep", false)]);
    run_tk_ok(tmp.path(), &["init", "--force"]);
    assert_eq!(read_snapshot(tmp.path()), pairs(&[("keep", false)]));
}

#[test]
fn test_init_force_keeps_config() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_workspace(tmp.path(), &[]);
    let config = tmp.path().join(".ticklist/config.toml");
    fs::write(&config, "[ui]\ndelete_delay_ms = 0\n").unwrap();
    run_tk_ok(tmp.path(), &["init", "--force"]);
    assert_eq!(
        fs::read_to_string(&config).unwrap(),
        "[ui]\ndelete_delay_ms = 0\n"
    );
}

#[test]
fn test_storage_key_with_path_is_rejected() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_workspace(tmp.path(), &[]);
    fs::write(
        tmp.path().join(".ticklist/config.toml"),
        "[storage]\nkey = \"../escape\"\n",
    )
    .unwrap();
    let (_, stderr, success) = run_tk(tmp.path(), &["add", "x"]);
    assert!(!success);
    assert!(stderr.starts_with("error: invalid config.toml"), "{}", stderr);
    assert!(!tmp.path().join("escape.json").exists());
}

#[test]
fn test_missing_workspace_is_an_error() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run_tk(tmp.path(), &["list"]);
    assert!(!success);
    assert!(stderr.starts_with("error: no .ticklist/ directory found"));
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

#[test]
fn test_list_numbers_tasks() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_workspace(tmp.path(), &[("buy milk", false), ("walk dog", true)]);
    let out = run_tk_ok(tmp.path(), &["list"]);
    assert_eq!(
        out,
        "1. [ ] buy milk\n2. [x] walk dog\n\n1 item left, 1 completed\n"
    );
}

#[test]
fn test_list_with_filter() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_workspace(tmp.path(), &[("a", true), ("b", false), ("c", true)]);
    let out = run_tk_ok(tmp.path(), &["list", "--filter", "completed"]);
    assert!(out.starts_with("1. [x] a\n2. [x] c\n"));
    let out = run_tk_ok(tmp.path(), &["list", "--filter", "active"]);
    assert!(out.starts_with("1. [ ] b\n"));
}

#[test]
fn test_list_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_workspace(tmp.path(), &[("a", false), ("b", true)]);
    let out = run_tk_ok(tmp.path(), &["list", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["filter"], "all");
    assert_eq!(parsed["tasks"].as_array().unwrap().len(), 2);
    assert_eq!(parsed["tasks"][1]["pos"], 2);
    assert_eq!(parsed["tasks"][1]["completed"], true);
    assert_eq!(parsed["summary"]["remaining"], 1);
}

#[test]
fn test_stats() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_workspace(tmp.path(), &[("a", false), ("b", true), ("c", false)]);
    let out = run_tk_ok(tmp.path(), &["stats", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["total"], 3);
    assert_eq!(parsed["remaining"], 2);
    assert_eq!(parsed["completed"], 1);

    let out = run_tk_ok(tmp.path(), &["stats"]);
    assert!(out.contains("remaining: 2"));
}

#[test]
fn test_corrupt_snapshot_reads_as_empty() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join(".ticklist")).unwrap();
    fs::write(tmp.path().join(".ticklist/tasks.json"), "not json").unwrap();
    let out = run_tk_ok(tmp.path(), &["list"]);
    assert!(out.starts_with("no tasks\n"));
    let log = fs::read_to_string(tmp.path().join(".ticklist/.recovery.log")).unwrap();
    assert!(log.contains("not json"));
}

#[test]
fn test_dir_flag_and_subdirectory_discovery() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_workspace(tmp.path(), &[("a", false)]);
    let sub = tmp.path().join("nested/deeper");
    fs::create_dir_all(&sub).unwrap();

    let out = run_tk_ok(&sub, &["list"]);
    assert!(out.contains("[ ] a"));

    let elsewhere = tempfile::TempDir::new().unwrap();
    let dir = tmp.path().to_str().unwrap();
    let out = run_tk_ok(elsewhere.path(), &["-C", dir, "list"]);
    assert!(out.contains("[ ] a"));
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

#[test]
fn test_add_trims_and_appends() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_workspace(tmp.path(), &[("first", false)]);
    let out = run_tk_ok(tmp.path(), &["add", "  buy", "milk  "]);
    assert_eq!(out, "added 2. buy milk\n");
    assert_eq!(
        read_snapshot(tmp.path()),
        pairs(&[("first", false), ("buy milk", false)])
    );
}

#[test]
fn test_add_blank_is_rejected() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_workspace(tmp.path(), &[("first", false)]);
    let (stdout, stderr, success) = run_tk(tmp.path(), &["add", "   "]);
    assert!(success);
    assert_eq!(stdout, "no task added\n");
    assert!(stderr.contains("empty"));
    assert_eq!(read_snapshot(tmp.path()), pairs(&[("first", false)]));
}

#[test]
fn test_add_duplicates_are_distinct() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_workspace(tmp.path(), &[]);
    run_tk_ok(tmp.path(), &["add", "same"]);
    run_tk_ok(tmp.path(), &["add", "same"]);
    run_tk_ok(tmp.path(), &["toggle", "2"]);
    assert_eq!(
        read_snapshot(tmp.path()),
        pairs(&[("same", false), ("same", true)])
    );
}

#[test]
fn test_toggle_under_active_filter() {
    // Complete x, then toggle position 1 of the active view: must hit y
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_workspace(tmp.path(), &[("x", false), ("y", false)]);
    run_tk_ok(tmp.path(), &["toggle", "1"]);
    let out = run_tk_ok(tmp.path(), &["toggle", "1", "--filter", "active"]);
    assert_eq!(out, "completed: y\n");
    assert_eq!(read_snapshot(tmp.path()), pairs(&[("x", true), ("y", true)]));
}

#[test]
fn test_toggle_back_to_active() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_workspace(tmp.path(), &[("x", true)]);
    let out = run_tk_ok(tmp.path(), &["toggle", "1"]);
    assert_eq!(out, "reopened: x\n");
}

#[test]
fn test_out_of_range_position_fails_without_change() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_workspace(tmp.path(), &[("a", false), ("b", true)]);
    for args in [
        &["toggle", "3"][..],
        &["rm", "0"][..],
        &["rm", "2", "--filter", "active"][..],
    ] {
        let (_, stderr, success) = run_tk(tmp.path(), args);
        assert!(!success, "{:?} should fail", args);
        assert!(stderr.contains("no task at position"));
    }
    let (_, stderr, _) = run_tk(tmp.path(), &["rm", "2", "--filter", "active"]);
    assert!(stderr.contains("(1 active task)"));
    assert_eq!(read_snapshot(tmp.path()), pairs(&[("a", false), ("b", true)]));
}

#[test]
fn test_edit_keeps_completion() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_workspace(tmp.path(), &[("a", false), ("b", true)]);
    let out = run_tk_ok(tmp.path(), &["edit", "1", "bee", "--filter", "completed"]);
    assert_eq!(out, "edited: bee\n");
    assert_eq!(read_snapshot(tmp.path()), pairs(&[("a", false), ("bee", true)]));
}

#[test]
fn test_edit_blank_keeps_old_text() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_workspace(tmp.path(), &[("a", false)]);
    let (stdout, _, success) = run_tk(tmp.path(), &["edit", "1", "  "]);
    assert!(success);
    assert_eq!(stdout, "unchanged: a\n");
    assert_eq!(read_snapshot(tmp.path()), pairs(&[("a", false)]));
}

#[test]
fn test_rm_resolves_through_filter() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_workspace(tmp.path(), &[("a", true), ("b", false), ("c", true)]);
    let out = run_tk_ok(tmp.path(), &["rm", "2", "--filter", "completed"]);
    assert_eq!(out, "deleted: c\n");
    assert_eq!(read_snapshot(tmp.path()), pairs(&[("a", true), ("b", false)]));
}

#[test]
fn test_clear_completed() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_workspace(tmp.path(), &[("a", true), ("b", false), ("c", true)]);
    let out = run_tk_ok(tmp.path(), &["clear"]);
    assert_eq!(out, "cleared 2 completed tasks\n");
    assert_eq!(read_snapshot(tmp.path()), pairs(&[("b", false)]));

    let out = run_tk_ok(tmp.path(), &["clear"]);
    assert_eq!(out, "no completed tasks\n");
}

#[test]
fn test_write_json_output() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_workspace(tmp.path(), &[("a", false)]);
    let out = run_tk_ok(tmp.path(), &["add", "b", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["action"], "add");
    assert_eq!(parsed["changed"], true);
    assert_eq!(parsed["task"]["pos"], 2);
    assert_eq!(parsed["summary"]["total"], 2);

    let out = run_tk_ok(tmp.path(), &["clear", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["cleared"], 0);
    assert_eq!(parsed["changed"], false);
}

#[test]
fn test_scenario_add_toggle_clear() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_tk_ok(tmp.path(), &["init"]);
    run_tk_ok(tmp.path(), &["add", "buy milk"]);
    assert_eq!(read_snapshot(tmp.path()), pairs(&[("buy milk", false)]));
    run_tk_ok(tmp.path(), &["toggle", "1"]);
    assert_eq!(read_snapshot(tmp.path()), pairs(&[("buy milk", true)]));
    run_tk_ok(tmp.path(), &["clear"]);
    assert!(read_snapshot(tmp.path()).is_empty());
}

#[test]
fn test_custom_storage_key() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join(".ticklist")).unwrap();
    fs::write(
        tmp.path().join(".ticklist/config.toml"),
        "[storage]\nkey = \"work\"\n",
    )
    .unwrap();
    run_tk_ok(tmp.path(), &["add", "ship it"]);
    assert!(tmp.path().join(".ticklist/work.json").exists());
    assert!(!tmp.path().join(".ticklist/tasks.json").exists());
}
