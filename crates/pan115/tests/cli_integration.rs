//! CLI integration tests for the pan115 command-line interface.
//!
//! These tests cover help output, argument parsing and the config
//! commands. None of them reach the network: commands that need a client
//! fail before the first request.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a command for the pan115 binary with an isolated config directory.
fn pan115(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pan115").unwrap();
    cmd.env("PAN115_CONFIG_DIR", config_dir.path())
        .env_remove("PAN115_COOKIE")
        .env_remove("PAN115_SAFE_PASSWORD");
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// Help and Version Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_help_displays() {
    let dir = TempDir::new().unwrap();
    pan115(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("115 cloud storage"));
}

#[test]
fn test_version_displays() {
    let dir = TempDir::new().unwrap();
    pan115(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pan115"));
}

#[test]
fn test_help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    pan115(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ls"))
        .stdout(predicate::str::contains("stat"))
        .stdout(predicate::str::contains("mkdir"))
        .stdout(predicate::str::contains("rename"))
        .stdout(predicate::str::contains("download"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("share"))
        .stdout(predicate::str::contains("recycle"))
        .stdout(predicate::str::contains("offline"))
        .stdout(predicate::str::contains("tools"))
        .stdout(predicate::str::contains("call"))
        .stdout(predicate::str::contains("config"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Global Flag Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_global_flags_accepted() {
    let dir = TempDir::new().unwrap();
    pan115(&dir)
        .args(["--verbose", "--json", "--context", "work", "--help"])
        .assert()
        .success();
}

#[test]
fn test_cookie_env_value_hidden_in_help() {
    let dir = TempDir::new().unwrap();
    pan115(&dir)
        .env("PAN115_COOKIE", "UID=1; CID=2; SEID=secret-seid")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("secret-seid").not());
}

// ─────────────────────────────────────────────────────────────────────────────
// Subcommand Parsing Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_rm_requires_ids() {
    let dir = TempDir::new().unwrap();
    pan115(&dir).arg("rm").assert().failure();
}

#[test]
fn test_mv_requires_target() {
    let dir = TempDir::new().unwrap();
    pan115(&dir)
        .args(["mv", "123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--to"));
}

#[test]
fn test_offline_clear_rejects_unknown_kind() {
    let dir = TempDir::new().unwrap();
    pan115(&dir)
        .args(["offline", "clear", "everything"])
        .assert()
        .failure();
}

#[test]
fn test_recycle_help() {
    let dir = TempDir::new().unwrap();
    pan115(&dir)
        .args(["recycle", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("revert"))
        .stdout(predicate::str::contains("clean"));
}

#[test]
fn test_recycle_clean_requires_ids() {
    let dir = TempDir::new().unwrap();
    pan115(&dir)
        .args(["--cookie", "UID=1; CID=2; SEID=3", "recycle", "clean"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ITEM_IDS"));
}

#[test]
fn test_download_requires_pick_code() {
    let dir = TempDir::new().unwrap();
    pan115(&dir)
        .arg("download")
        .assert()
        .failure()
        .stderr(predicate::str::contains("PICK_CODE"));
}

#[test]
fn test_download_help_shows_output_flag() {
    let dir = TempDir::new().unwrap();
    pan115(&dir)
        .args(["download", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--user-agent"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Credential Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_missing_cookie_is_reported() {
    let dir = TempDir::new().unwrap();
    pan115(&dir)
        .arg("ls")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no cookie configured"));
}

#[test]
fn test_incomplete_cookie_is_reported() {
    let dir = TempDir::new().unwrap();
    pan115(&dir)
        .args(["--cookie", "UID=1; CID=2", "ls"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("SEID"));
}

#[test]
fn test_unknown_context_is_reported() {
    let dir = TempDir::new().unwrap();
    pan115(&dir)
        .args(["--context", "nope", "ls"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("context 'nope' not found"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Tool Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_tools_lists_without_cookie() {
    let dir = TempDir::new().unwrap();
    pan115(&dir)
        .arg("tools")
        .assert()
        .success()
        .stdout(predicate::str::contains("listDirectory"))
        .stdout(predicate::str::contains("addOfflineTaskURIs"));
}

#[test]
fn test_tools_json_output() {
    let dir = TempDir::new().unwrap();
    let output = pan115(&dir).args(["--json", "tools"]).output().unwrap();
    assert!(output.status.success());

    let specs: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let specs = specs.as_array().unwrap();
    assert_eq!(specs.len(), 18);
    assert!(specs.iter().all(|s| s["parameters"]["type"] == "object"));
}

#[test]
fn test_call_rejects_bad_json() {
    let dir = TempDir::new().unwrap();
    pan115(&dir)
        .args(["call", "listDirectory", "{not json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON object"));
}

#[test]
fn test_call_rejects_unknown_tool() {
    let dir = TempDir::new().unwrap();
    pan115(&dir)
        .args(["call", "formatDisk"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown tool"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Config Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_show_empty() {
    let dir = TempDir::new().unwrap();
    pan115(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No contexts configured"));
}

#[test]
fn test_config_set_context_first_becomes_current() {
    let dir = TempDir::new().unwrap();
    pan115(&dir)
        .args(["config", "set-context", "main", "--cookie-env", "MAIN_COOKIE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Context \"main\" created."))
        .stdout(predicate::str::contains("set as current context"));

    let saved = std::fs::read_to_string(dir.path().join("client.yaml")).unwrap();
    assert!(saved.contains("current-context: main"));
    assert!(saved.contains("cookie-env: MAIN_COOKIE"));
}

#[test]
fn test_config_set_context_requires_cookie_source() {
    let dir = TempDir::new().unwrap();
    pan115(&dir)
        .args(["config", "set-context", "main"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--cookie-file"));
}

#[test]
fn test_config_set_context_validates_inline_cookie() {
    let dir = TempDir::new().unwrap();
    pan115(&dir)
        .args(["config", "set-context", "main", "--cookie", "UID=1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CID"));
}

#[test]
fn test_config_use_and_delete_context() {
    let dir = TempDir::new().unwrap();
    for name in ["main", "alt"] {
        pan115(&dir)
            .args(["config", "set-context", name, "--cookie-env", "X"])
            .assert()
            .success();
    }

    pan115(&dir)
        .args(["config", "use-context", "alt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Switched to context \"alt\"."));

    pan115(&dir)
        .args(["config", "use-context", "missing"])
        .assert()
        .failure();

    pan115(&dir)
        .args(["config", "delete-context", "alt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deleted"))
        .stdout(predicate::str::contains("No current context"));
}

#[test]
fn test_config_show_redacts_inline_cookie() {
    let dir = TempDir::new().unwrap();
    pan115(&dir)
        .args([
            "config",
            "set-context",
            "main",
            "--cookie",
            "UID=1; CID=2; SEID=very-secret",
        ])
        .assert()
        .success();

    pan115(&dir)
        .args(["--json", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("very-secret").not())
        .stdout(predicate::str::contains("\"cookie\": \"***\""));
}

#[test]
fn test_context_cookie_from_env_reaches_client() {
    let dir = TempDir::new().unwrap();
    pan115(&dir)
        .args(["config", "set-context", "main", "--cookie-env", "MAIN_COOKIE"])
        .assert()
        .success();

    // The env var holds an incomplete cookie, so resolution fails on it.
    pan115(&dir)
        .env("MAIN_COOKIE", "UID=1; SEID=3")
        .arg("ls")
        .assert()
        .failure()
        .stderr(predicate::str::contains("CID"));
}
