//! Smoke tests for the memocalc binary
//!
//! Every test points `--data-dir` at a fresh temp directory.

#![allow(deprecated)] // Command::cargo_bin
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command for the memocalc binary using `dir` for storage
fn memocalc(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("memocalc").expect("memocalc binary should exist");
    cmd.env_remove("RUST_LOG")
        .env_remove("MEMOCALC_DATA_DIR")
        .arg("--data-dir")
        .arg(dir.path());
    cmd
}

#[test]
fn test_version_flag() {
    let dir = TempDir::new().unwrap();
    memocalc(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.3.1"));
}

#[test]
fn test_help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    memocalc(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("eval"))
        .stdout(predicate::str::contains("history"))
        .stdout(predicate::str::contains("memory"));
}

#[test]
fn test_eval_prints_result() {
    let dir = TempDir::new().unwrap();
    memocalc(&dir)
        .args(["eval", "2+3x4"])
        .assert()
        .success()
        .stdout("14\n");
}

#[test]
fn test_eval_negative_leading_operand() {
    let dir = TempDir::new().unwrap();
    memocalc(&dir)
        .args(["eval", "-2*(3+1)"])
        .assert()
        .success()
        .stdout("-8\n");
}

#[test]
fn test_eval_writes_history_file() {
    let dir = TempDir::new().unwrap();
    memocalc(&dir).args(["eval", "7/2"]).assert().success();

    let history = fs::read_to_string(dir.path().join("history.json")).unwrap();
    assert_eq!(history, r#"[{"query":"7/2","result":3.5}]"#);
    assert!(dir.path().join("memory.json").exists());
}

#[test]
fn test_eval_failure_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    memocalc(&dir)
        .args(["eval", "1/0"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error"));

    assert!(!dir.path().join("history.json").exists());
}

#[test]
fn test_eval_syntax_error() {
    let dir = TempDir::new().unwrap();
    memocalc(&dir)
        .args(["eval", "2++"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_eval_rejects_overlong_and_overflowing_input() {
    let dir = TempDir::new().unwrap();
    memocalc(&dir).args(["eval", "1+1"]).assert().success();

    let minus_run = format!("{}5", "-".repeat(200_000));
    let huge = "9".repeat(400);
    for expr in [minus_run.as_str(), huge.as_str()] {
        memocalc(&dir)
            .args(["eval", expr])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Error"));
    }

    memocalc(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout("1+1 = 2\n");
}

#[test]
fn test_history_round_trip() {
    let dir = TempDir::new().unwrap();
    memocalc(&dir).args(["eval", "1+1"]).assert().success();
    memocalc(&dir).args(["eval", "2x3"]).assert().success();

    memocalc(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout("1+1 = 2\n2x3 = 6\n");
}

#[test]
fn test_history_clear() {
    let dir = TempDir::new().unwrap();
    memocalc(&dir).args(["eval", "5-1"]).assert().success();

    memocalc(&dir)
        .args(["history", "--clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 1"));

    memocalc(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout("No history\n");
    assert_eq!(
        fs::read_to_string(dir.path().join("history.json")).unwrap(),
        "[]"
    );
}

#[test]
fn test_corrupt_history_is_ignored() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("history.json"), "not json").unwrap();

    memocalc(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout("No history\n");
}

#[test]
fn test_memory_show_and_clear() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("memory.json"), "12.5").unwrap();

    memocalc(&dir)
        .arg("memory")
        .assert()
        .success()
        .stdout("12.5\n");

    memocalc(&dir)
        .args(["memory", "--clear"])
        .assert()
        .success()
        .stdout("Memory cleared\n");

    memocalc(&dir).arg("memory").assert().success().stdout("0\n");
}

#[test]
fn test_ephemeral_writes_nothing() {
    let dir = TempDir::new().unwrap();
    memocalc(&dir)
        .args(["--ephemeral", "eval", "3x3"])
        .assert()
        .success()
        .stdout("9\n");

    assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[test]
fn test_data_dir_from_env() {
    let dir = TempDir::new().unwrap();
    Command::cargo_bin("memocalc")
        .unwrap()
        .env_remove("RUST_LOG")
        .env("MEMOCALC_DATA_DIR", dir.path())
        .args(["eval", "4+4"])
        .assert()
        .success()
        .stdout("8\n");

    assert!(dir.path().join("history.json").exists());
}

#[test]
fn test_log_file_receives_records() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("logs").join("calc.log");
    memocalc(&dir)
        .arg("-v")
        .arg("--log-file")
        .arg(&log)
        .args(["eval", "1+2"])
        .assert()
        .success()
        .stdout("3\n");

    let contents = fs::read_to_string(&log).unwrap();
    assert!(contents.contains("loaded calculator state"));
}
