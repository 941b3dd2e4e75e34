#![allow(clippy::unwrap_used, clippy::expect_used)]

//! CLI smoke tests for the like-probe binary
//!
//! These run the built binary end to end against an in-memory SQLite
//! database, so no files outside the temp dir are touched.

use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn like_probe(args: &[&str], envs: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_like-probe"));
    cmd.args(args)
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (key, value) in envs {
        cmd.env(key, value);
    }
    cmd.output().expect("Failed to execute like-probe")
}

#[test]
fn test_cli_help_command() {
    let output = like_probe(&["--help"], &[]);

    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    assert!(stdout.contains("--config"), "Should mention config option");
    assert!(stdout.contains("--database-url"));
    assert!(stdout.contains("--print-config"));
}

#[test]
fn test_cli_print_config_defaults() {
    let output = like_probe(&["--print-config"], &[]);

    assert!(output.status.success());

    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["database"]["url"], "sqlite://eftests.db?mode=rwc");
    assert_eq!(config["seed"]["blog_name"], "BlogName");
    assert_eq!(config["probes"]["search"], "Name");
}

#[test]
fn test_cli_env_and_flags_override_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("probe.yaml");
    std::fs::write(
        &config_path,
        "probes:\n  search: \"FromFile\"\nseed:\n  blog_name: \"Other\"\n",
    )
    .unwrap();

    let output = like_probe(
        &[
            "--config",
            config_path.to_str().unwrap(),
            "--database-url",
            "sqlite::memory:",
            "--print-config",
        ],
        &[("LIKE_PROBE__PROBES__SEARCH", "FromEnv")],
    );

    assert!(output.status.success());

    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["probes"]["search"], "FromEnv");
    assert_eq!(config["seed"]["blog_name"], "Other");
    assert_eq!(config["database"]["url"], "sqlite::memory:");
}

#[test]
fn test_cli_config_validation_missing_file() {
    let output = like_probe(&["--config", "/nonexistent/config.yaml"], &[]);

    assert!(
        !output.status.success(),
        "Should fail when config file doesn't exist"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("does not exist"),
        "Should indicate config file not found: {stderr}"
    );
}

#[test]
fn test_cli_config_validation_unknown_key() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("probe.yaml");
    std::fs::write(&config_path, "probes:\n  serach: \"typo\"\n").unwrap();

    let output = like_probe(
        &["--config", config_path.to_str().unwrap(), "--print-config"],
        &[],
    );

    assert!(!output.status.success(), "Unknown keys should be rejected");
}

#[test]
fn test_cli_runs_all_probes_in_memory() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let trace_path = temp_dir.path().join("sql.txt");

    let output = like_probe(
        &[
            "--database-url",
            "sqlite::memory:",
            "--trace-file",
            trace_path.to_str().unwrap(),
        ],
        &[],
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "Run should succeed: {stderr}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines, ["Sql ok"; 4], "unexpected report: {stdout}");

    let trace = std::fs::read_to_string(&trace_path).unwrap();
    assert!(trace.contains("LIKE"), "trace should hold probe SQL: {trace}");
    assert!(trace.contains("%Name%"));
}
