//! Integration tests for CLI argument handling
//!
//! Tests the get/post subcommands and the startup paths that do not need a
//! network: help output, argument validation, and the missing-token error.

use std::process::{Command, Stdio};

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_hubq"))
        .args(args)
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute hubq")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("hubq"), "Help should mention hubq");
    assert!(stdout.contains("get"), "Help should mention get subcommand");
    assert!(stdout.contains("post"), "Help should mention post subcommand");
}

#[test]
fn test_get_help_documents_output_spec() {
    let output = run_cli(&["get", "--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--output"));
    assert!(stdout.contains("--no-cache"));
    assert!(stdout.contains("--headers"));
}

#[test]
fn test_post_help_documents_body_argument() {
    let output = run_cli(&["post", "--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.to_lowercase().contains("body"));
}

#[test]
fn test_unknown_subcommand_fails() {
    let output = run_cli(&["delete", "repos/acme/widget"]);
    assert!(!output.status.success(), "Unknown subcommand should fail");
}

#[test]
fn test_get_without_endpoint_fails() {
    let output = run_cli(&["get"]);
    assert!(!output.status.success(), "get requires an endpoint");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.to_lowercase().contains("endpoint") || stderr.contains("required"),
        "Should complain about the missing endpoint: {}",
        stderr
    );
}

#[test]
fn test_missing_token_with_no_input_is_an_error() {
    // Point config and cache at an empty temp home so no saved token is
    // found; with stdin closed the prompt reads nothing and the run fails
    // before any network activity.
    let temp_home = tempfile::TempDir::new().expect("temp dir");
    let output = Command::new(env!("CARGO_BIN_EXE_hubq"))
        .args(["get", "users/octocat"])
        .env("HOME", temp_home.path())
        .env("XDG_CONFIG_HOME", temp_home.path().join("config"))
        .env("XDG_CACHE_HOME", temp_home.path().join("cache"))
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute hubq");

    assert!(!output.status.success(), "Expected missing token to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("token") || stderr.contains("access token"),
        "Should mention the missing token: {}",
        stderr
    );
}
