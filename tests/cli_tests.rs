//! CLI integration tests.
//!
//! Invokes the jsonstore binary as a subprocess.

use std::io::Write;
use std::process::{Command, Stdio};

fn run(args: &[&str], input: &str) -> (i32, String, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_jsonstore"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap_or_else(|e| panic!("Failed to spawn jsonstore: {}", e));

    {
        let stdin = child.stdin.as_mut().unwrap();
        stdin.write_all(input.as_bytes()).unwrap();
    }

    let output = child.wait_with_output().unwrap();
    let code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (code, stdout, stderr)
}

// ============================================================================
// format
// ============================================================================

#[test]
fn format_sorted_by_default() {
    let (code, stdout, stderr) = run(&["format"], r#"{"name":1,"id":2}"#);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert_eq!(stdout, "{\"id\":2,\"name\":1}\n");
}

#[test]
fn format_insertion_store_keeps_order() {
    for store in ["insertion", "indexed"] {
        let (code, stdout, _) = run(&["format", "--store", store], r#"{"name":1,"id":2}"#);
        assert_eq!(code, 0);
        assert_eq!(stdout, "{\"name\":1,\"id\":2}\n", "store {}", store);
    }
}

#[test]
fn format_indent() {
    let (code, stdout, _) = run(
        &["format", "--store", "insertion", "--indent", "2"],
        r#"{"b":[1],"a":{}}"#,
    );
    assert_eq!(code, 0);
    assert_eq!(stdout, "{\n  \"b\": [\n    1\n  ],\n  \"a\": {}\n}\n");
}

#[test]
fn format_ascii() {
    let (code, stdout, _) = run(&["format", "--ascii"], "[\"caf\u{e9}\"]");
    assert_eq!(code, 0);
    assert_eq!(stdout, "[\"caf\\u00e9\"]\n");
}

#[test]
fn format_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"{"z":true,"a":null}"#).unwrap();
    let path = file.path().to_str().unwrap();

    let (code, stdout, _) = run(&["format", "--store", "insertion", path], "");
    assert_eq!(code, 0);
    assert_eq!(stdout, "{\"z\":true,\"a\":null}\n");
}

#[test]
fn format_missing_file_fails() {
    let (code, stdout, stderr) = run(&["format", "/nonexistent/input.json"], "");
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.starts_with("error: read: "), "stderr: {}", stderr);
}

// ============================================================================
// Errors and limits
// ============================================================================

#[test]
fn invalid_json_exits_with_error() {
    let (code, stdout, stderr) = run(&["format"], "{\"a\":}");
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(
        stderr.contains("error: E100_InvalidJSON: E100_InvalidJSON"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn duplicates_collapse_by_default() {
    let (code, stdout, _) = run(&["format", "--store", "insertion"], r#"{"a":1,"b":2,"a":3}"#);
    assert_eq!(code, 0);
    assert_eq!(stdout, "{\"a\":3,\"b\":2}\n");
}

#[test]
fn strict_rejects_duplicates() {
    let (code, _, stderr) = run(&["format", "--strict"], r#"{"a":1,"a":2}"#);
    assert_eq!(code, 1);
    assert!(stderr.contains("E101_DuplicateKey"), "stderr: {}", stderr);
}

#[test]
fn limits_file_applies() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"max_nesting_depth = 1\n").unwrap();
    let path = file.path().to_str().unwrap();

    let (code, _, _) = run(&["format", "--limits", path], "[1]");
    assert_eq!(code, 0);

    let (code, _, stderr) = run(&["format", "--limits", path], "[[1]]");
    assert_eq!(code, 1);
    assert!(stderr.contains("E111_NestingTooDeep"), "stderr: {}", stderr);
}

#[test]
fn invalid_limits_file_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"unknown_limit = 3\n").unwrap();
    let path = file.path().to_str().unwrap();

    let (code, _, stderr) = run(&["format", "--limits", path], "{}");
    assert_eq!(code, 1);
    assert!(stderr.contains("E130_InvalidConfig"), "stderr: {}", stderr);
}

// ============================================================================
// keys
// ============================================================================

#[test]
fn keys_in_store_order() {
    let input = r#"{"name":1,"id":2,"age":3}"#;

    let (code, stdout, _) = run(&["keys", "--store", "insertion"], input);
    assert_eq!(code, 0);
    assert_eq!(stdout, "name\nid\nage\n");

    let (_, stdout, _) = run(&["keys"], input);
    assert_eq!(stdout, "age\nid\nname\n");
}

#[test]
fn keys_requires_object() {
    let (code, _, stderr) = run(&["keys"], "[1,2]");
    assert_eq!(code, 1);
    assert!(stderr.contains("E120_NotAnObject(array)"), "stderr: {}", stderr);
}

// ============================================================================
// version
// ============================================================================

#[test]
fn version_command() {
    let (code, stdout, _) = run(&["version"], "");
    assert_eq!(code, 0);
    assert!(stdout.starts_with("jsonstore v"));
}
