//! End-to-end tests for the `paseto-keygen` binary
//!
//! - Report on stdout with exit code 0
//! - Report written to a file, nothing on stdout
//! - Unwritable destinations fail without leaving a file
//! - JSON output and `--check`

use std::fs;
use std::process::{Command, Output};

fn keygen(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_paseto-keygen"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run paseto-keygen")
}

fn is_lower_hex(s: &str) -> bool {
    s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Assert `text` is exactly `Public: <64 hex>\nPrivate: <128 hex>\n`
fn assert_report(text: &str) -> (String, String) {
    assert!(text.ends_with('\n') && !text.ends_with("\n\n"), "bad trailing newline: {:?}", text);

    let lines: Vec<&str> = text.split_terminator('\n').collect();
    assert_eq!(lines.len(), 2, "unexpected report: {:?}", text);

    let public = lines[0].strip_prefix("Public: ").expect("Public line");
    let private = lines[1].strip_prefix("Private: ").expect("Private line");
    assert_eq!(public.len(), 64);
    assert_eq!(private.len(), 128);
    assert!(is_lower_hex(public));
    assert!(is_lower_hex(private));

    (public.to_string(), private.to_string())
}

#[test]
fn test_prints_report_to_stdout() {
    let output = keygen(&[]);

    assert!(output.status.success());
    let (public, private) = assert_report(&String::from_utf8(output.stdout).unwrap());
    assert!(private.ends_with(&public));
}

#[test]
fn test_empty_output_flag_means_stdout() {
    let output = keygen(&["-o", ""]);

    assert!(output.status.success());
    assert_report(&String::from_utf8(output.stdout).unwrap());
}

#[test]
fn test_each_run_generates_a_new_key() {
    let first = assert_report(&String::from_utf8(keygen(&[]).stdout).unwrap());
    let second = assert_report(&String::from_utf8(keygen(&[]).stdout).unwrap());

    assert_ne!(first.1, second.1);
}

#[test]
fn test_writes_report_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("key.txt");

    let output = keygen(&["-o", path.to_str().unwrap()]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert_report(&fs::read_to_string(&path).unwrap());
}

#[test]
fn test_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("key.txt");
    fs::write(&path, "old\n".repeat(100)).unwrap();

    let output = keygen(&["-o", path.to_str().unwrap()]);

    assert!(output.status.success());
    assert_report(&fs::read_to_string(&path).unwrap());
}

#[test]
fn test_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nonexistent-dir").join("key.txt");

    let output = keygen(&["-o", path.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(!path.exists());
    assert!(!output.stderr.is_empty());
}

#[test]
fn test_json_output() {
    let output = keygen(&["--format", "json"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let public = value["paseto"]["public"].as_str().unwrap();
    let private = value["paseto"]["private"].as_str().unwrap();
    assert_eq!(public.len(), 64);
    assert_eq!(private.len(), 128);
}

#[test]
fn test_check_accepts_generated_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("key.txt");
    assert!(keygen(&["-o", path.to_str().unwrap()]).status.success());

    let output = keygen(&["--check", path.to_str().unwrap()]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_check_rejects_tampered_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("key.txt");
    let (_, private) = assert_report(&String::from_utf8(keygen(&[]).stdout).unwrap());
    let (other_public, _) = assert_report(&String::from_utf8(keygen(&[]).stdout).unwrap());
    fs::write(&path, format!("Public: {}\nPrivate: {}\n", other_public, private)).unwrap();

    let output = keygen(&["--check", path.to_str().unwrap()]);

    assert!(!output.status.success());
}

#[test]
fn test_check_rejects_format_flag() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("key.txt");
    assert!(keygen(&["-o", path.to_str().unwrap()]).status.success());

    let output = keygen(&["--format", "json", "--check", path.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[cfg(unix)]
#[test]
fn test_writes_through_device_symlink() {
    let dir = tempfile::tempdir().unwrap();
    let link = dir.path().join("out");
    std::os::unix::fs::symlink("/dev/null", &link).unwrap();

    let output = keygen(&["-o", link.to_str().unwrap()]);

    assert!(output.status.success());
    assert!(fs::symlink_metadata(&link).is_ok());
}
