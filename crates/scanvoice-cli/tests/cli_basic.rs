//! Basic CLI behavior tests.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_subcommands() {
    Command::cargo_bin("scanvoice")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("batch"));
}

#[test]
fn test_process_missing_file_fails() {
    Command::cargo_bin("scanvoice")
        .unwrap()
        .args(["process", "/nonexistent/invoice.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_batch_empty_pattern_fails() {
    Command::cargo_bin("scanvoice")
        .unwrap()
        .args(["batch", "/nonexistent/*.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching PDF files"));
}
