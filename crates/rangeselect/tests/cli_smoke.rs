use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_displays_usage() {
    Command::cargo_bin("rangeselect")
        .expect("binary exists")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn completions_generate_without_a_terminal() {
    Command::cargo_bin("rangeselect")
        .expect("binary exists")
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rangeselect"));
}
