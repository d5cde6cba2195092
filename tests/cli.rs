//! CLI smoke tests.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_the_main_flags() {
    Command::cargo_bin("terra")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--portal"))
        .stdout(predicate::str::contains("--check"))
        .stdout(predicate::str::contains("--project"));
}

#[test]
fn version_prints_the_crate_version() {
    Command::cargo_bin("terra")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
