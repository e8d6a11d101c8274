//! CLI surface tests. These exercise argument parsing and error paths only;
//! no database is required.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_generate_subcommand() {
    Command::cargo_bin("pgdrift")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"));
}

#[test]
fn test_generate_help_documents_flags() {
    Command::cargo_bin("pgdrift")
        .unwrap()
        .args(["generate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--database-url"))
        .stdout(predicate::str::contains("--schema"))
        .stdout(predicate::str::contains("--output-dir"));
}

#[test]
fn test_generate_fails_without_declarations_file() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("pgdrift")
        .unwrap()
        .current_dir(dir.path())
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("schema.yaml"));
}

#[test]
fn test_unknown_subcommand_is_rejected() {
    Command::cargo_bin("pgdrift")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure();
}
