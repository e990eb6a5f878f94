// Regression tests for the `jen` binary: output formats, exit codes and
// miette-rendered diagnostics.

mod common;

use std::fs;

use assert_cmd::Command;
use common::scratch_dir;
use predicates::{prelude::PredicateBooleanExt, str::contains};

fn jen() -> Command {
    Command::cargo_bin("jen").unwrap()
}

#[test]
fn cli_prints_canonical_ast() {
    let dir = scratch_dir("cli-ast");
    let file = dir.join("assign.jen");
    fs::write(&file, "x = 3\n").unwrap();

    jen()
        .arg("ast")
        .arg(&file)
        .assert()
        .success()
        .stdout(contains(r#"Program(Body([VarAsgn(["x"], [NumericLiteral(3)])]))"#));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn cli_prints_json_ast() {
    let dir = scratch_dir("cli-json");
    let file = dir.join("call.jen");
    fs::write(&file, "f(a, b)\n").unwrap();

    jen()
        .arg("ast")
        .arg(&file)
        .arg("--json")
        .assert()
        .success()
        .stdout(contains("\"Call\"").and(contains("\"arguments\"")));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn cli_reports_miette_diagnostics_on_error() {
    let dir = scratch_dir("cli-bad");
    let file = dir.join("bad.jen");
    fs::write(&file, "f(a, b\n" /* missing closing paren */).unwrap();

    jen()
        .arg("ast")
        .arg(&file)
        .assert()
        .failure()
        .stderr(contains("jen::syntax").or(contains("syntax error")));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn cli_reports_missing_file() {
    let dir = scratch_dir("cli-missing");
    jen()
        .arg("ast")
        .arg(dir.join("nope.jen"))
        .assert()
        .failure()
        .stderr(contains("failed to read"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn cli_normalize_shows_block_markers() {
    let dir = scratch_dir("cli-normalize");
    let file = dir.join("block.jen");
    fs::write(&file, "while x:\n    y = 1\n").unwrap();

    jen()
        .arg("normalize")
        .arg(&file)
        .assert()
        .success()
        .stdout(contains("while x:").and(contains("⇨")).and(contains("⇦")));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn cli_check_fails_when_any_file_fails() {
    let dir = scratch_dir("cli-check");
    fs::write(dir.join("good.jen"), "x := 1\n").unwrap();
    fs::write(dir.join("bad.jen"), "x :=\n").unwrap();

    jen()
        .arg("check")
        .arg(&dir)
        .assert()
        .failure()
        .stdout(contains("2 files checked, 1 failed"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn cli_check_passes_clean_tree() {
    let dir = scratch_dir("cli-check-clean");
    fs::write(dir.join("good.jen"), "fn f(a):\n    return a\n").unwrap();

    jen()
        .arg("check")
        .arg(&dir)
        .assert()
        .success()
        .stdout(contains("1 files checked, 0 failed"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn cli_validates_grammar() {
    jen()
        .arg("validate-grammar")
        .assert()
        .success()
        .stdout(contains("grammar matches the rule table"));
}
