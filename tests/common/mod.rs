//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use jen::ast::{Expression, Program, Statement};

/// Parses `source`, panicking with the diagnostic on failure.
pub fn parse(source: &str) -> Program {
    match jen::parse_program(source) {
        Ok(program) => program,
        Err(error) => panic!("failed to parse {:?}: {}", source, error),
    }
}

/// Parses `source` and renders the program in canonical text form.
pub fn render(source: &str) -> String {
    parse(source).to_string()
}

/// Parses a single expression statement and returns it.
pub fn expression(source: &str) -> Expression {
    let program = parse(source);
    match program.body.statements.as_slice() {
        [Statement::Expression(expr)] => expr.clone(),
        other => panic!("expected one expression statement, got {:?}", other),
    }
}

/// Creates an empty scratch directory unique to one test.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("jen-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}
