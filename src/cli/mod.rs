//! The Jen Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::{fs, path::Path, process};

use clap::Parser;
use log::debug;
use miette::{IntoDiagnostic, Report, Result, WrapErr};

use crate::cli::args::{Command, JenArgs};
use crate::discovery::discover_sources;
use crate::errors::SourceContext;
use crate::syntax::{normalize_source, parse_source};
use crate::validation::validate_grammar;

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    env_logger::init();
    let args = JenArgs::parse();

    // Dispatch to the appropriate subcommand handler.
    let result = match args.command {
        Command::Ast { file, json } => handle_ast(&file, json),
        Command::Normalize { file } => handle_normalize(&file),
        Command::Check { path } => handle_check(&path),
        Command::ValidateGrammar => handle_validate_grammar(),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(report) => {
            output::print_error(report);
            process::exit(1);
        }
    }
}

fn read_source(path: &Path) -> Result<SourceContext> {
    let content = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    Ok(SourceContext::from_file(path.display().to_string(), content))
}

/// Handles the `ast` subcommand.
fn handle_ast(path: &Path, json: bool) -> Result<bool> {
    let source = read_source(path)?;
    let program = parse_source(&source)?;
    if json {
        let text = serde_json::to_string_pretty(&program).into_diagnostic()?;
        println!("{}", text);
    } else {
        println!("{}", program);
    }
    Ok(true)
}

/// Handles the `normalize` subcommand.
fn handle_normalize(path: &Path) -> Result<bool> {
    let source = read_source(path)?;
    let normalized = normalize_source(&source)?;
    output::print_normalized(&normalized.text);
    Ok(true)
}

/// Handles the `check` subcommand. Succeeds only if every file parses.
fn handle_check(path: &Path) -> Result<bool> {
    let files = discover_sources(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to search {}", path.display()))?;
    if files.is_empty() {
        println!("no .jen files found under {}", path.display());
        return Ok(true);
    }

    let mut failed = 0;
    for file in &files {
        let outcome =
            read_source(file).and_then(|source| parse_source(&source).map_err(Report::from));
        match outcome {
            Ok(program) => {
                debug!("{}: {} statements", file.display(), program.body.len());
                output::print_status(true, &file.display().to_string());
            }
            Err(report) => {
                failed += 1;
                output::print_status(false, &file.display().to_string());
                output::print_error(report);
            }
        }
    }

    println!("{} files checked, {} failed", files.len(), failed);
    Ok(failed == 0)
}

/// Handles the `validate-grammar` subcommand.
fn handle_validate_grammar() -> Result<bool> {
    let result = validate_grammar();
    output::print_validation(&result);
    Ok(result.is_valid())
}
