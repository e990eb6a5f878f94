//! Handles all user-facing output for the CLI.
//!
//! Colored status lines, block-marker highlighting and diagnostic rendering
//! live here so every command reports in the same way.

use std::io::Write;

use miette::Report;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::syntax::indentation::{DEDENT, INDENT};
use crate::validation::ValidationResult;

/// Prints `ok` or `FAIL` followed by a label.
pub fn print_status(passed: bool, label: &str) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let (color, tag) = if passed {
        (Color::Green, "ok  ")
    } else {
        (Color::Red, "FAIL")
    };
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    let _ = write!(stdout, "{}", tag);
    let _ = stdout.reset();
    let _ = writeln!(stdout, " {}", label);
}

/// Prints normalized text with the block markers highlighted.
pub fn print_normalized(text: &str) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    for ch in text.chars() {
        if ch == INDENT || ch == DEDENT {
            let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true));
            let _ = write!(stdout, "{}", ch);
            let _ = stdout.reset();
        } else {
            let _ = write!(stdout, "{}", ch);
        }
    }
    if !text.ends_with('\n') {
        let _ = writeln!(stdout);
    }
}

/// Prints a grammar validation report.
pub fn print_validation(result: &ValidationResult) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    for error in &result.errors {
        let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true));
        let _ = write!(stdout, "error");
        let _ = stdout.reset();
        let _ = writeln!(stdout, ": {}", error);
    }
    for warning in &result.warnings {
        let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true));
        let _ = write!(stdout, "warning");
        let _ = stdout.reset();
        let _ = writeln!(stdout, ": {}", warning);
    }
    print_status(result.is_valid(), "grammar matches the rule table");
}

/// Renders a diagnostic on stderr.
pub fn print_error(report: Report) {
    eprintln!("{:?}", report);
}
