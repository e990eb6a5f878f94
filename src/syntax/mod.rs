//! Syntax front end for the Jen language
//!
//! Source text goes through three stages:
//!
//! 1. [`indentation::normalize`] makes block structure explicit;
//! 2. [`grammar::JenParser`] matches the normalized text against the grammar;
//! 3. [`builder::build_program`] turns the parse tree into a typed [`Program`].
//!
//! Any failure aborts the parse; there is no recovery and no partial tree.

use log::debug;
use pest::error::{Error, ErrorVariant, InputLocation};
use pest::Parser;

use crate::ast::Program;
use crate::errors::{ParseError, SourceContext};

pub mod builder;
pub mod grammar;
pub mod indentation;

use grammar::{JenParser, Rule};
use indentation::Normalized;

/// Deepest bracket nesting accepted. Every `(` or `[` costs the matcher a
/// full descent of the precedence ladder, and pest aborts well before 200
/// levels with a bare "stack limit" message.
pub const MAX_NESTING: usize = 64;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parses Jen source text into a [`Program`].
pub fn parse_program(source: &str) -> Result<Program, ParseError> {
    parse_source(&SourceContext::from_file("<input>", source))
}

/// Parses a named source. The name appears in diagnostics.
pub fn parse_source(source: &SourceContext) -> Result<Program, ParseError> {
    let normalized = normalize_source(source)?;
    check_nesting(source)?;
    debug!(
        "{}: normalized {} bytes into {} bytes",
        source.name,
        source.content.len(),
        normalized.text.len()
    );

    let mut pairs = JenParser::parse(Rule::program, &normalized.text)
        .map_err(|e| convert_parse_error(e, &normalized, source))?;
    let root = pairs.next().ok_or_else(|| ParseError::unhandled(Rule::program))?;

    let program = builder::build_program(root)?;
    debug!(
        "{}: built program with {} top-level statements",
        source.name,
        program.body.len()
    );
    Ok(program)
}

/// Runs only the indentation pass, reporting failures as syntax errors.
pub fn normalize_source(source: &SourceContext) -> Result<Normalized, ParseError> {
    indentation::normalize(&source.content)
        .map_err(|e| ParseError::syntax(source, e.offset(), e.message()))
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Rejects brackets nested deeper than [`MAX_NESTING`], pointing at the
/// first bracket past the limit. String literals and comments are skipped.
fn check_nesting(source: &SourceContext) -> Result<(), ParseError> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut chars = source.content.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' | '\n' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '/' if chars.peek().is_some_and(|&(_, next)| next == '/') => {
                while chars.next_if(|&(_, next)| next != '\n').is_some() {}
            }
            '(' | '[' => {
                depth += 1;
                if depth > MAX_NESTING {
                    return Err(ParseError::syntax(
                        source,
                        offset,
                        format!("brackets are nested more than {} levels deep", MAX_NESTING),
                    ));
                }
            }
            ')' | ']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

fn convert_parse_error(
    error: Error<Rule>,
    normalized: &Normalized,
    source: &SourceContext,
) -> ParseError {
    let position = match error.location {
        InputLocation::Pos(pos) => pos,
        InputLocation::Span((start, _)) => start,
    };
    let offset = normalized.source_offset(position);
    ParseError::syntax(source, offset, expectation_message(&error.variant))
}

/// "expected a, b, or c" from the rules the matcher tried at the failure
/// position. Rules sharing a description are listed once.
fn expectation_message(variant: &ErrorVariant<Rule>) -> String {
    let (positives, negatives) = match variant {
        ErrorVariant::ParsingError {
            positives,
            negatives,
        } => (positives, negatives),
        ErrorVariant::CustomError { message } => return message.clone(),
    };

    let expected = describe_all(positives);
    let unexpected = describe_all(negatives);
    match (expected.is_empty(), unexpected.is_empty()) {
        (false, true) => format!("expected {}", join_alternatives(&expected)),
        (true, false) => format!("unexpected {}", join_alternatives(&unexpected)),
        (false, false) => format!(
            "unexpected {}; expected {}",
            join_alternatives(&unexpected),
            join_alternatives(&expected)
        ),
        (true, true) => "unexpected input".to_string(),
    }
}

fn describe_all(rules: &[Rule]) -> Vec<&'static str> {
    let mut names = Vec::new();
    for rule in rules {
        let name = grammar::describe(*rule);
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

fn join_alternatives(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [only] => only.to_string(),
        [first, second] => format!("{} or {}", first, second),
        [init @ .., last] => format!("{}, or {}", init.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let program = parse_program("").unwrap();
        assert!(program.body.is_empty());
    }

    #[test]
    fn test_simple_assignment() {
        let program = parse_program("x = 3").unwrap();
        assert_eq!(program.body.len(), 1);
    }

    #[test]
    fn test_unmatched_paren() {
        let result = parse_program("f(a, b\n");
        assert!(matches!(result, Err(ParseError::Syntax { .. })));
    }

    #[test]
    fn test_nesting_at_the_limit_parses() {
        let source = format!("{}x{}", "(".repeat(MAX_NESTING), ")".repeat(MAX_NESTING));
        assert!(parse_program(&source).is_ok());
    }

    #[test]
    fn test_deep_nesting_has_its_own_message() {
        let depth = MAX_NESTING + 1;
        let source = format!("y = {}x{}", "(".repeat(depth), ")".repeat(depth));
        match parse_program(&source) {
            Err(ParseError::Syntax {
                message, column, ..
            }) => {
                assert_eq!(message, "brackets are nested more than 64 levels deep");
                assert_eq!(column, 5 + MAX_NESTING);
            }
            other => panic!("expected a syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_nesting_ignores_strings_and_comments() {
        let open = "(".repeat(MAX_NESTING + 1);
        let source = format!("s = \"{}\" // {}\n", open, open);
        assert!(parse_program(&source).is_ok());
    }

    #[test]
    fn test_join_alternatives() {
        assert_eq!(join_alternatives(&["a"]), "a");
        assert_eq!(join_alternatives(&["a", "b"]), "a or b");
        assert_eq!(join_alternatives(&["a", "b", "c"]), "a, b, or c");
    }

    #[test]
    fn test_expectation_message_deduplicates() {
        let variant = ErrorVariant::ParsingError {
            positives: vec![Rule::expression, Rule::disjunction, Rule::EOI],
            negatives: vec![],
        };
        assert_eq!(
            expectation_message(&variant),
            "expected expression or end of input"
        );
    }
}
