//! Jen error handling
//!
//! Every failure the syntax front end can report is a [`ParseError`]. Syntax
//! errors carry the source they were raised against so `miette` can render
//! the offending line.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::syntax::grammar::Rule;

// ============================================================================
// SOURCE CONTEXT - Error reporting infrastructure
// ============================================================================

/// Name and content of a source buffer, used for diagnostics.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    /// Create a source context from real file content
    pub fn from_file(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Convert to NamedSource for use with miette error reporting
    pub fn to_named_source(&self) -> NamedSource<String> {
        NamedSource::new(self.name.clone(), self.content.clone())
    }

    /// 1-based line and column of a byte offset into the content.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = clamp_to_char_boundary(&self.content, offset);
        let before = &self.content[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        (line, column)
    }
}

fn clamp_to_char_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

// ============================================================================
// PARSE ERROR
// ============================================================================

/// The error type of the syntax front end.
#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    /// The source text does not match the Jen grammar.
    #[error("syntax error at line {line}, column {column}: {message}")]
    #[diagnostic(code(jen::syntax))]
    Syntax {
        message: String,
        line: usize,
        column: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    /// A parse-tree node has no AST handler. This is a bug in the crate, not
    /// in the program being parsed.
    #[error("no AST handler for grammar rule `{rule}`")]
    #[diagnostic(
        code(jen::internal::unhandled_rule),
        help("the grammar and the AST builder disagree; add a handler for this rule")
    )]
    UnhandledRule { rule: String },
}

impl ParseError {
    /// Builds a syntax error located at a byte offset of `source`.
    pub fn syntax(source: &SourceContext, offset: usize, message: impl Into<String>) -> Self {
        let offset = clamp_to_char_boundary(&source.content, offset);
        let (line, column) = source.line_col(offset);
        let len = source.content[offset..]
            .chars()
            .next()
            .filter(|c| *c != '\n')
            .map_or(0, char::len_utf8);
        ParseError::Syntax {
            message: message.into(),
            line,
            column,
            src: source.to_named_source(),
            span: SourceSpan::from((offset, len)),
        }
    }

    pub fn unhandled(rule: Rule) -> Self {
        ParseError::UnhandledRule {
            rule: format!("{:?}", rule),
        }
    }
}
