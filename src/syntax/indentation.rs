//! Indentation pass.
//!
//! Jen blocks are delimited by indentation. Before matching, the source is
//! rewritten so that block structure is explicit: a line indented deeper
//! than its predecessor starts with [`INDENT`], and every closed level emits
//! one [`DEDENT`]. Leading whitespace is stripped and blank or comment-only
//! lines are dropped, so the grammar never sees indentation.

use log::trace;

/// Opens a block in normalized text.
pub const INDENT: char = '⇨';
/// Closes a block in normalized text.
pub const DEDENT: char = '⇦';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndentationError {
    /// A tab was found in the leading whitespace of a line.
    TabInIndentation { offset: usize },
    /// A line dedents to a column that no enclosing block uses.
    InconsistentDedent { offset: usize },
    /// A line starts with one of the block marker characters.
    ReservedMarker { offset: usize },
}

impl IndentationError {
    /// Byte offset in the source text.
    pub fn offset(&self) -> usize {
        match self {
            IndentationError::TabInIndentation { offset }
            | IndentationError::InconsistentDedent { offset }
            | IndentationError::ReservedMarker { offset } => *offset,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            IndentationError::TabInIndentation { .. } => "tabs are not allowed in indentation",
            IndentationError::InconsistentDedent { .. } => {
                "dedent does not match any enclosing indentation level"
            }
            IndentationError::ReservedMarker { .. } => {
                "`⇨` and `⇦` are reserved and cannot start a line"
            }
        }
    }
}

/// Where a line of normalized text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineOrigin {
    /// Offset of the line (markers included) in the normalized text.
    normalized_start: usize,
    /// Byte length of the block markers prefixed to the line.
    marker_len: usize,
    /// Offset of the line's content in the source.
    source_start: usize,
}

/// Normalized text plus the information needed to map positions back.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub text: String,
    lines: Vec<LineOrigin>,
    source_len: usize,
}

impl Normalized {
    /// Maps a byte offset in [`Normalized::text`] to one in the source.
    pub fn source_offset(&self, normalized: usize) -> usize {
        let index = self
            .lines
            .partition_point(|line| line.normalized_start <= normalized);
        let Some(line) = index.checked_sub(1).map(|i| self.lines[i]) else {
            return 0;
        };
        let within = normalized - line.normalized_start;
        let offset = line.source_start + within.saturating_sub(line.marker_len);
        offset.min(self.source_len)
    }
}

/// Rewrites indentation as explicit block markers.
pub fn normalize(source: &str) -> Result<Normalized, IndentationError> {
    let mut levels = vec![0usize];
    let mut text = String::with_capacity(source.len() + 16);
    let mut lines = Vec::new();
    let mut line_start = 0;

    for raw in source.split_inclusive('\n') {
        let offset = line_start;
        line_start += raw.len();

        let line = raw.strip_suffix('\n').unwrap_or(raw);
        let line = line.strip_suffix('\r').unwrap_or(line);
        let content = line.trim_start_matches([' ', '\t']);
        if content.trim_end().is_empty() || content.starts_with("//") {
            continue;
        }

        let indentation = &line[..line.len() - content.len()];
        if let Some(tab) = indentation.find('\t') {
            return Err(IndentationError::TabInIndentation { offset: offset + tab });
        }
        let width = indentation.len();
        let content_start = offset + width;
        if content.starts_with([INDENT, DEDENT]) {
            return Err(IndentationError::ReservedMarker {
                offset: content_start,
            });
        }

        let normalized_start = text.len();
        let current = levels.last().copied().unwrap_or(0);
        if width > current {
            trace!("indent to column {} at offset {}", width, content_start);
            levels.push(width);
            text.push(INDENT);
        } else {
            while width < levels.last().copied().unwrap_or(0) {
                levels.pop();
                text.push(DEDENT);
            }
            if width != levels.last().copied().unwrap_or(0) {
                return Err(IndentationError::InconsistentDedent {
                    offset: content_start,
                });
            }
            if text.len() > normalized_start {
                trace!("dedent to column {} at offset {}", width, content_start);
            }
        }

        lines.push(LineOrigin {
            normalized_start,
            marker_len: text.len() - normalized_start,
            source_start: content_start,
        });
        text.push_str(content);
        text.push('\n');
    }

    // Close every block still open at end of input.
    lines.push(LineOrigin {
        normalized_start: text.len(),
        marker_len: 0,
        source_start: source.len(),
    });
    for _ in 1..levels.len() {
        text.push(DEDENT);
    }

    Ok(Normalized {
        text,
        lines,
        source_len: source.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn text(source: &str) -> String {
        normalize(source).expect("normalize failed").text
    }

    #[test]
    fn test_flat_lines_are_unchanged() {
        assert_eq!(text("x = 1\ny = 2\n"), "x = 1\ny = 2\n");
    }

    #[test]
    fn test_missing_final_newline_is_added() {
        assert_eq!(text("x = 1"), "x = 1\n");
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(text(""), "");
        assert_eq!(text("\n   \n"), "");
    }

    #[test]
    fn test_block_markers() {
        let source = indoc! {"
            while a:
                while b:
                    x = 1
                y = 2
            z = 3
        "};
        assert_eq!(text(source), "while a:\n⇨while b:\n⇨x = 1\n⇦y = 2\n⇦z = 3\n");
    }

    #[test]
    fn test_open_blocks_are_closed_at_end() {
        let source = "while a:\n  while b:\n    x = 1\n";
        assert_eq!(text(source), "while a:\n⇨while b:\n⇨x = 1\n⇦⇦");
    }

    #[test]
    fn test_blank_and_comment_lines_are_dropped() {
        let source = "while a:\n\n      // note\n  x = 1\r\n";
        assert_eq!(text(source), "while a:\n⇨x = 1\n⇦");
    }

    #[test]
    fn test_tab_in_indentation_is_rejected() {
        let error = normalize("while a:\n\tx = 1\n").unwrap_err();
        assert_eq!(error, IndentationError::TabInIndentation { offset: 9 });
    }

    #[test]
    fn test_line_starting_with_marker_is_rejected() {
        let error = normalize("while a:\n⇨y = 1\n⇦z = 2\n").unwrap_err();
        assert_eq!(error, IndentationError::ReservedMarker { offset: 9 });

        let error = normalize("x = 1\n  ⇦y = 2\n").unwrap_err();
        assert_eq!(error, IndentationError::ReservedMarker { offset: 8 });
    }

    #[test]
    fn test_markers_inside_a_line_are_left_alone() {
        assert_eq!(text("s = \"⇨\"\n"), "s = \"⇨\"\n");
    }

    #[test]
    fn test_inconsistent_dedent_is_rejected() {
        let source = "while a:\n    x = 1\n  y = 2\n";
        let error = normalize(source).unwrap_err();
        assert_eq!(error, IndentationError::InconsistentDedent { offset: 21 });
    }

    #[test]
    fn test_source_offset_maps_back() {
        let source = "while a:\n    x = 1\n";
        let normalized = normalize(source).unwrap();
        // "while a:\n⇨x = 1\n⇦"
        let x = normalized.text.find('x').unwrap();
        assert_eq!(normalized.source_offset(x), source.find('x').unwrap());
        // The marker itself maps to the start of the line's content.
        assert_eq!(normalized.source_offset(9), 13);
        // The trailing dedent maps to end of source.
        let end = normalized.text.len() - DEDENT.len_utf8();
        assert_eq!(normalized.source_offset(end), source.len());
    }
}
