//! Parameter-list extraction for the declaration that follows a comment trigger.
//!
//! The parenthesis matching is positional: the list opens at the first `(` after the
//! `function` keyword and closes at the first `)` after that. Default values containing
//! their own `)` (e.g. `x = f(y)`) therefore cut the list short.

use tracing::debug;

use crate::comments::strip_comments;
use crate::error::Result;
use crate::patterns::function_keyword_index;
use crate::scanner::{declaration_line_after_trigger, find_line_containing};
use crate::snapshot::TextSnapshot;
use crate::types::{CommentDialect, Parameter};

/// Parameters of the function declared right after the trigger at `position`.
///
/// An empty list means "no function here", "no parameters", or "the list never closes
/// before the end of the buffer"; none of those are errors.
pub fn extract_parameters(
    snapshot: &dyn TextSnapshot,
    position: usize,
    dialect: CommentDialect,
) -> Result<Vec<Parameter>> {
    let Some(decl_line) = declaration_line_after_trigger(snapshot, position, dialect)? else {
        return Ok(Vec::new());
    };
    let Some(raw) = raw_parameter_text(snapshot, decl_line) else {
        debug!(line = decl_line, "Parameter list not closed before end of buffer");
        return Ok(Vec::new());
    };
    Ok(split_parameters(&strip_comments(raw)))
}

/// The text between the parameter list's `(` and `)`, possibly spanning lines.
pub fn raw_parameter_text(snapshot: &dyn TextSnapshot, decl_line: usize) -> Option<&str> {
    let (open_line, open) = locate_open_paren(snapshot, decl_line)?;
    let close = locate_close_paren(snapshot, open_line, open)?;
    snapshot.text().get(open + 1..close)
}

/// Absolute offset of the `(` that opens the list, and the line it sits on.
fn locate_open_paren(snapshot: &dyn TextSnapshot, decl_line: usize) -> Option<(usize, usize)> {
    let text = snapshot.line_text(decl_line)?;
    let from = function_keyword_index(text).unwrap_or(0);
    if let Some(col) = text[from..].find('(') {
        let start = snapshot.line(decl_line)?.start;
        return Some((decl_line, start + from + col));
    }
    let (line, col) = find_line_containing(snapshot, decl_line + 1, '(')?;
    Some((line, snapshot.line(line)?.start + col))
}

/// Absolute offset of the first `)` after the opening paren.
fn locate_close_paren(snapshot: &dyn TextSnapshot, open_line: usize, open: usize) -> Option<usize> {
    let span = snapshot.line(open_line)?;
    let rest = snapshot.text().get(open..span.end())?;
    if let Some(col) = rest.find(')') {
        return Some(open + col);
    }
    let (line, col) = find_line_containing(snapshot, open_line + 1, ')')?;
    Some(snapshot.line(line)?.start + col)
}

/// Split a comment-free parameter list on commas into trimmed, non-empty segments.
pub fn split_parameters(list: &str) -> Vec<Parameter> {
    list.split(',').map(str::trim).filter(|s| !s.is_empty()).map(Parameter::parse).collect()
}
