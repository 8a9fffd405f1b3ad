//! Line and position primitives shared by the extractor and the body analyzer.
//!
//! The trigger fires on the line holding the comment opener; everything the stub
//! describes lives on the line right after it.

use crate::error::{Result, StubError};
use crate::patterns::{has_function_keyword, is_typed_signature};
use crate::snapshot::{require_line, require_line_number, TextSnapshot};
use crate::types::CommentDialect;

/// Text of the line containing `position - 1`, i.e. the line the last typed character
/// landed on.
pub fn line_text_at(snapshot: &dyn TextSnapshot, position: usize) -> Result<&str> {
    let line = trigger_line(snapshot, position)?;
    require_line(snapshot, line)
}

/// Leading whitespace of the line after the one containing `position`.
///
/// The comment is aligned with the code it documents, not with wherever the opener
/// was typed. Returns an empty string when there is no following line.
pub fn indentation_at(snapshot: &dyn TextSnapshot, position: usize) -> Result<String> {
    let line = require_line_number(snapshot, position)?;
    Ok(snapshot.line_text(line + 1).map(leading_whitespace).unwrap_or_default().to_string())
}

pub fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

/// Whether `line` opens a function under `dialect`.
pub fn is_function_declaration_line(line: &str, dialect: CommentDialect) -> bool {
    has_function_keyword(line) || (dialect.is_annotated() && is_typed_signature(line))
}

/// Line number of the character just before `position`.
pub fn trigger_line(snapshot: &dyn TextSnapshot, position: usize) -> Result<usize> {
    let before = position
        .checked_sub(1)
        .ok_or(StubError::PositionOutOfRange { position, len: snapshot.text().len() })?;
    require_line_number(snapshot, before)
}

/// The declaration line documented by a trigger at `position`: the line right after the
/// trigger line, if it exists and is recognised as a declaration.
pub fn declaration_line_after_trigger(
    snapshot: &dyn TextSnapshot,
    position: usize,
    dialect: CommentDialect,
) -> Result<Option<usize>> {
    let candidate = trigger_line(snapshot, position)? + 1;
    Ok(snapshot
        .line_text(candidate)
        .filter(|text| is_function_declaration_line(text, dialect))
        .map(|_| candidate))
}

/// First line at or after `from` whose text contains `needle`, searching no further than
/// the end of the buffer.
pub fn find_line_containing(
    snapshot: &dyn TextSnapshot,
    from: usize,
    needle: char,
) -> Option<(usize, usize)> {
    (from..snapshot.line_count()).find_map(|n| {
        let text = snapshot.line_text(n)?;
        text.find(needle).map(|col| (n, col))
    })
}
