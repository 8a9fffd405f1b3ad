//! Mirroring editor changes and turning trigger keystrokes into edits.
//!
//! The editor reports each change after applying it. Two kinds of change produce an edit
//! for the editor to apply in return:
//!
//! - typing the `*` that completes a bare `/**` line above a function → the stub
//! - typing a line break inside an open doc comment → the ` * ` continuation

use jsdoc_stub_core::{
    continuation_edit, generate_stub, CommentDialect, SourceText, StubConfig, StubEdit, StubError, TextSnapshot,
};
use serde::Deserialize;
use tracing::debug;

use crate::types::Document;

/// Replace `start..end` (byte offsets into the buffer as it was before this change)
/// with `text`.
#[derive(Debug, Clone, Deserialize)]
pub struct TextChange {
    pub start: usize,
    pub end: usize,
    #[serde(default)]
    pub text: String,
}

/// Whether the change ending at `position` completed a bare `/**` line.
///
/// Returns the end of the span the stub should replace: `position` itself, or the end of
/// the line when the editor auto-closed the opener with a trailing `*/`.
pub fn stub_trigger_end(snapshot: &SourceText, change: &TextChange, position: usize) -> Option<usize> {
    if !change.text.ends_with('*') {
        return None;
    }
    let line = snapshot.line_number_at(position.checked_sub(1)?)?;
    let span = snapshot.line(line)?;
    let before = snapshot.text().get(span.start..position)?;
    let after = snapshot.text().get(position..span.end())?;
    if before.trim() != "/**" {
        return None;
    }
    match after.trim() {
        "" => Some(position),
        "*/" => Some(span.end()),
        _ => None,
    }
}

fn is_line_break(text: &str) -> bool {
    text.ends_with('\n') && text.trim().is_empty()
}

/// Edits answering a single change that has already been applied to `snapshot`.
fn edits_for_change(
    snapshot: &SourceText,
    change: &TextChange,
    dialect: CommentDialect,
    config: &StubConfig,
) -> Vec<StubEdit> {
    let position = change.start + change.text.len();
    if let Some(end) = stub_trigger_end(snapshot, change, position) {
        let newline = snapshot.line_ending();
        return generate_stub(snapshot, position, dialect, newline, config)
            .map(|mut edit| {
                edit.range.end = end;
                edit
            })
            .into_iter()
            .collect();
    }
    if is_line_break(&change.text) {
        return continuation_edit(snapshot, position, config).into_iter().collect();
    }
    Vec::new()
}

/// Move pending edits past a later change. Edits the change overlaps are stale and dropped.
fn rebase_edits(edits: &mut Vec<StubEdit>, change: &TextChange) {
    let delta = change.text.len() as isize - (change.end - change.start) as isize;
    edits.retain_mut(|edit| {
        if edit.range.end <= change.start {
            true
        } else if edit.range.start >= change.end {
            edit.range.start = (edit.range.start as isize + delta) as usize;
            edit.range.end = (edit.range.end as isize + delta) as usize;
            true
        } else {
            false
        }
    });
}

/// Apply `changes` in order and collect the edits they trigger, in final-buffer offsets.
///
/// All or nothing: if any change has an invalid span, the document is left untouched.
pub fn apply_changes(
    doc: &mut Document,
    changes: &[TextChange],
    config: &StubConfig,
) -> Result<Vec<StubEdit>, StubError> {
    let mut text = doc.text.clone();
    let mut edits = Vec::new();
    for change in changes {
        text.replace(change.start..change.end, &change.text)?;
        rebase_edits(&mut edits, change);
        edits.extend(edits_for_change(&text, change, doc.dialect, config));
    }
    debug!(changes = changes.len(), edits = edits.len(), "Applied document changes");
    doc.text = text;
    Ok(edits)
}
