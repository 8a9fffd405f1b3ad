//! Doc-comment continuation: when a line break is typed inside an open `/** … */`
//! block, start the new line with the block's continuation marker.

use crate::config::StubConfig;
use crate::scanner::leading_whitespace;
use crate::snapshot::TextSnapshot;
use crate::types::StubEdit;

/// Whether `offset` sits inside a `/**` block that is not closed before it.
pub fn is_inside_doc_comment(text: &str, offset: usize) -> bool {
    let Some(before) = text.get(..offset) else {
        return false;
    };
    match before.rfind("/**") {
        Some(open) => !before[open + 3..].contains("*/"),
        None => false,
    }
}

/// Text to insert at `position`, the start of a line that was just broken off the
/// previous one, or `None` when the break did not happen inside a doc comment.
pub fn continuation_prefix(
    snapshot: &dyn TextSnapshot,
    position: usize,
    config: &StubConfig,
) -> Option<String> {
    if !config.enabled || !config.auto_new_line {
        return None;
    }
    let line = snapshot.line_number_at(position)?;
    if line == 0 || snapshot.line(line)?.start != position {
        return None;
    }
    if !is_inside_doc_comment(snapshot.text(), position) {
        return None;
    }

    let previous = snapshot.line_text(line - 1)?;
    let indent = leading_whitespace(previous);
    let trimmed = previous.trim_start();
    let prefix = if trimmed.starts_with("/**") {
        let marker = if config.use_asterisk { " * " } else { "   " };
        format!("{indent}{marker}")
    } else if trimmed.starts_with('*') {
        format!("{indent}* ")
    } else {
        indent.to_string()
    };
    Some(prefix)
}

/// [`continuation_prefix`] as an insertion edit.
pub fn continuation_edit(
    snapshot: &dyn TextSnapshot,
    position: usize,
    config: &StubConfig,
) -> Option<StubEdit> {
    continuation_prefix(snapshot, position, config)
        .map(|text| StubEdit { range: position..position, text })
}
