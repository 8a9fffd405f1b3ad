//! Read-only line view over a text buffer.
//!
//! The engine never owns the editor's buffer. It only needs stable line numbers, the
//! absolute start offset of each line, and offset → line lookup, which is what
//! [`TextSnapshot`] describes. [`SourceText`] is the bundled implementation used by the
//! server and the CLI.

use std::ops::Range;

use crate::error::{Result, StubError};

/// Absolute placement of one line inside the buffer. `len` excludes the line break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    pub start: usize,
    pub len: usize,
}

impl LineSpan {
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// A snapshot of a buffer, immutable for the duration of one analysis call.
///
/// Line numbers are 0-based and contiguous; line starts grow monotonically with the
/// line number. Offsets are byte offsets into [`TextSnapshot::text`].
pub trait TextSnapshot {
    fn text(&self) -> &str;

    fn line_count(&self) -> usize;

    fn line(&self, number: usize) -> Option<LineSpan>;

    /// Line containing `position`. The end of the buffer belongs to the last line.
    fn line_number_at(&self, position: usize) -> Option<usize>;

    fn line_text(&self, number: usize) -> Option<&str> {
        let span = self.line(number)?;
        self.text().get(span.start..span.end())
    }
}

/// Fetch a line's text, turning a missing line into a [`StubError`].
pub fn require_line(snapshot: &dyn TextSnapshot, number: usize) -> Result<&str> {
    snapshot
        .line_text(number)
        .ok_or(StubError::LineOutOfRange { line: number, count: snapshot.line_count() })
}

/// Resolve the line containing `position`, turning an out-of-range offset into a [`StubError`].
pub fn require_line_number(snapshot: &dyn TextSnapshot, position: usize) -> Result<usize> {
    snapshot
        .line_number_at(position)
        .ok_or(StubError::PositionOutOfRange { position, len: snapshot.text().len() })
}

// ---------------------------------------------------------------------------
// SourceText: owned buffer with a line-start index
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceText {
    text: String,
    line_starts: Vec<usize>,
}

impl SourceText {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let line_starts = index_lines(&text);
        Self { text, line_starts }
    }

    /// Replace `range` with `replacement` and rebuild the line index.
    ///
    /// The buffer is left untouched when the range is invalid.
    pub fn replace(&mut self, range: Range<usize>, replacement: &str) -> Result<()> {
        let invalid = StubError::InvalidSpan { start: range.start, end: range.end };
        if range.start > range.end
            || range.end > self.text.len()
            || !self.text.is_char_boundary(range.start)
            || !self.text.is_char_boundary(range.end)
        {
            return Err(invalid);
        }
        self.text.replace_range(range, replacement);
        self.line_starts = index_lines(&self.text);
        Ok(())
    }

    /// The buffer's line terminator, judged by its first line break.
    pub fn line_ending(&self) -> &'static str {
        match self.text.find('\n') {
            Some(i) if i > 0 && self.text.as_bytes()[i - 1] == b'\r' => "\r\n",
            _ => "\n",
        }
    }
}

fn index_lines(text: &str) -> Vec<usize> {
    let mut starts = vec![0];
    starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
    starts
}

impl TextSnapshot for SourceText {
    fn text(&self) -> &str {
        &self.text
    }

    fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    fn line(&self, number: usize) -> Option<LineSpan> {
        let start = *self.line_starts.get(number)?;
        let mut end = match self.line_starts.get(number + 1) {
            Some(next) => next - 1,
            None => self.text.len(),
        };
        if end > start && self.text.as_bytes()[end - 1] == b'\r' {
            end -= 1;
        }
        Some(LineSpan { start, len: end - start })
    }

    fn line_number_at(&self, position: usize) -> Option<usize> {
        if position > self.text.len() {
            return None;
        }
        // partition_point gives the number of line starts <= position
        Some(self.line_starts.partition_point(|&s| s <= position) - 1)
    }
}
