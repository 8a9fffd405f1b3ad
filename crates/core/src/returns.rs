//! Return-tag analysis for the function following a comment trigger.
//!
//! Plain dialect: walk the function body line by line with a small pushdown automaton
//! ([`ScanState`]) and report whether a `return <value>` appears at the function's own
//! nesting level. Annotated dialect: copy the `): Type {` annotation off the line that
//! holds the function's opening brace.

use tracing::debug;

use crate::comments::strip_comments;
use crate::error::Result;
use crate::patterns::{has_function_keyword, has_return_value, return_annotation};
use crate::scanner::{declaration_line_after_trigger, find_line_containing};
use crate::snapshot::TextSnapshot;
use crate::types::{CommentDialect, ReturnTag, ReturnTagMode};

// ---------------------------------------------------------------------------
// Body scan automaton
// ---------------------------------------------------------------------------

/// Outcome of feeding one line to [`ScanState::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStep {
    Continue,
    /// A `return <value>` at the outermost function level.
    FoundReturn,
    /// The function's closing brace was consumed without a qualifying return.
    BodyClosed,
}

/// Per-line state of the body scan. Both depths start at 1 for the function's own brace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanState {
    /// Open blocks of any kind.
    pub brace_depth: usize,
    /// Open function bodies, including the one being analyzed.
    pub function_depth: usize,
    pub in_block_comment: bool,
    /// A nested `function` was seen whose `{` has not appeared yet.
    pub pending_function: bool,
}

impl Default for ScanState {
    fn default() -> Self {
        Self { brace_depth: 1, function_depth: 1, in_block_comment: false, pending_function: false }
    }
}

impl ScanState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one line. Braces are counted per line, not per character.
    pub fn step(self, line: &str) -> (ScanState, ScanStep) {
        let mut s = self;

        let opens_comment = line.rfind("/*");
        let closes_comment = line.rfind("*/");
        match (opens_comment, closes_comment) {
            (Some(open), Some(close)) => s.in_block_comment = open > close,
            (Some(_), None) => s.in_block_comment = true,
            _ => {}
        }
        if s.in_block_comment && closes_comment.is_some() {
            if opens_comment.is_none() || opens_comment <= closes_comment {
                s.in_block_comment = false;
            }
        } else if s.in_block_comment || line.trim().is_empty() {
            return (s, ScanStep::Continue);
        }

        let code = strip_comments(line);
        let is_function = has_function_keyword(&code);
        let opens_block = code.contains('{');

        if is_function && opens_block {
            s.function_depth += 1;
        } else if is_function {
            s.pending_function = true;
        } else if s.pending_function && opens_block {
            s.pending_function = false;
            s.function_depth += 1;
        }
        if opens_block {
            s.brace_depth += 1;
        }

        let returns = has_return_value(&code);
        if code.contains('}') {
            if s.function_depth == 1 && returns {
                return (s, ScanStep::FoundReturn);
            }
            if s.brace_depth == s.function_depth {
                s.function_depth = s.function_depth.saturating_sub(1);
            }
            s.brace_depth = s.brace_depth.saturating_sub(1);
            if s.function_depth == 0 {
                return (s, ScanStep::BodyClosed);
            }
            return (s, ScanStep::Continue);
        }

        if s.function_depth == 1 && returns {
            return (s, ScanStep::FoundReturn);
        }
        (s, ScanStep::Continue)
    }
}

// ---------------------------------------------------------------------------
// Analyzer entry points
// ---------------------------------------------------------------------------

/// Line and absolute offset of the first `{` at or after the declaration line.
fn opening_brace(snapshot: &dyn TextSnapshot, decl_line: usize) -> Option<(usize, usize)> {
    let (line, col) = find_line_containing(snapshot, decl_line, '{')?;
    Some((line, snapshot.line(line)?.start + col))
}

/// Whether the body of the function declared on `decl_line` returns a value at its own
/// nesting level. Returns inside nested functions do not count.
pub fn has_top_level_return(snapshot: &dyn TextSnapshot, decl_line: usize) -> bool {
    let Some((brace_line, brace)) = opening_brace(snapshot, decl_line) else {
        return false;
    };
    let Some(span) = snapshot.line(brace_line) else {
        return false;
    };
    // The scan starts right after the function's own `{`.
    let first = snapshot.text().get(brace + 1..span.end()).unwrap_or("");
    let rest = (brace_line + 1..snapshot.line_count()).filter_map(|n| snapshot.line_text(n));

    let mut state = ScanState::new();
    for (offset, line) in std::iter::once(first).chain(rest).enumerate() {
        let (next, step) = state.step(line);
        state = next;
        match step {
            ScanStep::Continue => {}
            ScanStep::FoundReturn => {
                debug!(line = brace_line + offset, "Top-level return found");
                return true;
            }
            ScanStep::BodyClosed => return false,
        }
    }
    false
}

/// The return annotation on the line holding the function's opening brace, or an empty
/// string when that line carries none.
///
/// Only that single line is inspected; a signature whose `): Type` sits on an earlier
/// line than its `{` is not picked up.
pub fn return_type_annotation(snapshot: &dyn TextSnapshot, decl_line: usize) -> String {
    opening_brace(snapshot, decl_line)
        .and_then(|(line, _)| snapshot.line_text(line))
        .and_then(return_annotation)
        .unwrap_or_default()
        .to_string()
}

/// Plain-dialect decision: should the stub carry a bare `@returns`?
pub fn should_create_return_tag(
    snapshot: &dyn TextSnapshot,
    position: usize,
    dialect: CommentDialect,
    mode: ReturnTagMode,
) -> Result<bool> {
    match mode {
        ReturnTagMode::Always => Ok(true),
        ReturnTagMode::Never => Ok(false),
        ReturnTagMode::Auto => Ok(declaration_line_after_trigger(snapshot, position, dialect)?
            .is_some_and(|decl| has_top_level_return(snapshot, decl))),
    }
}

/// Resolve the return line for the function after the trigger at `position`.
pub fn return_tag(
    snapshot: &dyn TextSnapshot,
    position: usize,
    dialect: CommentDialect,
    mode: ReturnTagMode,
) -> Result<ReturnTag> {
    if mode == ReturnTagMode::Never {
        return Ok(ReturnTag::None);
    }
    match dialect {
        CommentDialect::Plain => {
            let has_return = should_create_return_tag(snapshot, position, dialect, mode)?;
            Ok(if has_return { ReturnTag::Plain } else { ReturnTag::None })
        }
        CommentDialect::Annotated => {
            let annotation = declaration_line_after_trigger(snapshot, position, dialect)?
                .map(|decl| return_type_annotation(snapshot, decl))
                .unwrap_or_default();
            Ok(match (annotation.is_empty(), mode) {
                (false, _) => ReturnTag::Typed(annotation),
                (true, ReturnTagMode::Always) => ReturnTag::Plain,
                (true, _) => ReturnTag::None,
            })
        }
    }
}
