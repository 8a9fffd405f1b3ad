//! Stub assembly and the host-facing generation entry point.

use tracing::{debug, warn};

use crate::config::StubConfig;
use crate::error::Result;
use crate::returns::return_tag;
use crate::scanner::{declaration_line_after_trigger, indentation_at, trigger_line};
use crate::signature::extract_parameters;
use crate::snapshot::TextSnapshot;
use crate::types::{CommentDialect, Parameter, ReturnTag, StubEdit};

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Layout knobs for [`assemble_stub`].
#[derive(Debug, Clone, Copy)]
pub struct StubLayout<'a> {
    pub indent: &'a str,
    pub newline: &'a str,
    pub multi_line_summary: bool,
    pub use_asterisk: bool,
}

impl<'a> StubLayout<'a> {
    pub fn new(indent: &'a str, newline: &'a str, config: &StubConfig) -> Self {
        Self {
            indent,
            newline,
            multi_line_summary: config.multi_line_summary,
            use_asterisk: config.use_asterisk,
        }
    }

    fn marker(&self) -> &'static str {
        if self.use_asterisk {
            " * "
        } else {
            "   "
        }
    }
}

/// Render a complete `/** … */` block.
///
/// Parameters whose name is empty are skipped. With nothing to put in the body the
/// block collapses to a single `/** */` line.
pub fn assemble_stub(layout: &StubLayout<'_>, params: &[Parameter], ret: &ReturnTag) -> String {
    let mut body = String::new();
    let mut push_line = |content: &str| {
        body.push_str(layout.newline);
        body.push_str(layout.indent);
        body.push_str(layout.marker());
        body.push_str(content);
    };

    if layout.multi_line_summary {
        push_line("");
    }
    for param in params.iter().filter(|p| !p.name.is_empty()) {
        push_line(&param_line(param));
    }
    match ret {
        ReturnTag::None => {}
        ReturnTag::Plain => push_line("@returns"),
        ReturnTag::Typed(ty) => push_line(&format!("@returns {{{ty}}}")),
    }

    let mut out = format!("{}/**{}", layout.indent, body);
    if !body.is_empty() {
        out.push_str(layout.newline);
        out.push_str(layout.indent);
    }
    out.push_str(" */");
    out
}

fn param_line(param: &Parameter) -> String {
    match &param.ty {
        Some(ty) => format!("@param {{{ty}}} {}", param.name),
        None => format!("@param {}", param.name),
    }
}

// ---------------------------------------------------------------------------
// Generation entry point
// ---------------------------------------------------------------------------

/// Build the stub edit for a trigger ending at `position`.
///
/// `Ok(None)` when generation is disabled or the trigger does not sit directly above a
/// function declaration. The edit replaces everything from the start of the trigger line
/// up to `position`.
pub fn try_generate_stub(
    snapshot: &dyn TextSnapshot,
    position: usize,
    dialect: CommentDialect,
    newline: &str,
    config: &StubConfig,
) -> Result<Option<StubEdit>> {
    if !config.enabled {
        return Ok(None);
    }
    let line = trigger_line(snapshot, position)?;
    if declaration_line_after_trigger(snapshot, position, dialect)?.is_none() {
        debug!(line, "No function declaration after trigger");
        return Ok(None);
    }

    let indent = indentation_at(snapshot, position)?;
    let params = extract_parameters(snapshot, position, dialect)?;
    let ret = return_tag(snapshot, position, dialect, config.return_tag_mode)?;
    let text = assemble_stub(&StubLayout::new(&indent, newline, config), &params, &ret);

    let start = snapshot.line(line).map(|span| span.start).unwrap_or(position);
    debug!(line, params = params.len(), returns = ?ret, "Generated stub");
    Ok(Some(StubEdit { range: start..position, text }))
}

/// [`try_generate_stub`] for hosts: any failure is logged and produces nothing.
pub fn generate_stub(
    snapshot: &dyn TextSnapshot,
    position: usize,
    dialect: CommentDialect,
    newline: &str,
    config: &StubConfig,
) -> Option<StubEdit> {
    match try_generate_stub(snapshot, position, dialect, newline, config) {
        Ok(edit) => edit,
        Err(e) => {
            warn!(position, error = %e, "Stub generation failed");
            None
        }
    }
}

/// Stub edits for every bare `/**` line in the buffer that sits above a declaration,
/// in buffer order. Ranges refer to the unmodified buffer.
pub fn collect_stub_edits(
    snapshot: &dyn TextSnapshot,
    dialect: CommentDialect,
    newline: &str,
    config: &StubConfig,
) -> Vec<StubEdit> {
    (0..snapshot.line_count())
        .filter_map(|n| snapshot.line(n).zip(snapshot.line_text(n)))
        .filter(|(_, text)| text.trim() == "/**")
        .filter_map(|(span, _)| generate_stub(snapshot, span.end(), dialect, newline, config))
        .collect()
}
