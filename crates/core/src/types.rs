//! Core types shared across the engine: detected parameters, dialects, return-tag
//! decisions, and the edit handed back to the host.

use serde::{Deserialize, Serialize};
use std::ops::Range;

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// One comma-separated segment of a parameter list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    /// Text after the first `:`, when the segment carries an annotation.
    #[serde(rename = "type")]
    pub ty: Option<String>,
}

impl Parameter {
    /// Split a trimmed segment such as `b: number` into name and annotation.
    pub fn parse(segment: &str) -> Self {
        match segment.split_once(':') {
            Some((name, ty)) => {
                let ty = ty.trim();
                Parameter {
                    name: name.trim().to_string(),
                    ty: if ty.is_empty() { None } else { Some(ty.to_string()) },
                }
            }
            None => Parameter { name: segment.to_string(), ty: None },
        }
    }
}

// ---------------------------------------------------------------------------
// Dialect and return-tag settings
// ---------------------------------------------------------------------------

/// Which declaration patterns are recognised and how the return tag is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentDialect {
    /// JavaScript: bare `@returns`, driven by a scan of the function body.
    #[serde(alias = "javascript", alias = "js")]
    Plain,
    /// TypeScript: `@returns {T}`, copied from the signature's return annotation.
    #[serde(alias = "typescript", alias = "ts")]
    Annotated,
}

impl CommentDialect {
    pub fn is_annotated(self) -> bool {
        self == CommentDialect::Annotated
    }

    /// Pick a dialect from a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            "ts" | "tsx" | "mts" | "cts" => CommentDialect::Annotated,
            _ => CommentDialect::Plain,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CommentDialect::Plain => "plain",
            CommentDialect::Annotated => "annotated",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnTagMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ReturnTagMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "auto" => Some(ReturnTagMode::Auto),
            "always" => Some(ReturnTagMode::Always),
            "never" => Some(ReturnTagMode::Never),
            _ => None,
        }
    }
}

/// What the stub's return line should look like, if there is one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "type", rename_all = "lowercase")]
pub enum ReturnTag {
    None,
    /// `@returns`
    Plain,
    /// `@returns {T}`
    Typed(String),
}

// ---------------------------------------------------------------------------
// Host-facing edit
// ---------------------------------------------------------------------------

/// Replace `range` (half-open byte offsets) with `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StubEdit {
    pub range: Range<usize>,
    pub text: String,
}
