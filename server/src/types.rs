//! Server state: the active configuration and every open document.

use jsdoc_stub_core::{CommentDialect, SourceText, StubConfig};
use std::collections::BTreeMap;
use std::path::Path;

/// One buffer mirrored from the editor.
#[derive(Debug, Clone)]
pub struct Document {
    pub text: SourceText,
    pub dialect: CommentDialect,
}

impl Document {
    pub fn new(text: impl Into<String>, dialect: CommentDialect) -> Self {
        Self { text: SourceText::new(text), dialect }
    }
}

#[derive(Debug, Default)]
pub struct ServerState {
    pub config: StubConfig,
    /// Open documents keyed by URI.
    pub documents: BTreeMap<String, Document>,
}

impl ServerState {
    pub fn new(config: StubConfig) -> Self {
        Self { config, documents: BTreeMap::new() }
    }

    /// Dialect for a newly opened document: explicit request, then config, then extension.
    pub fn dialect_for(&self, uri: &str, requested: Option<CommentDialect>) -> CommentDialect {
        requested.unwrap_or_else(|| self.config.dialect_for_path(Path::new(uri)))
    }
}
