//! Stub generation settings and `.jsdocstub.toml` loading.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{Result, StubError};
use crate::types::{CommentDialect, ReturnTagMode};

/// Name of the per-project configuration file.
pub const CONFIG_FILE_NAME: &str = ".jsdocstub.toml";

/// Options read by every entry point. Passed explicitly; there is no global instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StubConfig {
    /// Master switch. When off, no stub or continuation is ever produced.
    pub enabled: bool,
    /// Continue a doc comment with ` * ` when a line break is typed inside it.
    pub auto_new_line: bool,
    /// Emit an empty summary line at the top of the stub.
    pub multi_line_summary: bool,
    pub return_tag_mode: ReturnTagMode,
    /// Start continuation lines with `*`.
    pub use_asterisk: bool,
    /// Forced dialect. `None` lets the caller infer it from the file extension.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialect: Option<CommentDialect>,
}

impl Default for StubConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            auto_new_line: true,
            multi_line_summary: true,
            return_tag_mode: ReturnTagMode::Auto,
            use_asterisk: true,
            dialect: None,
        }
    }
}

impl StubConfig {
    /// The configured dialect, or the one implied by `ext`.
    pub fn dialect_for_extension(&self, ext: &str) -> CommentDialect {
        self.dialect.unwrap_or_else(|| CommentDialect::from_extension(ext))
    }

    /// The configured dialect, or the one implied by `path`'s extension.
    pub fn dialect_for_path(&self, path: &Path) -> CommentDialect {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        self.dialect_for_extension(ext)
    }

    /// Render as TOML, e.g. for `jsdoc-stub init`.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| StubError::Config(e.to_string()))
    }

    /// Merge the recognised keys of `table` into `self`, warning on anything else.
    pub fn apply_table(&mut self, table: &toml::Table, source: &str) {
        for key in table.keys() {
            if !KNOWN_CONFIG_KEYS.contains(&key.as_str()) {
                warn_unknown_key(key, source);
            }
        }

        let flags: [(&str, &mut bool); 4] = [
            ("enabled", &mut self.enabled),
            ("auto_new_line", &mut self.auto_new_line),
            ("multi_line_summary", &mut self.multi_line_summary),
            ("use_asterisk", &mut self.use_asterisk),
        ];
        for (key, slot) in flags {
            match table.get(key) {
                Some(toml::Value::Boolean(b)) => *slot = *b,
                Some(other) => {
                    warn!(key, value = %other, "Expected true/false in {source}; keeping default")
                }
                None => {}
            }
        }

        if let Some(value) = table.get("return_tag_mode") {
            match value.as_str().and_then(ReturnTagMode::parse) {
                Some(mode) => self.return_tag_mode = mode,
                None => warn!(
                    value = %value,
                    "Invalid return_tag_mode in {source} (expected auto, always or never)"
                ),
            }
        }

        if let Some(value) = table.get("dialect") {
            match value.as_str().map(str::to_ascii_lowercase).as_deref() {
                Some("plain" | "javascript" | "js") => self.dialect = Some(CommentDialect::Plain),
                Some("annotated" | "typescript" | "ts") => {
                    self.dialect = Some(CommentDialect::Annotated)
                }
                _ => warn!(value = %value, "Invalid dialect in {source} (expected plain or annotated)"),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// .jsdocstub.toml loading
// ---------------------------------------------------------------------------

/// Known keys in `.jsdocstub.toml` for config validation.
const KNOWN_CONFIG_KEYS: &[&str] =
    &["enabled", "auto_new_line", "multi_line_summary", "return_tag_mode", "use_asterisk", "dialect"];

/// Simple Levenshtein edit distance for typo suggestions.
fn edit_distance(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Closest known key, if it is within typo distance of `key`.
fn suggest_key(key: &str) -> Option<&'static str> {
    KNOWN_CONFIG_KEYS
        .iter()
        .copied()
        .min_by_key(|k| edit_distance(key, k))
        .filter(|k| edit_distance(key, k) <= 3)
}

fn warn_unknown_key(key: &str, source: &str) {
    match suggest_key(key) {
        Some(suggestion) => {
            warn!(key, suggestion, "Unknown key in {source}; did you mean '{suggestion}'?")
        }
        None => warn!(key, "Unknown key in {source} (known keys: {})", KNOWN_CONFIG_KEYS.join(", ")),
    }
}

/// Load stub settings from `.jsdocstub.toml` in `project_root`.
///
/// Missing file → defaults. Unparsable file → defaults with a warning. Unknown keys and
/// invalid values are warned about and skipped.
pub fn load_config(project_root: &Path) -> StubConfig {
    let mut config = StubConfig::default();
    let config_path = project_root.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return config;
    }

    debug!(path = %config_path.display(), "Loading {CONFIG_FILE_NAME}");
    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) => {
            warn!(path = %config_path.display(), error = %e, "Could not read {CONFIG_FILE_NAME}");
            return config;
        }
    };
    match content.parse::<toml::Table>() {
        Ok(table) => config.apply_table(&table, CONFIG_FILE_NAME),
        Err(e) => warn!(error = %e, "Failed to parse {CONFIG_FILE_NAME}"),
    }
    config
}
