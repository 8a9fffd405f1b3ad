//! Line predicates behind every classification the engine makes.
//!
//! These are deliberately shallow: they look at one line of text, know nothing about
//! strings or template literals, and accept some false positives (see
//! [`is_typed_signature`]).

use regex::Regex;
use std::sync::OnceLock;

fn function_keyword_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"function(\(|\s)").unwrap())
}

fn typed_signature_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i):\s?\([a-z_$]").unwrap())
}

fn return_value_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"return ").unwrap())
}

fn return_annotation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\)\s*:").unwrap())
}

/// Byte index where `function(` / `function ` starts on the line.
pub fn function_keyword_index(line: &str) -> Option<usize> {
    function_keyword_re().find(line).map(|m| m.start())
}

/// `function` followed by `(` or whitespace.
pub fn has_function_keyword(line: &str) -> bool {
    function_keyword_re().is_match(line)
}

/// A colon, at most one whitespace, `(`, then an identifier start (case-insensitive).
///
/// Catches `name: (x) => …` style members. Object literals such as
/// `{ prop: (a * b) }` match as well and are accepted as a known false positive.
pub fn is_typed_signature(line: &str) -> bool {
    typed_signature_re().is_match(line)
}

/// `return` followed by a space, i.e. a return that carries a value.
pub fn has_return_value(line: &str) -> bool {
    return_value_re().is_match(line)
}

/// Text between `) :` and the body's opening `{`, trimmed.
///
/// `function f(a): Promise<T> {` yields `Promise<T>`. The body opens at the first `{` at
/// depth 0 that follows some type text, so an object type such as `{ a: number }` is kept
/// whole and braces inside a one-line body are never captured.
pub fn return_annotation(line: &str) -> Option<&str> {
    let start = return_annotation_re().find(line)?.end();
    let rest = &line[start..];
    let mut depth = 0usize;
    for (i, c) in rest.char_indices() {
        match c {
            '{' if depth == 0 && !rest[..i].trim().is_empty() => return Some(rest[..i].trim()),
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    None
}
