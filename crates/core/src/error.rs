//! Error type for the fallible core primitives.
//!
//! "Nothing to document here" is never an error: those outcomes are `None` or an empty
//! list. A [`StubError`] means the host handed us something we cannot address (an
//! offset past the buffer, a span that splits a character) and the caller must drop the
//! whole generation attempt.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StubError {
    #[error("position {position} is outside the buffer (length {len})")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("line {line} does not exist (line count {count})")]
    LineOutOfRange { line: usize, count: usize },

    #[error("span {start}..{end} is not a valid text range")]
    InvalidSpan { start: usize, end: usize },

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, StubError>;
