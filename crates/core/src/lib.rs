//! jsdoc-stub core: heuristic function-signature analysis for JSDoc comment stubs.
//!
//! Type `/**` above a function and get back a comment template with one `@param` per
//! parameter and an `@returns` when the function produces a value. Everything here is a
//! small, line-oriented parser over a text snapshot: no AST, no tokenizer.
//!
//! # Modules
//!
//! - [`snapshot`]: Read-only line view over a buffer ([`TextSnapshot`], [`SourceText`])
//! - [`scanner`]: Line/position primitives and declaration-line detection
//! - [`patterns`]: Named line predicates (function keyword, typed signature, return)
//! - [`comments`]: Comment stripping over a single string
//! - [`signature`]: Parameter-list extraction and splitting
//! - [`returns`]: Body scan automaton and return-type capture
//! - [`stub`]: Stub assembly and the host-facing generation entry point
//! - [`continuation`]: ` * ` continuation when breaking a line inside a doc comment
//! - [`config`]: [`StubConfig`] and `.jsdocstub.toml` loading
//! - [`types`]: Shared data types
//! - [`error`]: [`StubError`]

pub mod comments;
pub mod config;
pub mod continuation;
pub mod error;
pub mod patterns;
pub mod returns;
pub mod scanner;
pub mod signature;
pub mod snapshot;
pub mod stub;
pub mod types;

pub use config::{load_config, StubConfig, CONFIG_FILE_NAME};
pub use continuation::{continuation_edit, continuation_prefix};
pub use error::StubError;
pub use snapshot::{LineSpan, SourceText, TextSnapshot};
pub use stub::{collect_stub_edits, generate_stub, try_generate_stub};
pub use types::{CommentDialect, Parameter, ReturnTag, ReturnTagMode, StubEdit};
