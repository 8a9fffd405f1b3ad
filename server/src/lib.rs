//! jsdoc-stub server: the editor-host adapter for [`jsdoc_stub_core`].
//!
//! The server mirrors open buffers and answers each reported change with the edits it
//! triggers: a stub when a bare `/**` is completed above a function, a ` * ` continuation
//! when a line break is typed inside a doc comment. Edits are returned to the host and
//! never applied server-side.
//!
//! # Modules
//!
//! - [`types`]: Server state and mirrored documents
//! - [`changes`]: Change application and trigger detection
//! - [`rpc`]: JSON-RPC dispatch and the stdio loop

pub mod changes;
pub mod rpc;
pub mod types;

pub use rpc::{dispatch_jsonrpc, run_stdio};
pub use types::{Document, ServerState};
