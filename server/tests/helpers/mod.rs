//! Test harness for server integration tests.
//!
//! Builds a `ServerState` from a fixture project copied into a temp dir, then dispatches
//! JSON-RPC requests via `dispatch_jsonrpc()` directly (no subprocess).

use jsdoc_stub_core::load_config;
use jsdoc_stub_server::{dispatch_jsonrpc, ServerState};
use serde_json::{json, Value};
use std::path::Path;
use tempfile::TempDir;

pub struct TestHarness {
    pub state: ServerState,
    next_id: u64,
    temp_dir: TempDir,
}

impl TestHarness {
    /// Create a harness from a named fixture directory under `tests/fixtures/`.
    /// The fixture's `.jsdocstub.toml`, if any, becomes the server config.
    pub fn from_fixture(name: &str) -> Self {
        let fixture_src = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name);
        assert!(fixture_src.exists(), "Fixture '{name}' not found at {}", fixture_src.display());

        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        copy_fixture(&fixture_src, temp_dir.path());

        let state = ServerState::new(load_config(temp_dir.path()));
        Self { state, next_id: 1, temp_dir }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Contents of a fixture file.
    pub fn read(&self, file: &str) -> String {
        std::fs::read_to_string(self.root().join(file))
            .unwrap_or_else(|e| panic!("Failed to read fixture file {file}: {e}"))
    }

    /// Send a request and return the full response.
    pub fn request(&mut self, method: &str, params: Value) -> Value {
        let id = self.next_id;
        self.next_id += 1;
        let msg = json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params });
        let resp = dispatch_jsonrpc(&mut self.state, &msg).expect("request must produce a response");
        assert_eq!(resp["id"], json!(id), "response id mismatch: {resp}");
        resp
    }

    /// Send a request and return its `result`, panicking on an error response.
    pub fn call(&mut self, method: &str, params: Value) -> Value {
        let resp = self.request(method, params);
        assert!(resp.get("error").is_none(), "{method} failed: {resp}");
        resp["result"].clone()
    }

    /// Send a notification (no id); returns whatever the dispatcher produced.
    pub fn notify(&mut self, method: &str, params: Value) -> Option<Value> {
        let msg = json!({ "jsonrpc": "2.0", "method": method, "params": params });
        dispatch_jsonrpc(&mut self.state, &msg)
    }

    pub fn initialize(&mut self) -> Value {
        self.request("initialize", json!({}))
    }

    /// Open a fixture file under its relative path as URI.
    pub fn open_fixture(&mut self, file: &str) -> String {
        let text = self.read(file);
        self.open_text(file, &text);
        text
    }

    pub fn open_text(&mut self, uri: &str, text: &str) -> Value {
        self.call("document/open", json!({ "uri": uri, "text": text }))
    }

    /// Apply changes and return the triggered edits.
    pub fn change(&mut self, uri: &str, changes: Value) -> Vec<Value> {
        let result = self.call("document/change", json!({ "uri": uri, "changes": changes }));
        result["edits"].as_array().cloned().unwrap_or_default()
    }

    /// `stub/generate` at `offset`; `None` when no stub applies.
    pub fn generate(&mut self, uri: &str, offset: usize) -> Option<Value> {
        let result = self.call("stub/generate", json!({ "uri": uri, "offset": offset }));
        Some(result["edit"].clone()).filter(|e| !e.is_null())
    }
}

/// Byte offset just past the `n`th (0-based) occurrence of `needle` in `text`.
pub fn offset_after(text: &str, needle: &str, n: usize) -> usize {
    let (start, _) = text
        .match_indices(needle)
        .nth(n)
        .unwrap_or_else(|| panic!("occurrence {n} of {needle:?} not found"));
    start + needle.len()
}

/// Copy a fixture tree, dotfiles included.
fn copy_fixture(src: &Path, dst: &Path) {
    std::fs::create_dir_all(dst).expect("Failed to create dir");
    for entry in std::fs::read_dir(src).expect("Failed to read fixture dir") {
        let path = entry.expect("Failed to read entry").path();
        let target = dst.join(path.file_name().expect("entry has a name"));
        if path.is_dir() {
            copy_fixture(&path, &target);
        } else {
            std::fs::copy(&path, &target).expect("Failed to copy fixture file");
        }
    }
}
