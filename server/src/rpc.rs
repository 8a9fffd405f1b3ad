//! Line-delimited JSON-RPC over stdio for editor hosts.

use jsdoc_stub_core::{generate_stub, CommentDialect, StubConfig, StubEdit, TextSnapshot};
use serde::Deserialize;
use serde_json::{json, Value};
use std::io::{self, BufRead, Write};
use tracing::{debug, info, warn};

use crate::changes::{apply_changes, TextChange};
use crate::types::{Document, ServerState};

const PARSE_ERROR: i64 = -32700;
const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;

type MethodResult = Result<Value, (i64, String)>;

fn invalid_params(message: impl Into<String>) -> (i64, String) {
    (INVALID_PARAMS, message.into())
}

fn parse_params<T: for<'de> Deserialize<'de>>(params: &Value) -> Result<T, (i64, String)> {
    serde_json::from_value(params.clone()).map_err(|e| invalid_params(e.to_string()))
}

fn edit_json(edit: &StubEdit) -> Value {
    json!({ "start": edit.range.start, "end": edit.range.end, "newText": edit.text })
}

// ---------------------------------------------------------------------------
// Method handlers
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct OpenParams {
    uri: String,
    text: String,
    #[serde(default)]
    dialect: Option<CommentDialect>,
}

#[derive(Deserialize)]
struct ChangeParams {
    uri: String,
    changes: Vec<TextChange>,
}

#[derive(Deserialize)]
struct UriParams {
    uri: String,
}

#[derive(Deserialize)]
struct GenerateParams {
    uri: String,
    offset: usize,
}

fn handle_initialize(state: &ServerState) -> MethodResult {
    Ok(json!({
        "serverInfo": { "name": "jsdoc-stub", "version": env!("CARGO_PKG_VERSION") },
        "capabilities": {
            "stubs": state.config.enabled,
            "continuation": state.config.enabled && state.config.auto_new_line,
        }
    }))
}

fn handle_open(state: &mut ServerState, params: &Value) -> MethodResult {
    let p: OpenParams = parse_params(params)?;
    let dialect = state.dialect_for(&p.uri, p.dialect);
    let doc = Document::new(p.text, dialect);
    let lines = doc.text.line_count();
    info!(uri = %p.uri, dialect = dialect.label(), lines, "Opened document");
    state.documents.insert(p.uri.clone(), doc);
    Ok(json!({ "uri": p.uri, "lines": lines, "dialect": dialect }))
}

fn handle_change(state: &mut ServerState, params: &Value) -> MethodResult {
    let p: ChangeParams = parse_params(params)?;
    let config = state.config.clone();
    let doc = state
        .documents
        .get_mut(&p.uri)
        .ok_or_else(|| invalid_params(format!("Document not open: {}", p.uri)))?;
    let edits = apply_changes(doc, &p.changes, &config).map_err(|e| invalid_params(e.to_string()))?;
    Ok(json!({ "edits": edits.iter().map(edit_json).collect::<Vec<_>>() }))
}

fn handle_close(state: &mut ServerState, params: &Value) -> MethodResult {
    let p: UriParams = parse_params(params)?;
    match state.documents.remove(&p.uri) {
        Some(_) => Ok(json!({ "closed": true })),
        None => Err(invalid_params(format!("Document not open: {}", p.uri))),
    }
}

fn handle_generate(state: &ServerState, params: &Value) -> MethodResult {
    let p: GenerateParams = parse_params(params)?;
    let doc = state
        .documents
        .get(&p.uri)
        .ok_or_else(|| invalid_params(format!("Document not open: {}", p.uri)))?;
    let newline = doc.text.line_ending();
    let edit = generate_stub(&doc.text, p.offset, doc.dialect, newline, &state.config);
    Ok(json!({ "edit": edit.as_ref().map(edit_json) }))
}

fn handle_config_get(state: &ServerState) -> MethodResult {
    serde_json::to_value(&state.config).map_err(|e| (INVALID_PARAMS, e.to_string()))
}

/// Merge a partial config object into the current settings. Unknown keys are rejected.
fn handle_config_update(state: &mut ServerState, params: &Value) -> MethodResult {
    let updates = params.as_object().ok_or_else(|| invalid_params("Expected an object of settings"))?;
    let mut merged = serde_json::to_value(&state.config).map_err(|e| invalid_params(e.to_string()))?;
    let Some(fields) = merged.as_object_mut() else {
        return Err(invalid_params("Config is not an object"));
    };
    for (key, value) in updates {
        if !fields.contains_key(key) && key != "dialect" {
            return Err(invalid_params(format!("Unknown setting: {key}")));
        }
        fields.insert(key.clone(), value.clone());
    }
    let config: StubConfig = serde_json::from_value(merged).map_err(|e| invalid_params(e.to_string()))?;
    debug!(?config, "Config updated");
    state.config = config;
    handle_config_get(state)
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Handle one decoded JSON-RPC message. Notifications (no `id`) get no response.
pub fn dispatch_jsonrpc(state: &mut ServerState, msg: &Value) -> Option<Value> {
    let method = msg["method"].as_str().unwrap_or("");
    let id = msg.get("id").cloned();
    let params = msg.get("params").cloned().unwrap_or_else(|| json!({}));

    let result = match method {
        "initialize" => handle_initialize(state),
        "document/open" => handle_open(state, &params),
        "document/change" => handle_change(state, &params),
        "document/close" => handle_close(state, &params),
        "stub/generate" => handle_generate(state, &params),
        "config/get" => handle_config_get(state),
        "config/update" => handle_config_update(state, &params),
        "ping" => Ok(json!({})),
        _ => Err((METHOD_NOT_FOUND, "Method not found".to_string())),
    };

    let id = match id {
        Some(id) => id,
        None => {
            if let Err((code, message)) = &result {
                warn!(method, code, %message, "Notification failed");
            }
            return None;
        }
    };

    Some(match result {
        Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
        Err((code, message)) => {
            debug!(method, code, %message, "Request failed");
            json!({ "jsonrpc": "2.0", "id": id, "error": { "code": code, "message": message } })
        }
    })
}

/// Serve requests from stdin until it closes.
pub fn run_stdio(mut state: ServerState) {
    let stdin = io::stdin();
    let stdout = io::stdout();
    info!("jsdoc-stub server ready");

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Value>(&line) {
            Ok(msg) => dispatch_jsonrpc(&mut state, &msg),
            Err(_) => Some(json!({
                "jsonrpc": "2.0",
                "id": null,
                "error": { "code": PARSE_ERROR, "message": "Parse error" }
            })),
        };

        if let Some(response) = response {
            let mut out = stdout.lock();
            let _ = writeln!(out, "{response}");
            let _ = out.flush();
        }
    }
}
