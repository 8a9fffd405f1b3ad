//! Integration tests for the JSON-RPC surface via dispatch_jsonrpc().
//!
//! Each test builds a ServerState from a fixture project (`js` or `ts`), opens documents,
//! then sends requests and validates the responses.

mod helpers;

use helpers::{offset_after, TestHarness};
use jsdoc_stub_core::TextSnapshot;
use serde_json::json;

// ---------------------------------------------------------------------------
// Protocol tests
// ---------------------------------------------------------------------------

#[test]
fn test_initialize() {
    let mut h = TestHarness::from_fixture("js");
    let resp = h.initialize();

    let name = resp["result"]["serverInfo"]["name"].as_str().unwrap();
    assert_eq!(name, "jsdoc-stub");
    assert_eq!(resp["result"]["capabilities"]["stubs"], json!(true));
    assert_eq!(resp["result"]["capabilities"]["continuation"], json!(true));
}

#[test]
fn test_unknown_method() {
    let mut h = TestHarness::from_fixture("js");
    let resp = h.request("document/format", json!({}));
    assert_eq!(resp["error"]["code"], json!(-32601), "got: {resp}");
}

#[test]
fn test_notification_gets_no_response() {
    let mut h = TestHarness::from_fixture("js");
    let resp = h.notify("document/open", json!({ "uri": "a.js", "text": "let a;" }));
    assert!(resp.is_none(), "got: {resp:?}");
    assert!(h.state.documents.contains_key("a.js"), "notification should still open the document");
}

#[test]
fn test_missing_params_are_invalid() {
    let mut h = TestHarness::from_fixture("js");
    let resp = h.request("document/open", json!({ "uri": "a.js" }));
    assert_eq!(resp["error"]["code"], json!(-32602), "got: {resp}");
}

// ---------------------------------------------------------------------------
// Document lifecycle
// ---------------------------------------------------------------------------

#[test]
fn test_open_reports_lines_and_dialect() {
    let mut h = TestHarness::from_fixture("ts");
    let text = h.read("parser.ts");
    let result = h.open_text("parser.ts", &text);
    assert_eq!(result["lines"], json!(text.lines().count() + 1), "trailing newline starts an empty line");
    assert_eq!(result["dialect"], json!("annotated"));

    let forced = h.call("document/open", json!({ "uri": "other.ts", "text": "", "dialect": "javascript" }));
    assert_eq!(forced["dialect"], json!("plain"));
}

#[test]
fn test_close_forgets_document() {
    let mut h = TestHarness::from_fixture("js");
    h.open_fixture("math.js");
    assert_eq!(h.call("document/close", json!({ "uri": "math.js" }))["closed"], json!(true));

    let resp = h.request("stub/generate", json!({ "uri": "math.js", "offset": 3 }));
    assert_eq!(resp["error"]["code"], json!(-32602), "got: {resp}");
    let resp = h.request("document/close", json!({ "uri": "math.js" }));
    assert_eq!(resp["error"]["code"], json!(-32602), "got: {resp}");
}

// ---------------------------------------------------------------------------
// stub/generate
// ---------------------------------------------------------------------------

#[test]
fn test_generate_js_function_with_return() {
    let mut h = TestHarness::from_fixture("js");
    h.open_fixture("math.js");
    let edit = h.generate("math.js", 3).expect("stub expected above add()");
    assert_eq!(edit["start"], json!(0));
    assert_eq!(edit["end"], json!(3));
    assert_eq!(edit["newText"], json!("/**\n * \n * @param a\n * @param b\n * @returns\n */"), "got: {edit}");
}

#[test]
fn test_generate_js_function_without_return() {
    let mut h = TestHarness::from_fixture("js");
    let text = h.open_fixture("math.js");
    let offset = offset_after(&text, "/**", 2);
    let edit = h.generate("math.js", offset).expect("stub expected above log()");
    assert_eq!(edit["start"], json!(offset - 3));
    assert_eq!(edit["newText"], json!("/**\n * \n * @param message\n */"), "got: {edit}");
}

#[test]
fn test_generate_skips_method_shorthand() {
    let mut h = TestHarness::from_fixture("js");
    let text = h.open_fixture("math.js");
    let offset = offset_after(&text, "/**", 1);
    assert_eq!(h.generate("math.js", offset), None);
}

#[test]
fn test_generate_ts_annotations() {
    let mut h = TestHarness::from_fixture("ts");
    let text = h.open_fixture("parser.ts");

    let edit = h.generate("parser.ts", 3).expect("stub expected above parse()");
    assert_eq!(
        edit["newText"],
        json!("/**\n * @param {string} input\n * @param {boolean} strict?\n * @returns {Ast}\n */"),
        "got: {edit}"
    );

    let edit = h.generate("parser.ts", offset_after(&text, "/**", 1)).expect("stub expected above load()");
    assert_eq!(edit["newText"], json!("/**\n * @param {string} path\n * @returns {Promise<string[]>}\n */"));

    let edit = h.generate("parser.ts", offset_after(&text, "/**", 2)).expect("stub expected above reset()");
    assert_eq!(edit["newText"], json!("/** */"), "unannotated signature gets no return line");
}

#[test]
fn test_generate_out_of_range_offset_is_null() {
    let mut h = TestHarness::from_fixture("js");
    h.open_fixture("math.js");
    assert_eq!(h.generate("math.js", 1_000_000), None);
}

// ---------------------------------------------------------------------------
// document/change
// ---------------------------------------------------------------------------

#[test]
fn test_typing_star_triggers_stub() {
    let mut h = TestHarness::from_fixture("js");
    let text = h.read("math.js");
    let at = text.find("const scale").unwrap();
    h.open_fixture("math.js");

    let edits = h.change("math.js", json!([{ "start": at, "end": at, "text": "/*\n" }]));
    assert!(edits.is_empty(), "half-typed opener must not trigger: {edits:?}");

    let edits = h.change("math.js", json!([{ "start": at + 2, "end": at + 2, "text": "*" }]));
    assert_eq!(edits.len(), 1, "got: {edits:?}");
    assert_eq!(edits[0]["start"], json!(at));
    assert_eq!(edits[0]["end"], json!(at + 3));
    assert_eq!(
        edits[0]["newText"],
        json!("/**\n * \n * @param value\n * @param factor\n */"),
        "nested function's return must not add @returns"
    );
    assert!(h.state.documents["math.js"].text.text().contains("/**\nconst scale"));
}

#[test]
fn test_auto_closed_opener_is_replaced() {
    let mut h = TestHarness::from_fixture("js");
    h.open_text("f.js", "/* */\nfunction f(a) {\n  return a;\n}");
    let edits = h.change("f.js", json!([{ "start": 2, "end": 2, "text": "*" }]));
    assert_eq!(edits.len(), 1, "got: {edits:?}");
    assert_eq!(edits[0]["start"], json!(0));
    assert_eq!(edits[0]["end"], json!(6), "edit should swallow the trailing */");
    assert_eq!(edits[0]["newText"], json!("/**\n * \n * @param a\n * @returns\n */"));
}

#[test]
fn test_line_break_continues_doc_comment() {
    let mut h = TestHarness::from_fixture("js");
    h.open_text("c.js", "  /** Summary");
    let edits = h.change("c.js", json!([{ "start": 13, "end": 13, "text": "\n" }]));
    assert_eq!(edits, vec![json!({ "start": 14, "end": 14, "newText": "   * " })]);

    h.open_text("d.js", "let a;");
    let edits = h.change("d.js", json!([{ "start": 6, "end": 6, "text": "\n" }]));
    assert!(edits.is_empty(), "line break outside a doc comment: {edits:?}");
}

#[test]
fn test_later_change_shifts_earlier_edit() {
    let mut h = TestHarness::from_fixture("js");
    h.open_text("s.js", "/*\nfunction f() {}");
    let edits = h.change(
        "s.js",
        json!([
            { "start": 2, "end": 2, "text": "*" },
            { "start": 0, "end": 0, "text": "// lead\n" }
        ]),
    );
    assert_eq!(edits.len(), 1, "got: {edits:?}");
    assert_eq!(edits[0]["start"], json!(8));
    assert_eq!(edits[0]["end"], json!(11));
    assert_eq!(h.state.documents["s.js"].text.text(), "// lead\n/**\nfunction f() {}");
}

#[test]
fn test_failed_change_is_all_or_nothing() {
    let mut h = TestHarness::from_fixture("js");
    h.open_text("x.js", "abc");
    let resp = h.request(
        "document/change",
        json!({ "uri": "x.js", "changes": [
            { "start": 0, "end": 1, "text": "z" },
            { "start": 2, "end": 40, "text": "" }
        ]}),
    );
    assert_eq!(resp["error"]["code"], json!(-32602), "got: {resp}");
    assert_eq!(h.state.documents["x.js"].text.text(), "abc");
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn test_fixture_config_is_loaded() {
    let mut h = TestHarness::from_fixture("ts");
    let config = h.call("config/get", json!({}));
    assert_eq!(config["multi_line_summary"], json!(false));
    assert_eq!(config["return_tag_mode"], json!("auto"));
}

#[test]
fn test_config_update_changes_output() {
    let mut h = TestHarness::from_fixture("js");
    h.open_fixture("math.js");

    let config = h.call("config/update", json!({ "use_asterisk": false, "multi_line_summary": false }));
    assert_eq!(config["use_asterisk"], json!(false));
    let edit = h.generate("math.js", 3).unwrap();
    assert_eq!(edit["newText"], json!("/**\n   @param a\n   @param b\n   @returns\n */"));

    h.call("config/update", json!({ "enabled": false }));
    assert_eq!(h.generate("math.js", 3), None);
    assert_eq!(h.initialize()["result"]["capabilities"]["stubs"], json!(false));
}

#[test]
fn test_config_update_rejects_bad_input() {
    let mut h = TestHarness::from_fixture("js");
    let resp = h.request("config/update", json!({ "use_asterix": false }));
    assert_eq!(resp["error"]["code"], json!(-32602), "got: {resp}");
    let resp = h.request("config/update", json!({ "return_tag_mode": "sometimes" }));
    assert_eq!(resp["error"]["code"], json!(-32602), "got: {resp}");
    assert_eq!(h.call("config/get", json!({}))["return_tag_mode"], json!("auto"), "failed update must not stick");
}
