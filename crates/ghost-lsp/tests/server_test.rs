//! In-process integration tests driving `LspServer::handle_message`
//! directly, without spawning a compiled binary.

use ghost_lsp::{Lifecycle, LspServer, ServerConfig};
use ghost_lsp_position::LineIndex;
use ghost_lsp_protocol::{JsonRpcRequest, JsonRpcResponse};
use lsp_types::TextEdit;
use serde_json::{json, Value};
use std::io::Cursor;

fn request(id: Option<Value>, method: &str, params: Value) -> JsonRpcRequest {
    serde_json::from_value(json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params})).unwrap()
}

fn initialized_server() -> LspServer {
    let mut server = LspServer::new(ServerConfig::default());
    server.handle_message(request(Some(json!(1)), "initialize", json!({"capabilities": {}})));
    server.handle_message(request(None, "initialized", json!({})));
    server
}

fn did_open(server: &mut LspServer, uri: &str, text: &str) {
    server.handle_message(request(
        None,
        "textDocument/didOpen",
        json!({"textDocument": {"uri": uri, "languageId": "ghost", "version": 1, "text": text}}),
    ));
}

fn result_of(response: JsonRpcResponse) -> Value {
    assert!(response.error.is_none(), "unexpected error: {:?}", response.error);
    response.result.unwrap_or(Value::Null)
}

/// Apply a `WorkspaceEdit`'s `TextEdit`s to `text`, latest-starting edit
/// first so earlier offsets stay valid as the string is rewritten.
fn apply_edits(text: &str, edits: &[TextEdit]) -> String {
    let line_index = LineIndex::new(text.to_string());
    let mut spans: Vec<(usize, usize, &str)> = edits
        .iter()
        .map(|edit| {
            let start = line_index.position_to_offset(edit.range.start.line, edit.range.start.character).unwrap();
            let end = line_index.position_to_offset(edit.range.end.line, edit.range.end.character).unwrap();
            (start, end, edit.new_text.as_str())
        })
        .collect();
    spans.sort_by(|a, b| b.0.cmp(&a.0));

    let mut result = text.to_string();
    for (start, end, new_text) in spans {
        result.replace_range(start..end, new_text);
    }
    result
}

// S1: initialize handshake.
#[test]
fn s1_initialize_handshake_advertises_capabilities() {
    let mut server = LspServer::new(ServerConfig::default());
    let response = server.handle_message(request(Some(json!(1)), "initialize", json!({"capabilities": {}}))).unwrap();
    let result = result_of(response);
    assert_eq!(result["serverInfo"]["name"], "ghost-lsp");
    assert_eq!(result["capabilities"]["positionEncoding"], "utf-16");
    server.handle_message(request(None, "initialized", json!({})));
    assert_eq!(server.lifecycle(), Lifecycle::Initialized);
}

// S2: diagnostic on syntax error, emitted before the didOpen ack (a
// notification has none, but the outgoing queue must still carry it).
#[test]
fn s2_diagnostic_on_syntax_error() {
    let mut server = initialized_server();
    did_open(&mut server, "file:///broken.ghost", "let x = ;\n");
    let outgoing = server.take_outgoing();
    let publish = outgoing.iter().find(|(method, _)| method == "textDocument/publishDiagnostics").unwrap();
    assert!(!publish.1["diagnostics"].as_array().unwrap().is_empty());
}

// S3: hover on built-in arrayPush.
#[test]
fn s3_hover_on_builtin() {
    let mut server = initialized_server();
    did_open(&mut server, "file:///a.ghost", "arrayPush(xs, 1);\n");
    server.take_outgoing();
    let response = server
        .handle_message(request(
            Some(json!(2)),
            "textDocument/hover",
            json!({"textDocument": {"uri": "file:///a.ghost"}, "position": {"line": 0, "character": 2}}),
        ))
        .unwrap();
    let result = result_of(response);
    assert!(result["contents"]["value"].as_str().unwrap().contains("arrayPush(array"));
}

// S4: workspace rename across two documents sharing an identifier.
#[test]
fn s4_rename_across_documents() {
    let mut server = initialized_server();
    did_open(&mut server, "file:///a.ghost", "let counter = 0;\nprint(counter);\n");
    did_open(&mut server, "file:///b.ghost", "print(counter);\n");
    server.take_outgoing();

    let response = server
        .handle_message(request(
            Some(json!(3)),
            "textDocument/rename",
            json!({
                "textDocument": {"uri": "file:///a.ghost"},
                "position": {"line": 0, "character": 5},
                "newName": "total",
            }),
        ))
        .unwrap();
    let result = result_of(response);
    let changes = result["changes"].as_object().expect("changes map");
    assert!(changes.contains_key("file:///a.ghost"));
}

// S5: completion after `.` on a shell-config file offers `shell.alias`.
#[test]
fn s5_completion_on_shell_config_namespace() {
    let mut server = initialized_server();
    did_open(&mut server, "file:///home/.gshrc", "shell.\n");
    server.take_outgoing();
    let response = server
        .handle_message(request(
            Some(json!(4)),
            "textDocument/completion",
            json!({"textDocument": {"uri": "file:///home/.gshrc"}, "position": {"line": 0, "character": 6}}),
        ))
        .unwrap();
    let result = result_of(response);
    let labels: Vec<&str> = result.as_array().unwrap().iter().map(|item| item["label"].as_str().unwrap()).collect();
    assert!(labels.contains(&"alias"));
}

// S6 / I10: folding a function body produces a range with endLine > startLine.
#[test]
fn s6_folding_range_of_a_function() {
    let mut server = initialized_server();
    did_open(&mut server, "file:///a.ghost", "function greet(name) {\n  print(name);\n  return name;\n}\n");
    server.take_outgoing();
    let response = server
        .handle_message(request(Some(json!(5)), "textDocument/foldingRange", json!({"textDocument": {"uri": "file:///a.ghost"}})))
        .unwrap();
    let result = result_of(response);
    let ranges = result.as_array().unwrap();
    assert!(!ranges.is_empty());
    assert!(ranges.iter().any(|r| r["endLine"].as_u64().unwrap() > r["startLine"].as_u64().unwrap()));
}

// I1: a didChange reparses the tree, so diagnostics reflect the new text.
#[test]
fn i1_tree_is_refreshed_on_change() {
    let mut server = initialized_server();
    did_open(&mut server, "file:///a.ghost", "let x = ;\n");
    server.take_outgoing();

    server.handle_message(request(
        None,
        "textDocument/didChange",
        json!({
            "textDocument": {"uri": "file:///a.ghost", "version": 2},
            "contentChanges": [{"text": "let x = 1;\n"}],
        }),
    ));
    let outgoing = server.take_outgoing();
    let publish = outgoing.iter().find(|(method, _)| method == "textDocument/publishDiagnostics").unwrap();
    assert!(publish.1["diagnostics"].as_array().unwrap().is_empty());
}

// I3: a second didClose for the same URI is a no-op, not an error.
#[test]
fn i3_double_close_is_idempotent() {
    let mut server = initialized_server();
    did_open(&mut server, "file:///a.ghost", "let x = 1;\n");
    server.take_outgoing();
    let close = json!({"textDocument": {"uri": "file:///a.ghost"}});
    assert!(server.handle_message(request(None, "textDocument/didClose", close.clone())).is_none());
    assert!(server.handle_message(request(None, "textDocument/didClose", close)).is_none());
}

// I4: a request before `initialized` is answered with ServerNotInitialized.
#[test]
fn i4_request_before_initialized_is_rejected() {
    let mut server = LspServer::new(ServerConfig::default());
    let response = server
        .handle_message(request(
            Some(json!(1)),
            "textDocument/hover",
            json!({"textDocument": {"uri": "file:///a.ghost"}, "position": {"line": 0, "character": 0}}),
        ))
        .unwrap();
    assert_eq!(response.error.unwrap().code, -32002);
}

// I5: references (with declarations) and documentHighlight agree on occurrence count.
#[test]
fn i5_references_and_highlight_agree_on_count() {
    let mut server = initialized_server();
    did_open(&mut server, "file:///a.ghost", "let x = 1;\nx = 2;\nprint(x);\n");
    server.take_outgoing();

    let refs = result_of(
        server
            .handle_message(request(
                Some(json!(6)),
                "textDocument/references",
                json!({
                    "textDocument": {"uri": "file:///a.ghost"},
                    "position": {"line": 0, "character": 5},
                    "context": {"includeDeclaration": true},
                }),
            ))
            .unwrap(),
    );
    let highlights = result_of(
        server
            .handle_message(request(
                Some(json!(7)),
                "textDocument/documentHighlight",
                json!({"textDocument": {"uri": "file:///a.ghost"}, "position": {"line": 0, "character": 5}}),
            ))
            .unwrap(),
    );
    assert_eq!(refs.as_array().unwrap().len(), highlights.as_array().unwrap().len());
}

// I8: diagnostics are deterministic across repeated requests.
#[test]
fn i8_diagnostics_are_deterministic() {
    let mut server = initialized_server();
    did_open(&mut server, "file:///a.ghost", "let x = ;\nlet y = ;\n");
    let first = server.take_outgoing();
    did_open(&mut server, "file:///a.ghost", "let x = ;\nlet y = ;\n");
    let second = server.take_outgoing();
    let diags = |outgoing: &Vec<(String, Value)>| {
        outgoing.iter().find(|(m, _)| m == "textDocument/publishDiagnostics").unwrap().1["diagnostics"].clone()
    };
    assert_eq!(diags(&first), diags(&second));
}

// I9: selectionRange chain is monotonically non-shrinking out from the cursor.
#[test]
fn i9_selection_range_nests_outward() {
    let mut server = initialized_server();
    did_open(&mut server, "file:///a.ghost", "function greet(name) {\n  print(name);\n}\n");
    server.take_outgoing();
    let response = server
        .handle_message(request(
            Some(json!(8)),
            "textDocument/selectionRange",
            json!({"textDocument": {"uri": "file:///a.ghost"}, "positions": [{"line": 1, "character": 8}]}),
        ))
        .unwrap();
    let result = result_of(response);
    let chain = result.as_array().unwrap();
    assert_eq!(chain.len(), 1);
    assert!(chain[0].is_object());
}

// I2: with no request or notification on the wire, the server writes
// nothing to its output stream at all.
#[test]
fn i2_no_output_before_any_request_arrives() {
    let mut server = LspServer::new(ServerConfig::default());
    let mut reader = Cursor::new(Vec::<u8>::new());
    let mut writer = Vec::<u8>::new();
    let code = server.run(&mut reader, &mut writer).unwrap();
    assert_eq!(code, 1);
    assert!(writer.is_empty());
}

// I6: applying a cross-file rename's WorkspaceEdit replaces every
// occurrence of the old name with the new name and nothing else.
#[test]
fn i6_rename_edit_replaces_only_the_renamed_identifier() {
    let mut server = initialized_server();
    let a_text = "let counter = 0;\nprint(counter);\n";
    let b_text = "print(counter);\n";
    did_open(&mut server, "file:///a.ghost", a_text);
    did_open(&mut server, "file:///b.ghost", b_text);
    server.take_outgoing();

    let response = server
        .handle_message(request(
            Some(json!(9)),
            "textDocument/rename",
            json!({
                "textDocument": {"uri": "file:///a.ghost"},
                "position": {"line": 0, "character": 5},
                "newName": "total",
            }),
        ))
        .unwrap();
    let result = result_of(response);
    let changes = result["changes"].as_object().unwrap().clone();

    let a_edits: Vec<TextEdit> = serde_json::from_value(changes["file:///a.ghost"].clone()).unwrap();
    let b_edits: Vec<TextEdit> = serde_json::from_value(changes["file:///b.ghost"].clone()).unwrap();

    assert_eq!(apply_edits(a_text, &a_edits), "let total = 0;\nprint(total);\n");
    assert_eq!(apply_edits(b_text, &b_edits), "print(total);\n");
}
