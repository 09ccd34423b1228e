#![forbid(unsafe_code)]

mod support;
use support::*;

use serde_json::json;

#[test]
fn initialize_echoes_protocol_and_lists_tools() {
    let mut server = Server::start("initialize_lists_tools");

    let init = server.request(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": { "protocolVersion": "2025-03-26", "capabilities": {}, "clientInfo": { "name": "test", "version": "0" } }
    }));
    assert_eq!(init["result"]["protocolVersion"], json!("2025-03-26"));
    assert_eq!(init["result"]["serverInfo"]["name"], json!("querymap-mcp"));

    let tools_list = server.request(json!({
        "jsonrpc": "2.0",
        "id": 2,
        "method": "tools/list",
        "params": {}
    }));
    let tools = tools_list
        .get("result")
        .and_then(|v| v.get("tools"))
        .and_then(|v| v.as_array())
        .expect("result.tools");

    let mut names = tools
        .iter()
        .filter_map(|tool| tool.get("name").and_then(|v| v.as_str()))
        .collect::<Vec<_>>();
    names.sort();
    assert_eq!(
        names,
        vec![
            "filter_add",
            "filter_delete",
            "filter_set",
            "filters",
            "layer_fill",
            "layer_from_rows",
            "layer_get",
            "layer_label",
            "layer_remove",
            "layer_stroke",
            "layers",
            "query",
        ]
    );
}

#[test]
fn methods_before_initialization_are_rejected() {
    let mut server = Server::start("not_initialized");
    let resp = server.request(json!({
        "jsonrpc": "2.0",
        "id": 5,
        "method": "resources/list",
        "params": {}
    }));
    assert_json_rpc_error(&resp, -32002);

    let ping = server.request(json!({ "jsonrpc": "2.0", "id": 6, "method": "ping" }));
    assert_eq!(ping["result"], json!({}));
}

#[test]
fn malformed_and_unknown_requests_get_json_rpc_errors() {
    let mut server = Server::start_initialized("malformed_requests");

    server.send_raw("{not json");
    assert_json_rpc_error(&server.recv(), -32700);

    let resp = server.request(json!({ "jsonrpc": "2.0", "id": 7 }));
    assert_json_rpc_error(&resp, -32600);

    let resp = server.request(json!({ "jsonrpc": "2.0", "id": 8, "method": "no/such" }));
    assert_json_rpc_error(&resp, -32601);

    let resp = server.request(json!({ "jsonrpc": "2.0", "id": 9, "method": "tools/call" }));
    assert_json_rpc_error(&resp, -32602);
}

#[test]
fn unknown_tools_are_tool_errors_not_protocol_errors() {
    let mut server = Server::start_initialized("unknown_tool");
    let resp = server.request(json!({
        "jsonrpc": "2.0",
        "id": 10,
        "method": "tools/call",
        "params": { "name": "teleport", "arguments": null }
    }));
    assert_eq!(resp["result"]["isError"], json!(true));
    let payload = extract_tool_text(&resp);
    assert_eq!(error_code(&payload), Some("UNKNOWN_TOOL"));
}

#[test]
fn session_record_tracks_the_last_method() {
    let mut server = Server::start_initialized("session_record");
    let _ = server.call("layers", json!({}));

    let record = std::fs::read_to_string(server.state_dir().join("querymap_last_session.txt"))
        .expect("session record");
    assert!(record.contains("mode=newline_json"), "{record}");
    assert!(record.contains("last_method=tools/call"), "{record}");
    assert!(record.contains("db=:memory:"), "{record}");
}

