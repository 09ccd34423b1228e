#![forbid(unsafe_code)]

use qm_engine::{Layer, Redraw, Session, SqliteQuerySource};
use serde_json::{Value, json};

pub(crate) struct McpServer {
    initialized: bool,
    pub(crate) session: Session,
    pub(crate) source: SqliteQuerySource,
}

/// There is no map surface behind the server; redraws are traced instead.
struct TraceRedraw;

impl Redraw for TraceRedraw {
    fn redraw(&self, layer: &Layer) {
        tracing::trace!(
            layer = %layer.id(),
            features = layer.features().len(),
            "layer redrawn"
        );
    }
}

impl McpServer {
    pub(crate) fn new(session: Session, source: SqliteQuerySource) -> Self {
        Self {
            initialized: false,
            session: session.with_renderer(TraceRedraw),
            source,
        }
    }

    pub(crate) fn handle(&mut self, request: crate::JsonRpcRequest) -> Option<Value> {
        let expects_response = request.expects_response();
        let method = request.method.as_str();

        if method == "initialize" {
            let protocol_version = request
                .params
                .as_ref()
                .and_then(|v| v.get("protocolVersion"))
                .and_then(|v| v.as_str())
                .unwrap_or(crate::MCP_VERSION);

            return Some(crate::json_rpc_response(
                request.id,
                json!({
                    "protocolVersion": protocol_version,
                    "serverInfo": {
                        "name": crate::SERVER_NAME,
                        "version": crate::build_fingerprint()
                    },
                    "capabilities": { "tools": {} }
                }),
            ));
        }

        if method == "notifications/initialized" || method == "initialized" {
            self.initialized = true;
            return None;
        }

        if !self.initialized {
            // The first real request initializes implicitly.
            if matches!(method, "tools/call" | "tools/list" | "ping") {
                self.initialized = true;
            } else if expects_response {
                return Some(crate::json_rpc_error(
                    request.id,
                    -32002,
                    "Server not initialized",
                ));
            } else {
                return None;
            }
        }

        if method == "ping" {
            return Some(crate::json_rpc_response(request.id, json!({})));
        }

        if method == "tools/list" {
            return Some(crate::json_rpc_response(
                request.id,
                json!({ "tools": crate::tools::tool_definitions() }),
            ));
        }

        if method == "tools/call" {
            let Some(params_obj) = request.params.as_ref().and_then(|v| v.as_object()) else {
                return Some(crate::json_rpc_error(
                    request.id,
                    -32602,
                    "params must be an object",
                ));
            };

            let tool_name = params_obj
                .get("name")
                .and_then(|v| v.as_str())
                .unwrap_or("");
            // Missing or null arguments mean "no arguments".
            let args = match params_obj.get("arguments") {
                None | Some(Value::Null) => json!({}),
                Some(v) => v.clone(),
            };
            let response_body = self.call_tool(tool_name, args);

            return Some(crate::json_rpc_response(
                request.id,
                json!({
                    "content": [crate::tool_text_content(&response_body)],
                    "isError": !response_body.get("success").and_then(|v| v.as_bool()).unwrap_or(false)
                }),
            ));
        }

        if !expects_response {
            return None;
        }
        Some(crate::json_rpc_error(
            request.id,
            -32601,
            &format!("Method not found: {method}"),
        ))
    }

    pub(crate) fn call_tool(&mut self, name: &str, args: Value) -> Value {
        match crate::tools::dispatch_tool(self, name, args) {
            Some(resp) => resp,
            None => crate::ai_error_with(
                "UNKNOWN_TOOL",
                &format!("Unknown tool: {name}"),
                Some("Call tools/list for the available tools."),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JsonRpcRequest;

    fn server() -> McpServer {
        McpServer::new(
            Session::default(),
            SqliteQuerySource::open_in_memory().expect("in-memory db"),
        )
    }

    fn request(id: Option<Value>, method: &str, params: Value) -> JsonRpcRequest {
        JsonRpcRequest {
            _jsonrpc: Some("2.0".to_string()),
            method: method.to_string(),
            id,
            params: Some(params),
        }
    }

    #[test]
    fn requests_before_initialize_are_rejected_unless_tool_calls() {
        let mut server = server();
        let resp = server
            .handle(request(Some(json!(1)), "resources/list", json!({})))
            .expect("response");
        assert_eq!(resp["error"]["code"], json!(-32002));

        let resp = server
            .handle(request(Some(json!(2)), "tools/list", json!({})))
            .expect("response");
        assert!(resp["result"]["tools"].is_array());
    }

    #[test]
    fn notifications_get_no_response() {
        let mut server = server();
        assert!(
            server
                .handle(request(None, "notifications/initialized", json!({})))
                .is_none()
        );
        assert!(
            server
                .handle(request(None, "notifications/cancelled", json!({})))
                .is_none()
        );
        let resp = server
            .handle(request(Some(json!(3)), "no/such/method", json!({})))
            .expect("response");
        assert_eq!(resp["error"]["code"], json!(-32601));
    }

    #[test]
    fn unknown_tools_report_an_error_payload() {
        let mut server = server();
        let body = server.call_tool("teleport", json!({}));
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"]["code"], json!("UNKNOWN_TOOL"));
    }
}
