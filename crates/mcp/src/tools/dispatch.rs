#![forbid(unsafe_code)]

use crate::McpServer;
use serde_json::Value;

use super::{filters, layers};

pub(crate) fn dispatch_tool(server: &mut McpServer, name: &str, args: Value) -> Option<Value> {
    let resp = match name {
        "query" => layers::handle_query(server, args),
        "layer_from_rows" => layers::handle_layer_from_rows(server, args),
        "layers" => layers::handle_layers(server, args),
        "layer_get" => layers::handle_layer_get(server, args),
        "layer_remove" => layers::handle_layer_remove(server, args),
        "layer_fill" => layers::handle_layer_fill(server, args),
        "layer_stroke" => layers::handle_layer_stroke(server, args),
        "layer_label" => layers::handle_layer_label(server, args),
        "filter_add" => filters::handle_filter_add(server, args),
        "filter_set" => filters::handle_filter_set(server, args),
        "filter_delete" => filters::handle_filter_delete(server, args),
        "filters" => filters::handle_filters(server, args),
        _ => return None,
    };
    tracing::debug!(
        tool = name,
        success = resp.get("success").and_then(|v| v.as_bool()).unwrap_or(false),
        "tool call"
    );
    Some(resp)
}
