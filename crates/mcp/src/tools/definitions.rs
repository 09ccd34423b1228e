#![forbid(unsafe_code)]

use serde_json::{Value, json};

fn layer_only_schema() -> Value {
    json!({
        "type": "object",
        "properties": { "layer": { "type": "integer", "minimum": 0 } },
        "required": ["layer"]
    })
}

pub(crate) fn tool_definitions() -> Vec<Value> {
    vec![
        json!({
            "name": "query",
            "description": "Run SQL against the configured database; rows with a GeoJSON column become a new layer.",
            "inputSchema": {
                "type": "object",
                "properties": { "sql": { "type": "string" } },
                "required": ["sql"]
            }
        }),
        json!({
            "name": "layer_from_rows",
            "description": "Build a layer from an already-fetched result set (rows) or record a failed query (error).",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "query": { "type": "string" },
                    "rows": { "type": "array", "items": { "type": "object" } },
                    "error": { "type": "string" }
                },
                "required": ["query"]
            }
        }),
        json!({
            "name": "layers",
            "description": "List layers in creation order.",
            "inputSchema": { "type": "object", "properties": {}, "required": [] }
        }),
        json!({
            "name": "layer_get",
            "description": "One layer with its features and resolved styles.",
            "inputSchema": layer_only_schema()
        }),
        json!({
            "name": "layer_remove",
            "description": "Remove a layer and every filter attached to it.",
            "inputSchema": layer_only_schema()
        }),
        json!({
            "name": "layer_fill",
            "description": "Set the layer's base color, marker size and/or marker shape.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "layer": { "type": "integer", "minimum": 0 },
                    "color": { "type": "string" },
                    "size": { "type": "number", "minimum": 5, "maximum": 15 },
                    "shape": { "type": "string", "enum": ["square", "triangle", "star", "circle"] }
                },
                "required": ["layer"]
            }
        }),
        json!({
            "name": "layer_stroke",
            "description": "Set the layer's outline color and/or width.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "layer": { "type": "integer", "minimum": 0 },
                    "color": { "type": "string" },
                    "width": { "type": "number", "minimum": 1, "maximum": 5 }
                },
                "required": ["layer"]
            }
        }),
        json!({
            "name": "layer_label",
            "description": "Set the label attribute (null or empty clears it), label color and/or font size step.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "layer": { "type": "integer", "minimum": 0 },
                    "field": { "type": ["string", "null"] },
                    "color": { "type": "string" },
                    "font_delta": { "type": "integer" }
                },
                "required": ["layer"]
            }
        }),
        json!({
            "name": "filter_add",
            "description": "Append an empty filter to a layer; it starts with the layer's color and matches nothing.",
            "inputSchema": layer_only_schema()
        }),
        json!({
            "name": "filter_set",
            "description": "Edit a filter's attribute, operator, operand or color; the layer is recomposed after each edit.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "filter": { "type": "integer", "minimum": 0 },
                    "label": { "type": ["string", "null"] },
                    "operator": { "type": "string", "enum": ["<", "=", ">"] },
                    "value": { "type": ["string", "number", "null"] },
                    "color": { "type": "string" }
                },
                "required": ["filter"]
            }
        }),
        json!({
            "name": "filter_delete",
            "description": "Delete a filter and recompose its layer. Unknown ids are a no-op.",
            "inputSchema": {
                "type": "object",
                "properties": { "filter": { "type": "integer", "minimum": 0 } },
                "required": ["filter"]
            }
        }),
        json!({
            "name": "filters",
            "description": "List filters in list order, optionally for one layer.",
            "inputSchema": {
                "type": "object",
                "properties": { "layer": { "type": "integer", "minimum": 0 } },
                "required": []
            }
        }),
    ]
}
