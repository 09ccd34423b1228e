#![forbid(unsafe_code)]

use qm_engine::EngineError;
use serde_json::{Value, json};

pub(crate) fn ai_ok(intent: &str, result: Value) -> Value {
    json!({
        "success": true,
        "intent": intent,
        "result": result,
        "error": null
    })
}

pub(crate) fn ai_error(code: &str, message: &str) -> Value {
    ai_error_with(code, message, None)
}

pub(crate) fn ai_error_with(code: &str, message: &str, recovery: Option<&str>) -> Value {
    let mut error_obj = serde_json::Map::new();
    error_obj.insert("code".to_string(), Value::String(code.to_string()));
    error_obj.insert(
        "message".to_string(),
        Value::String(message.trim().to_string()),
    );
    if let Some(recovery) = recovery {
        error_obj.insert(
            "recovery".to_string(),
            Value::String(recovery.trim().to_string()),
        );
    }

    json!({
        "success": false,
        "intent": "error",
        "result": {},
        "error": Value::Object(error_obj)
    })
}

pub(crate) fn map_engine_error(err: EngineError) -> Value {
    let recovery = match &err {
        EngineError::UnknownLayer(_) => Some("Call layers to list the current layer ids."),
        EngineError::UnknownFilter(_) => Some("Call filters to list the current filter ids."),
        EngineError::EmptyLayer(_) => Some("Rebuild the layer from a query that returns rows."),
        _ => None,
    };
    tracing::debug!(code = err.code(), error = %err, "tool call failed");
    ai_error_with(err.code(), &err.to_string(), recovery)
}
