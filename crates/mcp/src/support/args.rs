#![forbid(unsafe_code)]

use super::ai::ai_error;
use qm_core::{Color, FilterId, LayerId};
use serde_json::{Map, Value};

pub(crate) fn args_object(args: &Value) -> Result<&Map<String, Value>, Value> {
    args.as_object()
        .ok_or_else(|| ai_error("INVALID_INPUT", "arguments must be an object"))
}

pub(crate) fn require_string(args: &Map<String, Value>, key: &str) -> Result<String, Value> {
    let Some(v) = args.get(key).and_then(|v| v.as_str()) else {
        return Err(ai_error("INVALID_INPUT", &format!("{key} is required")));
    };
    Ok(v.to_string())
}

pub(crate) fn optional_string(
    args: &Map<String, Value>,
    key: &str,
) -> Result<Option<String>, Value> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(v)) => Ok(Some(v.to_string())),
        Some(_) => Err(ai_error(
            "INVALID_INPUT",
            &format!("{key} must be a string"),
        )),
    }
}

/// Distinguishes an absent key (`None`) from an explicit `null` (`Some(None)`).
pub(crate) fn optional_nullable_string(
    args: &Map<String, Value>,
    key: &str,
) -> Result<Option<Option<String>>, Value> {
    match args.get(key) {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(None)),
        Some(Value::String(v)) => Ok(Some(Some(v.to_string()))),
        Some(_) => Err(ai_error(
            "INVALID_INPUT",
            &format!("{key} must be a string or null"),
        )),
    }
}

pub(crate) fn optional_f64(args: &Map<String, Value>, key: &str) -> Result<Option<f64>, Value> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| ai_error("INVALID_INPUT", &format!("{key} must be a number"))),
        Some(_) => Err(ai_error(
            "INVALID_INPUT",
            &format!("{key} must be a number"),
        )),
    }
}

pub(crate) fn optional_i32(args: &Map<String, Value>, key: &str) -> Result<Option<i32>, Value> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| ai_error("INVALID_INPUT", &format!("{key} must be an integer"))),
        Some(_) => Err(ai_error(
            "INVALID_INPUT",
            &format!("{key} must be an integer"),
        )),
    }
}

pub(crate) fn optional_color(
    args: &Map<String, Value>,
    key: &str,
) -> Result<Option<Color>, Value> {
    let Some(raw) = optional_string(args, key)? else {
        return Ok(None);
    };
    Color::parse(&raw)
        .map(Some)
        .map_err(|err| ai_error("INVALID_INPUT", &format!("{key}: {}", err.message())))
}

fn require_id(args: &Map<String, Value>, key: &str) -> Result<u64, Value> {
    match args.get(key) {
        Some(Value::Number(n)) => n.as_u64().ok_or_else(|| {
            ai_error(
                "INVALID_INPUT",
                &format!("{key} must be a non-negative integer"),
            )
        }),
        Some(_) => Err(ai_error(
            "INVALID_INPUT",
            &format!("{key} must be a non-negative integer"),
        )),
        None => Err(ai_error("INVALID_INPUT", &format!("{key} is required"))),
    }
}

pub(crate) fn require_layer_id(args: &Map<String, Value>, key: &str) -> Result<LayerId, Value> {
    require_id(args, key).map(LayerId::new)
}

pub(crate) fn require_filter_id(args: &Map<String, Value>, key: &str) -> Result<FilterId, Value> {
    require_id(args, key).map(FilterId::new)
}

pub(crate) fn optional_layer_id(
    args: &Map<String, Value>,
    key: &str,
) -> Result<Option<LayerId>, Value> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(_) => require_layer_id(args, key).map(Some),
    }
}
