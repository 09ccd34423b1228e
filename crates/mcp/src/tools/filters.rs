#![forbid(unsafe_code)]

use super::views::{filter_view, recompose_view};
use crate::{
    McpServer, ai_error, ai_ok, args_object, map_engine_error, optional_color,
    optional_layer_id, optional_nullable_string, optional_string, require_filter_id,
    require_layer_id,
};
use qm_core::{FilterId, Operator, format_number};
use qm_engine::{EngineError, RecomposeSummary};
use serde_json::{Map, Value, json};

pub(crate) fn handle_filter_add(server: &mut McpServer, args: Value) -> Value {
    let layer = match args_object(&args).and_then(|obj| require_layer_id(obj, "layer")) {
        Ok(v) => v,
        Err(err) => return err,
    };
    match server.session.add_filter(layer) {
        Ok(id) => filter_result(server, "filter_add", id, None),
        Err(err) => map_engine_error(err),
    }
}

struct FilterEdit {
    id: FilterId,
    label: Option<Option<String>>,
    operator: Option<Operator>,
    value: Option<String>,
    color: Option<qm_core::Color>,
}

impl FilterEdit {
    fn is_empty(&self) -> bool {
        self.label.is_none()
            && self.operator.is_none()
            && self.value.is_none()
            && self.color.is_none()
    }
}

fn parse_filter_edit(obj: &Map<String, Value>) -> Result<FilterEdit, Value> {
    let id = require_filter_id(obj, "filter")?;
    let label = optional_nullable_string(obj, "label")?;
    let operator = match optional_string(obj, "operator")? {
        Some(raw) => Some(
            Operator::parse(&raw)
                .map_err(|err| ai_error("INVALID_INPUT", &format!("operator: {}", err.message())))?,
        ),
        None => None,
    };
    // Operands arrive as text or as JSON numbers; both go through the same coercion.
    let value = match obj.get("value") {
        None => None,
        Some(Value::Null) => Some(String::new()),
        Some(Value::String(raw)) => Some(raw.clone()),
        Some(Value::Number(n)) => Some(n.as_f64().map(format_number).unwrap_or_default()),
        Some(_) => {
            return Err(ai_error(
                "INVALID_INPUT",
                "value must be a string, a number or null",
            ));
        }
    };
    let color = optional_color(obj, "color")?;
    Ok(FilterEdit {
        id,
        label,
        operator,
        value,
        color,
    })
}

pub(crate) fn handle_filter_set(server: &mut McpServer, args: Value) -> Value {
    let edit = match args_object(&args).and_then(parse_filter_edit) {
        Ok(v) => v,
        Err(err) => return err,
    };
    if edit.is_empty() {
        return ai_error(
            "INVALID_INPUT",
            "one of label, operator, value or color is required",
        );
    }
    match apply_filter_edit(server, &edit) {
        Ok(summary) => filter_result(server, "filter_set", edit.id, summary),
        Err(err) => map_engine_error(err),
    }
}

fn apply_filter_edit(
    server: &mut McpServer,
    edit: &FilterEdit,
) -> Result<Option<RecomposeSummary>, EngineError> {
    let session = &mut server.session;
    let mut summary = None;
    if let Some(label) = &edit.label {
        summary = Some(session.set_filter_label(edit.id, label.as_deref())?);
    }
    if let Some(operator) = edit.operator {
        summary = Some(session.set_filter_operator(edit.id, operator)?);
    }
    if let Some(value) = &edit.value {
        summary = Some(session.set_filter_value(edit.id, value)?);
    }
    if let Some(color) = edit.color {
        summary = Some(session.set_filter_color(edit.id, color)?);
    }
    Ok(summary)
}

pub(crate) fn handle_filter_delete(server: &mut McpServer, args: Value) -> Value {
    let id = match args_object(&args).and_then(|obj| require_filter_id(obj, "filter")) {
        Ok(v) => v,
        Err(err) => return err,
    };
    match server.session.delete_filter(id) {
        Ok(deleted) => ai_ok("filter_delete", json!({ "filter": id, "deleted": deleted })),
        Err(err) => map_engine_error(err),
    }
}

pub(crate) fn handle_filters(server: &mut McpServer, args: Value) -> Value {
    let layer = match args_object(&args).and_then(|obj| optional_layer_id(obj, "layer")) {
        Ok(v) => v,
        Err(err) => return err,
    };
    let items = match layer {
        Some(layer) => {
            if server.session.layer(layer).is_none() {
                return map_engine_error(EngineError::UnknownLayer(layer));
            }
            server
                .session
                .filters_for(layer)
                .map(filter_view)
                .collect::<Vec<_>>()
        }
        None => server
            .session
            .filters()
            .iter()
            .map(filter_view)
            .collect::<Vec<_>>(),
    };
    ai_ok("filters", json!({ "items": items }))
}

fn filter_result(
    server: &McpServer,
    intent: &str,
    id: FilterId,
    summary: Option<RecomposeSummary>,
) -> Value {
    let Some(filter) = server.session.filter(id) else {
        return map_engine_error(EngineError::UnknownFilter(id));
    };
    let layer = server.session.layer(filter.layer());
    ai_ok(
        intent,
        json!({
            "filter": filter_view(filter),
            "recompose": summary.map(recompose_view),
            "style_digest": layer.map(|layer| layer.style_digest())
        }),
    )
}
