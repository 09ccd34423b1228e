#![forbid(unsafe_code)]

use super::views::{layer_detail, layer_summary};
use crate::{
    McpServer, ai_error, ai_ok, args_object, map_engine_error, optional_color,
    optional_f64, optional_i32, optional_nullable_string, optional_string, require_layer_id,
    require_string,
};
use qm_core::{LayerId, MARKER_SIZE_RANGE, STROKE_WIDTH_RANGE};
use qm_engine::QueryOutcome;
use serde_json::{Value, json};

pub(crate) fn handle_query(server: &mut McpServer, args: Value) -> Value {
    let args = match args_object(&args) {
        Ok(v) => v,
        Err(err) => return err,
    };
    let sql = match require_string(args, "sql") {
        Ok(v) => v,
        Err(err) => return err,
    };
    if sql.trim().is_empty() {
        return ai_error("INVALID_INPUT", "sql must not be empty");
    }
    let outcome = server.source.run(&sql);
    build_from_outcome(server, "query", &outcome, &sql)
}

pub(crate) fn handle_layer_from_rows(server: &mut McpServer, args: Value) -> Value {
    let args = match args_object(&args) {
        Ok(v) => v,
        Err(err) => return err,
    };
    let query = match require_string(args, "query") {
        Ok(v) => v,
        Err(err) => return err,
    };
    let outcome = match (args.get("rows"), args.get("error")) {
        (Some(rows), None) => QueryOutcome::from_json(rows.clone()),
        (None, Some(error)) => QueryOutcome::from_json(json!({ "error": error })),
        _ => {
            return ai_error(
                "INVALID_INPUT",
                "exactly one of rows or error is required",
            );
        }
    };
    build_from_outcome(server, "layer_from_rows", &outcome, &query)
}

/// Error and non-spatial results are successful calls that simply produce no layer.
fn build_from_outcome(
    server: &mut McpServer,
    intent: &str,
    outcome: &QueryOutcome,
    query: &str,
) -> Value {
    let id = match server.session.build_layer(outcome, query) {
        Ok(v) => v,
        Err(err) => return map_engine_error(err),
    };
    let (rows, query_error) = match outcome {
        QueryOutcome::Rows(rows) => (rows.len(), None),
        QueryOutcome::Error(text) => (0, Some(text.as_str())),
    };
    let layer = id
        .and_then(|id| server.session.layer(id))
        .map(|layer| layer_summary(layer, 0));
    ai_ok(
        intent,
        json!({
            "layer": layer,
            "rows": rows,
            "query_error": query_error
        }),
    )
}

pub(crate) fn handle_layers(server: &mut McpServer, _args: Value) -> Value {
    let items = server
        .session
        .layers()
        .iter()
        .map(|layer| layer_summary(layer, server.session.filters_for(layer.id()).count()))
        .collect::<Vec<_>>();
    ai_ok("layers", json!({ "items": items }))
}

pub(crate) fn handle_layer_get(server: &mut McpServer, args: Value) -> Value {
    let id = match layer_arg(&args) {
        Ok(v) => v,
        Err(err) => return err,
    };
    match server.session.layer(id) {
        Some(layer) => ai_ok(
            "layer_get",
            json!({ "layer": layer_detail(layer, server.session.filters_for(id).count()) }),
        ),
        None => map_engine_error(qm_engine::EngineError::UnknownLayer(id)),
    }
}

pub(crate) fn handle_layer_remove(server: &mut McpServer, args: Value) -> Value {
    let id = match layer_arg(&args) {
        Ok(v) => v,
        Err(err) => return err,
    };
    let removed = server.session.remove_layer(id);
    ai_ok("layer_remove", json!({ "layer": id, "removed": removed }))
}

pub(crate) fn handle_layer_fill(server: &mut McpServer, args: Value) -> Value {
    let (id, color, size, shape) = match parse_fill(&args) {
        Ok(v) => v,
        Err(err) => return err,
    };
    if color.is_none() && size.is_none() && shape.is_none() {
        return ai_error("INVALID_INPUT", "one of color, size or shape is required");
    }

    let mut ignored = Vec::new();
    if let Some(shape) = shape {
        match server.session.set_layer_shape_named(id, &shape) {
            Ok(true) => {}
            Ok(false) => ignored.push(format!("unknown shape: {shape}")),
            Err(err) => return map_engine_error(err),
        }
    }
    if let Some(size) = size
        && let Err(err) = server.session.set_layer_size(id, size)
    {
        return map_engine_error(err);
    }
    if let Some(color) = color
        && let Err(err) = server.session.set_layer_color(id, color)
    {
        return map_engine_error(err);
    }
    layer_result(server, "layer_fill", id, ignored)
}

fn parse_fill(
    args: &Value,
) -> Result<(LayerId, Option<qm_core::Color>, Option<f64>, Option<String>), Value> {
    let obj = args_object(args)?;
    let id = require_layer_id(obj, "layer")?;
    let color = optional_color(obj, "color")?;
    let size = optional_f64(obj, "size")?;
    if let Some(size) = size
        && !MARKER_SIZE_RANGE.contains(&size)
    {
        return Err(ai_error(
            "INVALID_INPUT",
            &format!(
                "size must be within {}..={}",
                MARKER_SIZE_RANGE.start(),
                MARKER_SIZE_RANGE.end()
            ),
        ));
    }
    let shape = optional_string(obj, "shape")?;
    Ok((id, color, size, shape))
}

pub(crate) fn handle_layer_stroke(server: &mut McpServer, args: Value) -> Value {
    let parsed = args_object(&args).and_then(|obj| {
        let id = require_layer_id(obj, "layer")?;
        let color = optional_color(obj, "color")?;
        let width = optional_f64(obj, "width")?;
        if let Some(width) = width
            && !STROKE_WIDTH_RANGE.contains(&width)
        {
            return Err(ai_error(
                "INVALID_INPUT",
                &format!(
                    "width must be within {}..={}",
                    STROKE_WIDTH_RANGE.start(),
                    STROKE_WIDTH_RANGE.end()
                ),
            ));
        }
        Ok((id, color, width))
    });
    let (id, color, width) = match parsed {
        Ok(v) => v,
        Err(err) => return err,
    };
    if color.is_none() && width.is_none() {
        return ai_error("INVALID_INPUT", "one of color or width is required");
    }

    if let Some(color) = color
        && let Err(err) = server.session.set_stroke_color(id, color)
    {
        return map_engine_error(err);
    }
    if let Some(width) = width
        && let Err(err) = server.session.set_stroke_width(id, width)
    {
        return map_engine_error(err);
    }
    layer_result(server, "layer_stroke", id, Vec::new())
}

pub(crate) fn handle_layer_label(server: &mut McpServer, args: Value) -> Value {
    let parsed = args_object(&args).and_then(|obj| {
        Ok((
            require_layer_id(obj, "layer")?,
            optional_nullable_string(obj, "field")?,
            optional_color(obj, "color")?,
            optional_i32(obj, "font_delta")?,
        ))
    });
    let (id, field, color, font_delta) = match parsed {
        Ok(v) => v,
        Err(err) => return err,
    };
    if field.is_none() && color.is_none() && font_delta.is_none() {
        return ai_error(
            "INVALID_INPUT",
            "one of field, color or font_delta is required",
        );
    }

    if let Some(field) = field
        && let Err(err) = server.session.set_label_field(id, field.as_deref())
    {
        return map_engine_error(err);
    }
    if let Some(color) = color
        && let Err(err) = server.session.set_label_color(id, color)
    {
        return map_engine_error(err);
    }
    if let Some(delta) = font_delta
        && let Err(err) = server.session.set_label_font(id, delta)
    {
        return map_engine_error(err);
    }
    layer_result(server, "layer_label", id, Vec::new())
}

fn layer_arg(args: &Value) -> Result<LayerId, Value> {
    let obj = args_object(args)?;
    require_layer_id(obj, "layer")
}

fn layer_result(server: &McpServer, intent: &str, id: LayerId, ignored: Vec<String>) -> Value {
    match server.session.layer(id) {
        Some(layer) => ai_ok(
            intent,
            json!({
                "layer": layer_summary(layer, server.session.filters_for(id).count()),
                "ignored": ignored
            }),
        ),
        None => map_engine_error(qm_engine::EngineError::UnknownLayer(id)),
    }
}
