#![forbid(unsafe_code)]

use qm_engine::{Feature, Filter, Layer, RecomposeSummary};
use serde_json::{Value, json};

pub(crate) fn layer_summary(layer: &Layer, filter_count: usize) -> Value {
    json!({
        "id": layer.id(),
        "query": layer.query(),
        "shape": layer.shape().as_str(),
        "size": layer.size(),
        "color": layer.color().to_hex(),
        "stroke": {
            "color": layer.stroke().color.to_hex(),
            "width": layer.stroke().width
        },
        "label_field": layer.label_field(),
        "label_color": layer.label_color().to_hex(),
        "label_font": layer.label_font().to_string(),
        "labels": layer.labels(),
        "feature_count": layer.features().len(),
        "filter_count": filter_count,
        "style_digest": layer.style_digest()
    })
}

pub(crate) fn layer_detail(layer: &Layer, filter_count: usize) -> Value {
    let mut view = layer_summary(layer, filter_count);
    if let Some(obj) = view.as_object_mut() {
        obj.insert(
            "features".to_string(),
            Value::Array(
                layer
                    .features()
                    .iter()
                    .enumerate()
                    .map(|(index, feature)| feature_view(index, feature))
                    .collect(),
            ),
        );
    }
    view
}

fn feature_view(index: usize, feature: &Feature) -> Value {
    json!({
        "index": index,
        "geometry": {
            "kind": feature.geometry().kind(),
            "bbox": feature.geometry().bbox()
        },
        "info": feature.info(),
        "filter_id": feature.filter_id(),
        "style": serde_json::to_value(feature.style()).unwrap_or(Value::Null)
    })
}

pub(crate) fn filter_view(filter: &Filter) -> Value {
    json!({
        "id": filter.id(),
        "layer": filter.layer(),
        "label": filter.label(),
        "operator": filter.operator().as_str(),
        "value": filter.value(),
        "value_type": filter.value_type(),
        "color": filter.color().to_hex(),
        "filtered_features": filter.filtered_features()
    })
}

pub(crate) fn recompose_view(summary: RecomposeSummary) -> Value {
    json!({
        "filters": summary.filters,
        "matches": summary.matches,
        "owned": summary.owned
    })
}
