use super::*;
use qm_core::{Color, LabelFont, ShapeKind, Stroke};

fn empty_layer(session: &mut Session) -> LayerId {
    let id = session.layer_ids.next_layer();
    session.layers.push(Layer {
        id,
        query: "SELECT NULL".to_string(),
        shape: ShapeKind::Square,
        size: 10.0,
        color: Color::BLACK,
        stroke: Stroke {
            color: Color::BLACK,
            width: 1.0,
        },
        label_field: None,
        label_color: Color::BLACK,
        label_font: LabelFont::new(12, "sans-serif"),
        labels: Vec::new(),
        features: Vec::new(),
    });
    id
}

#[test]
fn mutators_fail_fast_on_a_layer_without_features() {
    let mut session = Session::default();
    let id = empty_layer(&mut session);

    assert!(matches!(
        session.set_layer_color(id, Color::WHITE),
        Err(EngineError::EmptyLayer(_))
    ));
    assert!(matches!(
        session.set_layer_shape_named(id, "star"),
        Err(EngineError::EmptyLayer(_))
    ));
    assert!(matches!(
        session.set_stroke_width(id, 2.0),
        Err(EngineError::EmptyLayer(_))
    ));
    assert!(matches!(
        session.set_label_font(id, 1),
        Err(EngineError::EmptyLayer(_))
    ));
    let layer = session.layer(id).unwrap();
    assert_eq!(layer.color(), Color::BLACK);
    assert_eq!(layer.shape(), ShapeKind::Square);
}

#[test]
fn recomposing_a_layer_without_features_is_harmless() {
    let mut session = Session::default();
    let id = empty_layer(&mut session);
    let filter = session.add_filter(id).unwrap();
    let summary = session.set_filter_value(filter, "1").unwrap();
    assert_eq!(summary.filters, 1);
    assert_eq!(summary.owned, 0);
    assert_eq!(session.filter(filter).unwrap().value_type(), None);
}

#[test]
fn debug_output_reports_counts() {
    let mut session = Session::default();
    empty_layer(&mut session);
    let rendered = format!("{session:?}");
    assert!(rendered.contains("layers: 1"));
    assert!(rendered.contains("next_layer_id: 1"));
}
