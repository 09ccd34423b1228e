#![forbid(unsafe_code)]

mod support;
use support::*;

use serde_json::{Value, json};

fn with_places(test_name: &str) -> Server {
    let mut server = Server::start_initialized(test_name);
    server.call_ok(
        "layer_from_rows",
        json!({ "query": "SELECT * FROM places", "rows": places_rows() }),
    );
    server
}

fn layer_fills(server: &mut Server) -> Vec<String> {
    let layer = server.call_ok("layer_get", json!({ "layer": 0 }))["layer"].clone();
    fills(&layer)
}

fn add(server: &mut Server, label: &str, operator: &str, value: Value, color: &str) -> u64 {
    let created = server.call_ok("filter_add", json!({ "layer": 0 }));
    let id = created["filter"]["id"].as_u64().expect("filter id");
    server.call_ok(
        "filter_set",
        json!({ "filter": id, "label": label, "operator": operator, "value": value, "color": color }),
    );
    id
}

#[test]
fn new_filter_matches_nothing_and_takes_layer_color() {
    let mut server = with_places("new_filter");
    let created = server.call_ok("filter_add", json!({ "layer": 0 }));
    let filter = &created["filter"];
    assert_eq!(filter["id"], json!(0));
    assert_eq!(filter["operator"], json!("="));
    assert_eq!(filter["color"], json!("#3399cc"));
    assert_eq!(filter["label"], json!(null));
    assert_eq!(filter["filtered_features"], json!([]));
}

#[test]
fn overlapping_filters_resolve_by_list_order() {
    let mut server = with_places("overlapping_filters");
    let over_40 = add(&mut server, "pop", ">", json!(40), "#ff0000");
    assert_eq!(layer_fills(&mut server), vec!["#3399cc", "#ff0000", "#ff0000"]);

    let over_80 = add(&mut server, "pop", ">", json!("80"), "#0000ff");
    assert_eq!(layer_fills(&mut server), vec!["#3399cc", "#ff0000", "#0000ff"]);

    let deleted = server.call_ok("filter_delete", json!({ "filter": over_80 }));
    assert_eq!(deleted["deleted"], json!(true));
    assert_eq!(layer_fills(&mut server), vec!["#3399cc", "#ff0000", "#ff0000"]);

    server.call_ok("filter_delete", json!({ "filter": over_40 }));
    assert_eq!(layer_fills(&mut server), vec!["#3399cc"; 3]);
}

#[test]
fn filter_set_reports_membership_and_digest() {
    let mut server = with_places("filter_set_report");
    let created = server.call_ok("filter_add", json!({ "layer": 0 }));
    let before = created["style_digest"].clone();

    let set = server.call_ok(
        "filter_set",
        json!({ "filter": 0, "label": "name", "value": "b", "color": "#00ff00" }),
    );
    assert_eq!(set["filter"]["value_type"], json!("string"));
    assert_eq!(set["filter"]["filtered_features"], json!([1]));
    assert_eq!(set["recompose"], json!({ "filters": 1, "matches": 1, "owned": 1 }));
    assert_ne!(set["style_digest"], before);

    let listed = server.call_ok("filters", json!({ "layer": 0 }));
    assert_eq!(listed["items"][0]["color"], json!("#00ff00"));
}

#[test]
fn clearing_the_operand_releases_features() {
    let mut server = with_places("clear_operand");
    let id = add(&mut server, "pop", "<", json!(60), "#ff0000");
    assert_eq!(layer_fills(&mut server), vec!["#ff0000", "#ff0000", "#3399cc"]);

    let cleared = server.call_ok("filter_set", json!({ "filter": id, "value": null }));
    assert_eq!(cleared["filter"]["value"], json!(null));
    assert_eq!(cleared["filter"]["filtered_features"], json!([]));
    assert_eq!(layer_fills(&mut server), vec!["#3399cc"; 3]);
}

#[test]
fn filter_errors_use_stable_codes() {
    let mut server = with_places("filter_errors");

    let payload = server.call("filter_add", json!({ "layer": 4 }));
    assert_eq!(error_code(&payload), Some("UNKNOWN_ID"));

    let payload = server.call("filter_set", json!({ "filter": 0, "color": "#fff" }));
    assert_eq!(error_code(&payload), Some("UNKNOWN_ID"));

    server.call_ok("filter_add", json!({ "layer": 0 }));
    let payload = server.call("filter_set", json!({ "filter": 0, "operator": "!=" }));
    assert_eq!(error_code(&payload), Some("INVALID_INPUT"));
    let payload = server.call("filter_set", json!({ "filter": 0 }));
    assert_eq!(error_code(&payload), Some("INVALID_INPUT"));

    let payload = server.call("filters", json!({ "layer": 3 }));
    assert_eq!(error_code(&payload), Some("UNKNOWN_ID"));

    let missing = server.call_ok("filter_delete", json!({ "filter": 42 }));
    assert_eq!(missing["deleted"], json!(false));
}
