#![forbid(unsafe_code)]

use qm_core::AttrValue;
use qm_engine::{QueryOutcome, Session, SqliteQuerySource};
use serde_json::json;
use std::path::PathBuf;

fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let dir = base.join(format!("qm_engine_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn seeded() -> SqliteQuerySource {
    let source = SqliteQuerySource::open_in_memory().expect("open");
    source
        .connection()
        .execute_batch(
            r#"
            CREATE TABLE parks (name TEXT, area REAL, visitors INTEGER, shape TEXT);
            INSERT INTO parks VALUES ('Tete d''Or', 1.17, 3000000, '{"type":"Point","coordinates":[4.85,45.77]}');
            INSERT INTO parks VALUES ('Parilly', 1.78, NULL, '{"type":"Point","coordinates":[4.89,45.71]}');
            "#,
        )
        .expect("seed");
    source
}

#[test]
fn rows_keep_column_order_and_types() {
    let source = seeded();
    let outcome = source.run("SELECT name, area, visitors FROM parks ORDER BY name");
    let QueryOutcome::Rows(rows) = outcome else {
        panic!("expected rows");
    };
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].keys().collect::<Vec<_>>(), vec!["name", "area", "visitors"]);
    assert_eq!(rows[0].get("name"), Some(&json!("Parilly")));
    assert_eq!(rows[0].get("visitors"), Some(&json!(null)));
    assert_eq!(rows[1].get("visitors"), Some(&json!(3000000)));
}

#[test]
fn sql_errors_become_error_outcomes() {
    let source = seeded();
    let outcome = source.run("SELECT * FROM no_such_table");
    match outcome {
        QueryOutcome::Error(text) => assert!(text.contains("no_such_table"), "{text}"),
        QueryOutcome::Rows(_) => panic!("expected an error outcome"),
    }
}

#[test]
fn aliased_geometry_column_builds_a_layer() {
    let source = seeded();
    let sql = "SELECT name, visitors, shape AS geojson, 'ST_Point' AS geom_type FROM parks";
    let mut session = Session::default();
    let id = session
        .build_layer(&source.run(sql), sql)
        .expect("build")
        .expect("layer");
    let layer = session.layer(id).unwrap();
    assert_eq!(layer.labels(), ["name".to_string(), "visitors".to_string()]);
    assert_eq!(layer.features()[1].info().get("visitors"), Some(&AttrValue::Null));

    let plain = "SELECT name FROM parks";
    assert!(session.build_layer(&source.run(plain), plain).unwrap().is_none());
}

#[test]
fn file_backed_database_opens() {
    let dir = temp_dir("file_backed_database_opens");
    let path = dir.join("places.db");
    {
        let source = SqliteQuerySource::open(&path).expect("open file");
        source
            .connection()
            .execute_batch("CREATE TABLE t (x INTEGER); INSERT INTO t VALUES (7);")
            .expect("seed");
    }
    let source = SqliteQuerySource::open(&path).expect("reopen");
    assert_eq!(source.path(), Some(path.as_path()));
    let QueryOutcome::Rows(rows) = source.run("SELECT x FROM t") else {
        panic!("expected rows");
    };
    assert_eq!(rows[0].get("x"), Some(&json!(7)));
    let _ = std::fs::remove_dir_all(&dir);
}
