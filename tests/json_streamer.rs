use serde_json::{json, Value};
use shopify_order_parser::{flatten, stream_to_map, Category, JsonStreamer, Limits};
use std::{fs::File, io::BufReader};

const ORDER: &str = include_str!("fixtures/order.json");

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn round_trip_keeps_keys_and_values() {
    init();
    let entries = stream_to_map(ORDER).unwrap();
    let original: Value = serde_json::from_str(ORDER).unwrap();
    let original = original.as_object().unwrap();

    assert_eq!(
        entries.keys().collect::<Vec<_>>(),
        original.keys().collect::<Vec<_>>()
    );
    for (key, value) in &entries {
        assert_eq!(Some(value), original.get(key), "{key}");
    }

    let reserialized = serde_json::to_string(&entries).unwrap();
    let reparsed: Value = serde_json::from_str(&reserialized).unwrap();
    assert_eq!(&reparsed, &Value::Object(original.clone()));
}

#[test]
fn reader_and_str_agree() {
    init();
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/order.json");
    let from_file = JsonStreamer::new()
        .from_reader(BufReader::new(File::open(path).unwrap()))
        .unwrap();

    assert_eq!(from_file, stream_to_map(ORDER).unwrap());
}

#[test]
fn error_points_at_the_failure() {
    init();
    let err = stream_to_map("{\n  \"line_items\": [\n    {\"product_id\": 1,}\n  ]\n}").unwrap_err();

    assert_eq!(err.category, Category::Syntax);
    assert_eq!(err.line, 3);
    assert!(err.column > 0);
}

#[test]
fn order_over_limits_is_rejected() {
    init();
    let tight = JsonStreamer::with_limits(Limits::default().max_entries(5));
    assert_eq!(tight.stream(ORDER).unwrap_err().category, Category::Limit);

    let small = JsonStreamer::with_limits(Limits::default().max_input_bytes(64));
    assert_eq!(small.stream(ORDER).unwrap_err().category, Category::Limit);

    assert!(JsonStreamer::with_limits(Limits::unlimited()).stream(ORDER).is_ok());
}

#[test]
fn flattening_the_order_is_stable() {
    let order: Value = serde_json::from_str(ORDER).unwrap();

    let flat = flatten(&order);
    assert_eq!(flat, order);
    assert_eq!(flatten(&flat), flat);

    let numbered = json!({"1": {"a": [1]}, "2": {"b": {"0": [2]}}});
    let flat = flatten(&numbered);
    assert_eq!(flat, json!({"0": {"a": [1]}, "1": {"b": {"0": [2]}}}));
    assert_eq!(flatten(&flat), flat);
}
