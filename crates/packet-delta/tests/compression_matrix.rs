//! Compression and decompression matrix over packet-shaped fixtures: camera
//! frames under `images`, nested position readings, schema growth and kind
//! changes.

use packet_delta::{diff, patch, DeltaIteratorExt};
use packet_value::{record_from_json, Record, Scalar, Tensor, Value};
use serde_json::json;

fn rec(json: serde_json::Value) -> Record {
    record_from_json(&json).expect("fixture must be an object")
}

fn ones_frame() -> Tensor {
    Tensor::from_elem(&[7, 7, 3], 1.0f64)
}

fn packet(frame: Tensor, x: i64, y: i64, z: i64) -> Record {
    let mut images = Record::new();
    images.insert("center".into(), Value::from(frame));
    let mut record = Record::new();
    record.insert("images".into(), Value::from(images));
    record.insert(
        "position".into(),
        Value::Mapping(rec(json!({"x": x, "y": y, "z": z}))),
    );
    record
}

fn round_trip(records: &[Record]) -> Vec<Record> {
    records
        .to_vec()
        .into_iter()
        .compressed()
        .decompressed()
        .collect()
}

// ---------------------------------------------------------------------------
// Compression
// ---------------------------------------------------------------------------

#[test]
fn unchanged_image_and_field_are_pruned() {
    let p1 = packet(ones_frame(), 12, 10, 8);
    let p2 = packet(ones_frame(), 2, 3, 8);

    let out: Vec<_> = vec![p1.clone(), p2].into_iter().compressed().collect();

    assert_eq!(out[0], p1);
    assert!(!out[1].contains_key("images"));
    let position = out[1]["position"].as_mapping().unwrap();
    assert_eq!(position["x"], Value::from(2));
    assert_eq!(position["y"], Value::from(3));
    assert!(!position.contains_key("z"));
}

#[test]
fn changed_pixel_keeps_whole_image() {
    let p1 = packet(ones_frame(), 12, 10, 8);
    let mut frame = ones_frame();
    frame.set(&[0, 0, 0], 7.0f64).unwrap();
    let p2 = packet(frame.clone(), 2, 3, 8);

    let out: Vec<_> = vec![p1, p2].into_iter().compressed().collect();

    let images = out[1]["images"].as_mapping().unwrap();
    assert_eq!(images["center"].as_array(), Some(&frame));
    assert!(!out[1]["position"].as_mapping().unwrap().contains_key("z"));
}

#[test]
fn position_example_prunes_matching_coordinate() {
    let mut reference = rec(json!({"pos": {"x": 12, "y": 10, "z": 8}}));
    let pruned = diff(&mut reference, rec(json!({"pos": {"x": 2, "y": 3, "z": 8}})));
    assert_eq!(pruned, rec(json!({"pos": {"x": 2, "y": 3}})));

    let mut decoder_reference = rec(json!({"pos": {"x": 12, "y": 10, "z": 8}}));
    let full = patch(&mut decoder_reference, pruned);
    assert_eq!(full, rec(json!({"pos": {"x": 2, "y": 3, "z": 8}})));
}

#[test]
fn repeated_record_compresses_to_empty() {
    let p = packet(ones_frame(), 1, 2, 3);
    let out: Vec<_> = vec![p.clone(), p.clone(), p].into_iter().compressed().collect();
    assert!(out[1].is_empty());
    assert!(out[2].is_empty());
}

#[test]
fn first_record_passes_through_verbatim() {
    let p = packet(ones_frame(), 1, 2, 3);
    let out: Vec<_> = vec![p.clone()].into_iter().compressed().collect();
    assert_eq!(out, vec![p.clone()]);
    let out: Vec<_> = vec![p.clone()].into_iter().decompressed().collect();
    assert_eq!(out, vec![p]);
}

#[test]
fn new_sensor_keeps_full_subtree() {
    let r1 = rec(json!({"speed": 10}));
    let r2 = rec(json!({"speed": 10, "gps": {"lat": 44.43, "lon": 26.1, "meta": {}}}));
    let out: Vec<_> = vec![r1, r2.clone()].into_iter().compressed().collect();
    assert_eq!(
        out[1],
        rec(json!({"gps": {"lat": 44.43, "lon": 26.1, "meta": {}}}))
    );
}

// ---------------------------------------------------------------------------
// Decompression
// ---------------------------------------------------------------------------

#[test]
fn decompression_restores_image_and_coordinate() {
    let p1 = packet(ones_frame(), 12, 10, 8);
    let p2 = packet(ones_frame(), 2, 3, 8);

    let out = round_trip(&[p1.clone(), p2.clone()]);

    assert!(out[1].contains_key("images"));
    assert_eq!(out[0], p1);
    assert_eq!(out[1], p2);
    let position = out[1]["position"].as_mapping().unwrap();
    assert_eq!(position["z"], Value::from(8));
}

#[test]
fn three_packet_stream_round_trips() {
    let mut frame = ones_frame();
    let p1 = packet(frame.clone(), 12, 10, 8);
    let p2 = packet(frame.clone(), 2, 3, 8);
    frame.set(&[6, 6, 2], 0.5f64).unwrap();
    let p3 = packet(frame, 2, 4, 8);

    let records = vec![p1, p2, p3];
    assert_eq!(round_trip(&records), records);
}

// ---------------------------------------------------------------------------
// Schema drift and kind changes
// ---------------------------------------------------------------------------

#[test]
fn growth_then_change_round_trips() {
    let records = vec![
        rec(json!({"speed": 10})),
        rec(json!({"speed": 10, "gps": {"lat": 1.0}})),
        rec(json!({"speed": 11, "gps": {"lat": 1.0, "fix": {"sats": 4}}})),
        rec(json!({"speed": 11, "gps": {"lat": 2.0, "fix": {"sats": 4}}})),
    ];
    assert_eq!(round_trip(&records), records);
}

#[test]
fn kind_flips_round_trip() {
    let records = vec![
        rec(json!({"a": {"b": 1}, "c": 1})),
        rec(json!({"a": 5, "c": 1})),
        rec(json!({"a": {"b": 2}, "c": [1, 2]})),
        rec(json!({"a": {"b": 2}, "c": {"d": null}})),
        rec(json!({"a": {"b": 2}, "c": 1})),
    ];
    assert_eq!(round_trip(&records), records);
}

#[test]
fn camera_dropout_round_trips() {
    let mut with_frame = Record::new();
    with_frame.insert("center".into(), Value::from(Tensor::from_elem(&[2, 2, 3], 9u8)));
    let mut without_frame = Record::new();
    without_frame.insert("center".into(), Value::Scalar(Scalar::None));

    let mut records = Vec::new();
    for images in [&with_frame, &without_frame, &without_frame, &with_frame] {
        let mut r = Record::new();
        r.insert("images".into(), Value::from(images.clone()));
        records.push(r);
    }

    let pruned: Vec<_> = records.clone().into_iter().compressed().collect();
    assert!(pruned[1]["images"].as_mapping().unwrap()["center"].is_none_marker());
    assert!(pruned[2].is_empty());

    let restored: Vec<_> = pruned.into_iter().decompressed().collect();
    assert_eq!(restored, records);
}
