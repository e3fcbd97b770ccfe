//! Tests for xsv-model types.

use std::collections::BTreeMap;

use xsv_model::{ColumnType, XsvMetadata};

fn sample_metadata() -> XsvMetadata {
    let mut types = BTreeMap::new();
    types.insert("id".to_string(), ColumnType::Int);
    types.insert("len".to_string(), ColumnType::Float);
    XsvMetadata {
        delimiter: '\t',
        header: vec!["id".to_string(), "len".to_string(), "note".to_string()],
        types,
    }
}

#[test]
fn metadata_serializes_with_type_names() {
    let json = serde_json::to_value(sample_metadata()).expect("serialize metadata");
    assert_eq!(json["delimiter"], "\t");
    assert_eq!(json["types"]["id"], "Int");
    assert_eq!(json["types"]["len"], "Float");
    assert_eq!(json["header"][2], "note");
}

#[test]
fn metadata_round_trips_through_json() {
    let metadata = sample_metadata();
    let json = serde_json::to_string(&metadata).expect("serialize metadata");
    let round: XsvMetadata = serde_json::from_str(&json).expect("deserialize metadata");
    assert_eq!(round, metadata);
}

#[test]
fn columns_follow_header_order() {
    let metadata = sample_metadata();
    let columns: Vec<_> = metadata.columns().collect();
    assert_eq!(
        columns,
        vec![
            ("id", ColumnType::Int),
            ("len", ColumnType::Float),
            ("note", ColumnType::String),
        ]
    );
    assert_eq!(metadata.len(), 3);
    assert!(!metadata.is_empty());
}
