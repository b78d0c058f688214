use samara_model::{CellValue, MergeAnalysis, MergeStrategy, Sheet};

#[test]
fn analysis_accepts_left_right_aliases_and_missing_fields() {
    let json = r#"{
        "mappings": [
            {"leftColumn": "Name", "rightColumn": "Full Name", "confidence": 0.75}
        ],
        "mergeStrategy": "inner"
    }"#;
    let analysis: MergeAnalysis = serde_json::from_str(json).expect("parse analysis");
    assert_eq!(analysis.mappings.len(), 1);
    assert_eq!(analysis.mappings[0].source_column, "Name");
    assert_eq!(analysis.mappings[0].target_column, "Full Name");
    assert!(analysis.mappings[0].reasoning.is_empty());
    assert!(analysis.unmatched_left.is_empty());
    assert!(analysis.suggestions.is_empty());
    assert_eq!(analysis.merge_strategy, MergeStrategy::Inner);
}

#[test]
fn unknown_strategy_is_rejected_on_the_wire() {
    let json = r#"{"mergeStrategy": "sideways"}"#;
    assert!(serde_json::from_str::<MergeAnalysis>(json).is_err());
}

#[test]
fn cells_round_trip_with_tags() {
    let cells = vec![
        CellValue::Empty,
        CellValue::Text("a".to_string()),
        CellValue::Number(1.5),
        CellValue::Bool(false),
    ];
    let json = serde_json::to_string(&cells).expect("serialize cells");
    let back: Vec<CellValue> = serde_json::from_str(&json).expect("deserialize cells");
    assert_eq!(back, cells);
}

#[test]
fn sheet_lookup_returns_first_duplicate() {
    let sheet = Sheet::from_strings("dupes", &["Id", "Name", "Id"], &[]);
    assert_eq!(sheet.column_index("Id"), Some(0));
    assert_eq!(sheet.column_index("Missing"), None);
    assert_eq!(sheet.column_count(), 3);
    assert_eq!(sheet.row_count(), 0);
}
