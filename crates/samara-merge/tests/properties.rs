use proptest::prelude::*;
use samara_map::{AnalysisRequest, ColumnMatcher, HeuristicMatcher};
use samara_merge::{MergeOptions, merge_rows};
use samara_model::{CellValue, Sheet};

fn cell() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        Just(CellValue::Empty),
        "[a-z]{1,6}".prop_map(CellValue::Text),
        (-1000i32..1000).prop_map(|n| CellValue::Number(f64::from(n))),
        any::<bool>().prop_map(CellValue::Bool),
    ]
}

fn sheet(name: &'static str, headers: &'static [&'static str]) -> impl Strategy<Value = Sheet> {
    prop::collection::vec(prop::collection::vec(cell(), headers.len()), 0..12).prop_map(
        move |rows| Sheet {
            name: name.to_string(),
            headers: headers.iter().map(|h| (*h).to_string()).collect(),
            rows,
        },
    )
}

const LEFT: &[&str] = &["Id", "Name", "Amount", "Notes"];
const RIGHT: &[&str] = &["Id", "Full Name", "Cost", "Region", "Segment"];

proptest! {
    #[test]
    fn row_count_is_the_longer_side(left in sheet("l", LEFT), right in sheet("r", RIGHT)) {
        let analysis = HeuristicMatcher::new()
            .analyze(&AnalysisRequest::headers(&left.headers, &right.headers));
        let merged = merge_rows(&left, &right, &analysis, &MergeOptions::default()).unwrap();
        prop_assert_eq!(merged.row_count(), left.row_count().max(right.row_count()));
        for row in &merged.rows {
            prop_assert_eq!(row.len(), merged.column_count());
        }
    }

    #[test]
    fn merging_a_sheet_with_itself_is_identity(left in sheet("l", LEFT)) {
        let analysis = HeuristicMatcher::new()
            .analyze(&AnalysisRequest::headers(&left.headers, &left.headers));
        prop_assert!(analysis.is_fully_matched());
        prop_assert!(analysis.mappings.iter().all(|m| m.confidence == 1.0));

        let merged = merge_rows(&left, &left, &analysis, &MergeOptions::default()).unwrap();
        prop_assert_eq!(&merged.headers, &left.headers);
        prop_assert_eq!(&merged.rows, &left.rows);
        prop_assert!(!merged.has_conflicts());
    }

    #[test]
    fn key_join_keeps_every_row(left in sheet("l", LEFT), right in sheet("r", RIGHT)) {
        let analysis = HeuristicMatcher::new()
            .analyze(&AnalysisRequest::headers(&left.headers, &right.headers));
        let options = MergeOptions::default().with_key("Id");
        let merged = merge_rows(&left, &right, &analysis, &options).unwrap();
        prop_assert!(merged.row_count() >= left.row_count().max(right.row_count()));
        prop_assert!(merged.row_count() <= left.row_count() + right.row_count());
    }
}
