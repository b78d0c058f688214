use std::collections::HashSet;

use proptest::prelude::*;
use samara_map::{AnalysisRequest, CONFIDENCE_FLOOR, ColumnMatcher, HeuristicMatcher, similarity};

fn header() -> impl Strategy<Value = String> {
    prop_oneof![
        // Pull from the synonym vocabulary so pattern matches actually happen.
        prop::sample::select(vec![
            "Name", "Full Name", "Id", "Identifier", "Email", "E-mail", "Phone", "Mobile",
            "Date", "Created", "Amount", "Cost", "Total", "Status", "State", "Address",
            "Company", "Vendor", "Notes", "Description",
        ])
        .prop_map(str::to_string),
        "[A-Za-z ]{0,10}",
    ]
}

fn headers() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(header(), 0..8)
}

proptest! {
    #[test]
    fn every_source_is_mapped_or_unmatched(left in headers(), right in headers()) {
        let analysis = HeuristicMatcher::new().analyze(&AnalysisRequest::headers(&left, &right));
        prop_assert_eq!(analysis.mappings.len() + analysis.unmatched_left.len(), left.len());
        prop_assert_eq!(analysis.mappings.len() + analysis.unmatched_right.len(), right.len());
    }

    #[test]
    fn no_target_position_is_claimed_twice(left in headers(), right in headers()) {
        let analysis = HeuristicMatcher::new().analyze(&AnalysisRequest::headers(&left, &right));
        // Each target header name may appear in mappings at most as often as
        // it appears in the target header row.
        for mapping in &analysis.mappings {
            let used = analysis
                .mappings
                .iter()
                .filter(|m| m.target_column == mapping.target_column)
                .count();
            let available = right.iter().filter(|h| **h == mapping.target_column).count();
            prop_assert!(used <= available);
        }
        if right.iter().collect::<HashSet<_>>().len() == right.len() {
            let targets: HashSet<_> = analysis.mappings.iter().map(|m| &m.target_column).collect();
            prop_assert_eq!(targets.len(), analysis.mappings.len());
        }
    }

    #[test]
    fn confidence_is_above_floor(left in headers(), right in headers()) {
        let analysis = HeuristicMatcher::new().analyze(&AnalysisRequest::headers(&left, &right));
        for mapping in &analysis.mappings {
            prop_assert!(mapping.confidence > CONFIDENCE_FLOOR);
            prop_assert!(mapping.confidence <= 1.0);
        }
    }

    #[test]
    fn self_analysis_is_all_exact(left in headers()) {
        let analysis = HeuristicMatcher::new().analyze(&AnalysisRequest::headers(&left, &left));
        prop_assert_eq!(analysis.mappings.len(), left.len());
        prop_assert!(analysis.mappings.iter().all(|m| m.confidence == 1.0));
        prop_assert!(analysis.is_fully_matched());
    }

    #[test]
    fn similarity_is_bounded_and_symmetric(a in "[a-z ]{0,12}", b in "[a-z ]{0,12}") {
        let ab = similarity(&a, &b);
        prop_assert!((0.0..=1.0).contains(&ab));
        prop_assert!((ab - similarity(&b, &a)).abs() < 1e-12);
    }
}
