use samara_model::MergeStrategy;

/// Share of the larger header list that must be matched for [`MergeStrategy::Inner`].
pub const INNER_MATCH_RATIO: f64 = 0.8;

/// Classifies a merge from its match count and the two header-list lengths.
///
/// `Inner` when more than 80% of the larger list is matched; otherwise
/// `Left`/`Right` for whichever list is longer, `Outer` when they are equal.
/// Two empty lists classify as `Outer`.
pub fn select_strategy(matched: usize, source_len: usize, target_len: usize) -> MergeStrategy {
    let largest = source_len.max(target_len);
    if largest > 0 && matched as f64 / largest as f64 > INNER_MATCH_RATIO {
        return MergeStrategy::Inner;
    }
    match source_len.cmp(&target_len) {
        std::cmp::Ordering::Greater => MergeStrategy::Left,
        std::cmp::Ordering::Less => MergeStrategy::Right,
        std::cmp::Ordering::Equal => MergeStrategy::Outer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_match_is_inner() {
        assert_eq!(select_strategy(3, 3, 3), MergeStrategy::Inner);
    }

    #[test]
    fn exactly_eighty_percent_is_not_inner() {
        assert_eq!(select_strategy(4, 5, 5), MergeStrategy::Outer);
        assert_eq!(select_strategy(4, 5, 4), MergeStrategy::Left);
    }

    #[test]
    fn longer_side_wins_below_threshold() {
        assert_eq!(select_strategy(1, 4, 2), MergeStrategy::Left);
        assert_eq!(select_strategy(1, 2, 4), MergeStrategy::Right);
        assert_eq!(select_strategy(0, 2, 2), MergeStrategy::Outer);
    }

    #[test]
    fn ratio_uses_larger_list() {
        // 5 of max(5, 6) = 83% -> inner even though the target is longer.
        assert_eq!(select_strategy(5, 5, 6), MergeStrategy::Inner);
    }

    #[test]
    fn empty_lists_are_outer() {
        assert_eq!(select_strategy(0, 0, 0), MergeStrategy::Outer);
    }
}
