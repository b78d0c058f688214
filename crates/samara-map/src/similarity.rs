//! Normalized edit-distance similarity between two header names.

use rapidfuzz::distance::levenshtein;

/// Similarity in `[0, 1]` derived from the Levenshtein distance.
///
/// Computed as `(max_len - distance) / max_len` over Unicode scalar values.
/// Two empty strings are identical (1.0). Inputs are compared verbatim;
/// callers trim and lowercase first.
pub fn similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    let distance = levenshtein::distance(a.chars(), b.chars());
    (longest - distance) as f64 / longest as f64
}

/// Trims and lowercases a header for comparison.
pub fn normalize_header(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn identical_strings_score_one() {
        assert!(approx(similarity("email", "email"), 1.0));
    }

    #[test]
    fn empty_strings_are_identical() {
        assert!(approx(similarity("", ""), 1.0));
    }

    #[test]
    fn one_empty_side_scores_zero() {
        assert!(approx(similarity("", "abc"), 0.0));
        assert!(approx(similarity("abc", ""), 0.0));
    }

    #[test]
    fn single_edit_is_normalized_by_longest() {
        // kitten -> sitting is the classic distance-3 pair, longest is 7.
        assert!(approx(similarity("kitten", "sitting"), 4.0 / 7.0));
        assert!(approx(similarity("e-mail", "email"), 5.0 / 6.0));
    }

    #[test]
    fn case_is_not_folded() {
        assert!(similarity("Email", "email") < 1.0);
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert!(approx(similarity("café", "cafe"), 0.75));
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_header("  Full Name "), "full name");
    }
}
