//! Combines two sheets row by row according to a [`MergeAnalysis`].

use std::collections::{HashMap, VecDeque};

use samara_model::{CellConflict, CellValue, MergeAnalysis, MergeResult, Sheet};

use crate::error::{MergeError, Result};
use crate::options::{MergeOptions, RowAlignment};

const EMPTY: &CellValue = &CellValue::Empty;

/// Output column layout, resolved to header positions on each side.
#[derive(Debug, Default)]
struct ColumnPlan {
    /// `(source index, target index)` per mapping, in mapping order.
    mapped: Vec<(usize, usize)>,
    source_only: Vec<usize>,
    target_only: Vec<usize>,
}

impl ColumnPlan {
    fn resolve(source: &Sheet, target: &Sheet, analysis: &MergeAnalysis) -> Result<Self> {
        let mut source_used = vec![false; source.headers.len()];
        let mut target_used = vec![false; target.headers.len()];
        let mut mapped = Vec::with_capacity(analysis.mappings.len());

        for mapping in &analysis.mappings {
            let s = claim(&source.headers, &mut source_used, &mapping.source_column).ok_or_else(
                || MergeError::UnknownColumn {
                    side: "left",
                    column: mapping.source_column.clone(),
                },
            )?;
            let t = claim(&target.headers, &mut target_used, &mapping.target_column).ok_or_else(
                || MergeError::UnknownColumn {
                    side: "right",
                    column: mapping.target_column.clone(),
                },
            )?;
            mapped.push((s, t));
        }

        Ok(Self {
            mapped,
            source_only: unclaimed(&source_used),
            target_only: unclaimed(&target_used),
        })
    }

    fn headers(&self, source: &Sheet, target: &Sheet, right_suffix: &str) -> Vec<String> {
        let mapped = self.mapped.iter().map(|&(s, _)| source.headers[s].clone());
        let source_only = self.source_only.iter().map(|&s| source.headers[s].clone());
        let target_only = self
            .target_only
            .iter()
            .map(|&t| format!("{}{right_suffix}", target.headers[t]));
        mapped.chain(source_only).chain(target_only).collect()
    }
}

/// First header position equal to `name` that no earlier mapping took.
fn claim(headers: &[String], used: &mut [bool], name: &str) -> Option<usize> {
    let index = headers
        .iter()
        .enumerate()
        .position(|(i, h)| !used[i] && h == name)?;
    used[index] = true;
    Some(index)
}

fn unclaimed(used: &[bool]) -> Vec<usize> {
    used.iter()
        .enumerate()
        .filter_map(|(i, taken)| (!taken).then_some(i))
        .collect()
}

/// Merges `target` into `source`.
///
/// Headers come out as: mapped columns (named after the left side), left
/// columns without a mapping, right columns without a mapping suffixed with
/// [`MergeOptions::right_suffix`].
///
/// With [`RowAlignment::Positional`] the output has as many rows as the longer
/// sheet and missing cells are empty. With [`RowAlignment::Key`] every left
/// row is kept in order, paired with the first unused right row carrying the
/// same key; right rows that found no partner follow at the end.
///
/// A mapped cell where both sides hold different non-empty values becomes
/// `"left{separator}right"` and is recorded in [`MergeResult::conflicts`].
pub fn merge_rows(
    source: &Sheet,
    target: &Sheet,
    analysis: &MergeAnalysis,
    options: &MergeOptions,
) -> Result<MergeResult> {
    let _span = tracing::info_span!(
        "merge_rows",
        left = %source.name,
        right = %target.name,
        strategy = %analysis.merge_strategy,
    )
    .entered();

    let plan = ColumnPlan::resolve(source, target, analysis)?;
    let headers = plan.headers(source, target, &options.right_suffix);

    let pairs = match &options.alignment {
        RowAlignment::Positional => positional_pairs(source, target),
        RowAlignment::Key { column } => {
            let &(s, t) = plan
                .mapped
                .iter()
                .find(|&&(s, _)| source.headers[s] == *column)
                .ok_or_else(|| MergeError::UnknownKeyColumn(column.clone()))?;
            key_pairs(source, s, target, t)
        }
    };

    let mut rows = Vec::with_capacity(pairs.len());
    let mut conflicts = Vec::new();
    for (row_index, (left_row, right_row)) in pairs.into_iter().enumerate() {
        let left = |col: usize| left_row.map_or(EMPTY, |r| source.cell(r, col));
        let right = |col: usize| right_row.map_or(EMPTY, |r| target.cell(r, col));

        let mut row = Vec::with_capacity(headers.len());
        for (column, &(s, t)) in plan.mapped.iter().enumerate() {
            let (cell, conflict) = combine(left(s), right(t), &options.separator);
            if let Some((l, r)) = conflict {
                conflicts.push(CellConflict {
                    row: row_index,
                    column: headers[column].clone(),
                    left: l,
                    right: r,
                });
            }
            row.push(cell);
        }
        row.extend(plan.source_only.iter().map(|&s| left(s).clone()));
        row.extend(plan.target_only.iter().map(|&t| right(t).clone()));
        rows.push(row);
    }

    tracing::info!(
        rows = rows.len(),
        columns = headers.len(),
        conflicts = conflicts.len(),
        "merged sheets"
    );

    Ok(MergeResult {
        headers,
        rows,
        conflicts,
    })
}

type RowPair = (Option<usize>, Option<usize>);

fn positional_pairs(source: &Sheet, target: &Sheet) -> Vec<RowPair> {
    let (left, right) = (source.row_count(), target.row_count());
    (0..left.max(right))
        .map(|i| ((i < left).then_some(i), (i < right).then_some(i)))
        .collect()
}

fn key_pairs(source: &Sheet, source_key: usize, target: &Sheet, target_key: usize) -> Vec<RowPair> {
    // Right rows per key, in sheet order; blank keys never pair.
    let mut by_key: HashMap<String, VecDeque<usize>> = HashMap::new();
    for r in 0..target.row_count() {
        let key = key_of(target.cell(r, target_key));
        if !key.is_empty() {
            by_key.entry(key).or_default().push_back(r);
        }
    }

    let mut taken = vec![false; target.row_count()];
    let mut pairs = Vec::with_capacity(source.row_count().max(target.row_count()));
    for r in 0..source.row_count() {
        let key = key_of(source.cell(r, source_key));
        let partner = by_key.get_mut(&key).and_then(VecDeque::pop_front);
        if let Some(i) = partner {
            taken[i] = true;
        }
        pairs.push((Some(r), partner));
    }

    let leftover = unclaimed(&taken);
    tracing::debug!(
        paired = taken.len() - leftover.len(),
        leftover = leftover.len(),
        "joined rows on key"
    );
    pairs.extend(leftover.into_iter().map(|i| (None, Some(i))));
    pairs
}

fn key_of(cell: &CellValue) -> String {
    cell.to_string().trim().to_string()
}

/// Combines one mapped cell; returns the conflict text when both sides differ.
fn combine(
    left: &CellValue,
    right: &CellValue,
    separator: &str,
) -> (CellValue, Option<(String, String)>) {
    match (left.is_empty(), right.is_empty()) {
        (true, true) => (CellValue::Empty, None),
        (false, true) => (left.clone(), None),
        (true, false) => (right.clone(), None),
        (false, false) => {
            let (l, r) = (left.to_string(), right.to_string());
            if l.trim() == r.trim() {
                (left.clone(), None)
            } else {
                let merged = CellValue::Text(format!("{l}{separator}{r}"));
                (merged, Some((l, r)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_prefers_the_side_with_a_value() {
        let n = CellValue::Number(3.0);
        assert_eq!(combine(&n, &CellValue::Empty, " | ").0, n);
        assert_eq!(combine(&CellValue::Empty, &n, " | ").0, n);
        assert_eq!(
            combine(&CellValue::Empty, &CellValue::Empty, " | "),
            (CellValue::Empty, None)
        );
    }

    #[test]
    fn combine_keeps_equal_values_once() {
        let (cell, conflict) = combine(&CellValue::Number(7.0), &CellValue::text("7"), " | ");
        assert_eq!(cell, CellValue::Number(7.0));
        assert!(conflict.is_none());
    }

    #[test]
    fn combine_joins_differing_values() {
        let (cell, conflict) = combine(&CellValue::text("a"), &CellValue::text("b"), " / ");
        assert_eq!(cell, CellValue::Text("a / b".to_string()));
        assert_eq!(conflict, Some(("a".to_string(), "b".to_string())));
    }

    fn keyed(name: &str, keys: &[&str]) -> Sheet {
        Sheet {
            name: name.to_string(),
            headers: vec!["Id".to_string()],
            rows: keys.iter().map(|k| vec![CellValue::text(*k)]).collect(),
        }
    }

    #[test]
    fn key_pairs_use_each_right_row_once_in_order() {
        let left = keyed("left", &["a", "b", "a", "", "z"]);
        let right = keyed("right", &["a", "", "a", "b", "c"]);
        assert_eq!(
            key_pairs(&left, 0, &right, 0),
            vec![
                (Some(0), Some(0)),
                (Some(1), Some(3)),
                (Some(2), Some(2)),
                (Some(3), None),
                (Some(4), None),
                (None, Some(1)),
                (None, Some(4)),
            ]
        );
    }

    #[test]
    fn claim_skips_taken_duplicates() {
        let headers = vec!["A".to_string(), "A".to_string()];
        let mut used = vec![false, false];
        assert_eq!(claim(&headers, &mut used, "A"), Some(0));
        assert_eq!(claim(&headers, &mut used, "A"), Some(1));
        assert_eq!(claim(&headers, &mut used, "A"), None);
    }
}
