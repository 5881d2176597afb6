//! A plain `O(n*m)` reference implementation of edit distance, used only to
//! cross-check the banded bit-parallel core in tests.

use crate::mode::AlignMode;

/// Full dynamic-programming table, `(query.len()+1) x (target.len()+1)`,
/// flattened row-major. `D[i][j]` is the cost of aligning `query[..i]`
/// against `target[..j]`. The top row is `0` everywhere in [`AlignMode::HW`]
/// (free leading target gap) and `0, 1, 2, ...` otherwise.
fn table(query: &[usize], target: &[usize], mode: AlignMode) -> Vec<Vec<usize>> {
    let (m, n) = (query.len(), target.len());
    let mut d = vec![vec![0usize; n + 1]; m + 1];
    for (j, row) in d[0].iter_mut().enumerate() {
        *row = if mode == AlignMode::HW { 0 } else { j };
    }
    for (i, row) in d.iter_mut().enumerate() {
        row[0] = i;
    }
    for i in 1..=m {
        for j in 1..=n {
            let sub_cost = if query[i - 1] == target[j - 1] { 0 } else { 1 };
            let diag = d[i - 1][j - 1] + sub_cost;
            let up = d[i - 1][j] + 1;
            let left = d[i][j - 1] + 1;
            d[i][j] = diag.min(up).min(left);
        }
    }
    d
}

/// Reference NW (global) edit distance.
pub fn nw_distance(query: &[usize], target: &[usize]) -> usize {
    let d = table(query, target, AlignMode::NW);
    d[query.len()][target.len()]
}

/// Reference semi-global (SHW/HW) search: best score and every 0-based
/// target end position achieving it.
pub fn semi_global(query: &[usize], target: &[usize], mode: AlignMode) -> (usize, Vec<usize>) {
    let d = table(query, target, mode);
    let last_row = &d[query.len()];
    let best = *last_row.iter().min().unwrap_or(&0);
    let ends = last_row
        .iter()
        .enumerate()
        .filter(|&(_, &score)| score == best)
        .map(|(j, _)| j - 1)
        .collect();
    (best, ends)
}
