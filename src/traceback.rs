//! Reconstructing an edit script from a stored NW column table.
//!
//! [`crate::dst::calc_edit_dst_nw`] can snapshot every active block's `p`/`m`/
//! `score` per column into an [`crate::align::AlignmentData`]. This module
//! walks that table backward from the bottom-right corner, at each cell
//! comparing it against its diagonal/left/up neighbors to recover which move
//! produced it - the standard Myers bit-parallel traceback.

use crate::{
    align::{AlignmentData, WORD_SIZE},
    block::Block,
    cigar::EditOp,
};

/// Large enough to never be mistaken for a real score, small enough not to
/// overflow when something is added to it.
const UNREACHED: isize = isize::MAX / 4;

struct Snapshot<'a> {
    data: &'a AlignmentData,
    max_num_blocks: usize,
}

impl Snapshot<'_> {
    fn score(&self, row: isize, col: isize) -> isize {
        if row < 0 && col < 0 {
            return 0;
        }
        if row < 0 {
            return col + 1;
        }
        if col < 0 {
            return row + 1;
        }
        let word_size = WORD_SIZE as usize;
        let block_idx = row as usize / word_size;
        let local_row = row as usize % word_size;
        let idx = col as usize * self.max_num_blocks + block_idx;

        let (Some(p), Some(m), Some(score)) =
            (self.data.ps[idx], self.data.ms[idx], self.data.scores[idx])
        else {
            return UNREACHED;
        };
        let block = Block { p, m, score };
        block.values()[word_size - 1 - local_row]
    }
}

/// Reconstruct the edit script aligning `query` (in full) against `target`
/// (already restricted to the matched `[start, end)` window), from a column
/// table built by a matching call to
/// [`crate::dst::calc_edit_dst_nw`].
pub fn traceback(
    query: &[usize],
    target: &[usize],
    data: &AlignmentData,
    max_num_blocks: usize,
) -> Vec<EditOp> {
    let snapshot = Snapshot { data, max_num_blocks };
    let mut row = query.len() as isize - 1;
    let mut col = target.len() as isize - 1;
    let mut ops = Vec::with_capacity(query.len() + target.len());

    while row >= 0 || col >= 0 {
        let cur = snapshot.score(row, col);

        if row >= 0 && col >= 0 {
            let is_match = query[row as usize] == target[col as usize];
            let diag = snapshot.score(row - 1, col - 1);
            if cur == diag + if is_match { 0 } else { 1 } {
                ops.push(if is_match { EditOp::Match } else { EditOp::Mismatch });
                row -= 1;
                col -= 1;
                continue;
            }
        }
        if col >= 0 && cur == snapshot.score(row, col - 1) + 1 {
            ops.push(EditOp::Insert);
            col -= 1;
            continue;
        }
        if row >= 0 && cur == snapshot.score(row - 1, col) + 1 {
            ops.push(EditOp::Delete);
            row -= 1;
            continue;
        }
        // The table is consistent by construction, so this is unreachable for
        // any cell that's genuinely on the optimal path; guard against an
        // infinite loop rather than panicking on it.
        if row >= 0 {
            ops.push(EditOp::Delete);
            row -= 1;
        } else {
            ops.push(EditOp::Insert);
            col -= 1;
        }
    }

    ops.reverse();
    ops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::{transform_sequences, AlignmentData};
    use crate::dst::calc_edit_dst_nw;
    use crate::peq::build_peq_table;

    fn run_nw(query: &str, target: &str) -> (Vec<EditOp>, Option<usize>) {
        let transformed = transform_sequences(query, target, &[]).unwrap();
        let word_size = WORD_SIZE as usize;
        let max_num_blocks = (transformed.query.len().max(1) + word_size - 1) / word_size;
        let padding = max_num_blocks * word_size - transformed.query.len();
        let peq = build_peq_table(transformed.alphabet.len(), &transformed.query);

        let mut data = AlignmentData::new(max_num_blocks, transformed.target.len());
        let dist = calc_edit_dst_nw(
            &peq,
            padding,
            max_num_blocks,
            transformed.query.len(),
            &transformed.target,
            transformed.query.len().max(transformed.target.len()),
            Some(&mut data),
        );
        let ops = traceback(&transformed.query, &transformed.target, &data, max_num_blocks);
        (ops, dist)
    }

    #[test]
    fn identical_sequences_are_all_matches() {
        let (ops, dist) = run_nw("ACGT", "ACGT");
        assert_eq!(dist, Some(0));
        assert!(ops.iter().all(|op| matches!(op, EditOp::Match)));
        assert_eq!(ops.len(), 4);
    }

    #[test]
    fn single_substitution_is_one_mismatch() {
        let (ops, dist) = run_nw("ACGT", "ACCT");
        assert_eq!(dist, Some(1));
        let mismatches = ops.iter().filter(|op| matches!(op, EditOp::Mismatch)).count();
        assert_eq!(mismatches, 1);
    }

    #[test]
    fn edit_script_cost_matches_distance() {
        let (ops, dist) = run_nw("kitten", "sitting");
        let cost = ops
            .iter()
            .filter(|op| !matches!(op, EditOp::Match))
            .count();
        assert_eq!(Some(cost), dist);
    }
}
