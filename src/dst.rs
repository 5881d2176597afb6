//! Banded column drivers: Ukkonen-style band growth over Myers' block kernel,
//! one for global (NW) alignment and one shared by both semi-global modes
//! (SHW, HW).
//!
//! Both drivers keep the band anchored at block 0 and only ever grow it
//! rightward/downward by at most one block per column; neither ever shrinks
//! or re-grows into a previously dropped block, which keeps band maintenance
//! sound without needing to reconstruct a shrunk block's lost history.
//!
//! The two drivers use different growth predicates because they have
//! different corners to reach. `should_grow` (SHW/HW) only needs the next
//! block to still be reachable with a matching or improving cell, since a
//! semi-global path can end at any column. `should_grow_nw` instead uses the
//! Manhattan-distance-to-corner bound: a NW path must reach the bottom-right
//! corner regardless of how many mismatches that takes, so the next block is
//! worth computing whenever its best possible score, given how far the
//! search still is from both sequences' ends, could land `<= k` - even if
//! every remaining cell is a mismatch. A block that fails its bound at
//! column `c` can never pass it again at `c' > c` (the bound only tightens
//! as the remaining distance to the corner shrinks), so growth alone is
//! enough to stay sound while still pruning the search to roughly `O(k)`
//! blocks.

use crate::{
    align::{AlignmentData, Word, WORD_SIZE},
    block::Block,
    mode::AlignMode,
};

/// Should the band grow by one more block this column?
///
/// `bottom_score` is the score of the current last block's deepest cell after
/// this column's update; `hout` is the horizontal delta leaving that cell;
/// `next_top_eq` is the equality bit for the next block's shallowest row.
fn should_grow(bottom_score: isize, hout: i8, next_top_eq: Word, k: isize) -> bool {
    bottom_score - hout as isize <= k && (next_top_eq & 1 != 0 || hout < 0)
}

/// Band growth check for the NW (global) driver.
///
/// Unlike `should_grow` (semi-global: needs a match bit or `hout < 0` to
/// justify widening the band), NW must grow even when the deepest block
/// never matches at all — two completely dissimilar sequences still have a
/// finite NW distance reachable only through the bottom-right corner. This
/// uses the Manhattan-distance-to-corner bound instead: the block below is
/// still worth computing iff its minimum possible score (given how far we
/// are from both the query's end and the target's end) could still land
/// `<= k`.
fn should_grow_nw(
    last_block: usize,
    bottom_score: isize,
    k: isize,
    word_size: usize,
    target_len: usize,
    query_len: usize,
    c: usize,
) -> bool {
    let w = word_size as isize;
    let lb = last_block as isize;
    let n = target_len as isize;
    let m = query_len as isize;
    let c = c as isize;
    (lb + 1) * w - 1 <= k - bottom_score + 2 * w - 2 - n + c + m
}

/// Result of a banded semi-global search.
#[derive(Debug, Default)]
pub struct SemiGlobalResult {
    /// Best edit distance found within `k`, if any.
    pub edit_distance: Option<usize>,
    /// All target positions (0-based) at which that best score is reached.
    pub end_locations: Vec<isize>,
}

/// Run the semi-global (SHW or HW) banded search.
///
/// `peq` must be sized `(alphabet_size + 1) * max_num_blocks` as built by
/// [`crate::peq::build_peq_table`]; `padding` is the number of filler rows in
/// the last block (`max_num_blocks * WORD_SIZE - query_len`).
pub fn calc_edit_dst_semi_global(
    peq: &[Word],
    padding: usize,
    max_num_blocks: usize,
    query_len: usize,
    target: &[usize],
    k: usize,
    mode: AlignMode,
) -> SemiGlobalResult {
    debug_assert!(mode != AlignMode::NW);
    let word_size = WORD_SIZE as usize;

    let mut k = if mode == AlignMode::HW {
        k.min(query_len)
    } else {
        k
    } as isize;
    let start_hin: i8 = if mode == AlignMode::HW { 0 } else { 1 };

    let mut last_block: usize = 0;
    let mut blocks: Vec<Block> = vec![Block::fresh(0)];

    let mut best_score: Option<isize> = None;
    let mut positions: Vec<isize> = Vec::new();

    for (c, &tc) in target.iter().enumerate() {
        let col_base = tc * max_num_blocks;
        let mut hin = start_hin;
        for b in 0..=last_block {
            let eq = peq[col_base + b];
            let hout = blocks[b].advance(eq, hin);
            blocks[b].score += hout as isize;
            hin = hout;
        }
        let hout = hin;

        if last_block + 1 < max_num_blocks {
            let next_eq = peq[col_base + last_block + 1];
            if should_grow(blocks[last_block].score, hout, next_eq, k) {
                let mut next = Block::fresh(last_block + 1);
                let next_hout = next.advance(next_eq, hout);
                next.score = blocks[last_block].score - hout as isize
                    + word_size as isize
                    + next_hout as isize;
                last_block += 1;
                blocks.push(next);
                tracing::trace!(column = c, new_last_block = last_block, "band grew");
            }
        }

        if last_block == max_num_blocks - 1 {
            let col_score = blocks[last_block].values()[padding];
            if col_score <= k {
                match best_score {
                    Some(best) if col_score > best => {}
                    Some(best) if col_score == best => {
                        positions.push(c as isize);
                    }
                    _ => {
                        best_score = Some(col_score);
                        k = col_score;
                        positions.clear();
                        positions.push(c as isize);
                    }
                }
            }
        }
    }

    SemiGlobalResult {
        edit_distance: best_score.map(|s| s as usize),
        end_locations: positions,
    }
}

/// Run the global (NW) banded search.
///
/// If `align_data` is supplied, every column's active block states are
/// snapshotted into it for later traceback (see [`crate::traceback`]).
/// Returns the edit distance at `(query_len - 1, target.len() - 1)` if it is
/// `<= k`, otherwise `None`.
pub fn calc_edit_dst_nw(
    peq: &[Word],
    padding: usize,
    max_num_blocks: usize,
    query_len: usize,
    target: &[usize],
    k: usize,
    mut align_data: Option<&mut AlignmentData>,
) -> Option<usize> {
    let word_size = WORD_SIZE as usize;
    let target_len = target.len();

    if k < target_len.abs_diff(query_len) {
        return None;
    }
    let k_cap = k.min(query_len.max(target_len)) as isize;
    let k = k_cap;

    let mut last_block: usize = 0;
    let mut blocks: Vec<Block> = vec![Block::fresh(0)];

    for (c, &tc) in target.iter().enumerate() {
        let col_base = tc * max_num_blocks;
        let mut hin: i8 = 1;
        for b in 0..=last_block {
            let eq = peq[col_base + b];
            let hout = blocks[b].advance(eq, hin);
            blocks[b].score += hout as isize;
            hin = hout;
        }
        let hout = hin;

        if last_block + 1 < max_num_blocks
            && should_grow_nw(last_block, blocks[last_block].score, k, word_size, target_len, query_len, c)
        {
            let next_eq = peq[col_base + last_block + 1];
            let mut next = Block::fresh(last_block + 1);
            let next_hout = next.advance(next_eq, hout);
            next.score = blocks[last_block].score - hout as isize
                + word_size as isize
                + next_hout as isize;
            last_block += 1;
            blocks.push(next);
            tracing::trace!(column = c, new_last_block = last_block, "band grew");
        }

        if let Some(data) = align_data.as_mut() {
            for (b, block) in blocks[0..=last_block].iter().enumerate() {
                let idx = c * max_num_blocks + b;
                data.ps[idx] = Some(block.p);
                data.ms[idx] = Some(block.m);
                data.scores[idx] = Some(block.score);
            }
            data.first_blocks[c] = Some(0);
            data.last_blocks[c] = Some(last_block);
        }
    }

    if last_block != max_num_blocks - 1 {
        return None;
    }
    let score = blocks[last_block].values()[padding];
    if score <= k {
        Some(score as usize)
    } else {
        None
    }
}
