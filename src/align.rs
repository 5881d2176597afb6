//! Symbol table construction and top-level alignment orchestration: mode
//! dispatch, k auto-expansion, and wiring the banded drivers together.

use std::collections::HashMap;

use crate::{
    cigar::EditOp,
    config::AlignConfig,
    equal::{build_equivalence_classes, EqualityPair},
    error::{AlignError, Result},
    mode::AlignMode,
    peq::build_peq_table,
    task::AlignTask,
    traceback,
};

/// Alias for a single bit-vector word.
pub type Word = u64;

/// Size of a word, in bits.
pub const WORD_SIZE: u32 = Word::BITS;

/// Word mask with only the top bit set: `100...0`.
pub const HIGH_BIT_MASK: Word = 1 << (WORD_SIZE - 1);

/// Result of an alignment run.
#[derive(Debug, Default)]
pub struct Alignment {
    /// Edit distance between target and query, if found within `k`.
    pub edit_distance: Option<usize>,
    /// Zero-based target positions where an optimal alignment ends.
    pub end_locations: Option<Vec<isize>>,
    /// Zero-based target positions where an optimal alignment starts,
    /// paired index-for-index with `end_locations`.
    pub start_locations: Option<Vec<isize>>,
    /// Edit script for the first `(start, end)` pair, if [`AlignTask::Path`]
    /// was requested.
    pub alignment: Option<Vec<EditOp>>,
    /// Number of distinct symbol classes across both sequences (after
    /// folding any `added_equalities`).
    pub alphabet_length: usize,
}

/// A query and target rewritten into symbol codes over a shared alphabet.
#[derive(Debug)]
pub struct TransformedSequences {
    /// Alphabet: `alphabet[code]` is one representative character of that
    /// code's equivalence class.
    pub alphabet: Vec<char>,
    /// Query, as symbol codes.
    pub query: Vec<usize>,
    /// Target, as symbol codes.
    pub target: Vec<usize>,
}

/// Build a shared symbol table for `query` and `target`, folding
/// `added_equalities` into shared codes via a union-find over characters
/// before codes are assigned. Errors if a pair names a character that
/// appears in neither sequence.
pub fn transform_sequences(
    query: &str,
    target: &str,
    added_equalities: &[EqualityPair],
) -> Result<TransformedSequences> {
    let mut chars_seen: Vec<char> = Vec::new();
    let mut seen_set: HashMap<char, ()> = HashMap::new();
    for c in query.chars().chain(target.chars()) {
        if seen_set.insert(c, ()).is_none() {
            chars_seen.push(c);
        }
    }

    for pair in added_equalities {
        if !seen_set.contains_key(&pair.first) {
            return Err(AlignError::UnknownEqualityChar(pair.first));
        }
        if !seen_set.contains_key(&pair.second) {
            return Err(AlignError::UnknownEqualityChar(pair.second));
        }
    }

    let mut classes = build_equivalence_classes(&chars_seen, added_equalities);
    let mut code_of_representative: HashMap<char, usize> = HashMap::new();
    let mut alphabet: Vec<char> = Vec::new();
    let mut code_of_char: HashMap<char, usize> = HashMap::new();

    for &c in &chars_seen {
        let rep = classes.representative(c);
        let code = *code_of_representative.entry(rep).or_insert_with(|| {
            alphabet.push(rep);
            alphabet.len() - 1
        });
        code_of_char.insert(c, code);
    }

    let encode = |s: &str| -> Vec<usize> {
        s.chars().map(|c| code_of_char[&c]).collect()
    };

    Ok(TransformedSequences {
        query: encode(query),
        target: encode(target),
        alphabet,
    })
}

/// A word's worth of DP column state, needed to reconstruct the edit script.
pub struct AlignmentData {
    /// Vertical-plus bit vector, per `(column, block)`.
    pub ps: Vec<Option<Word>>,
    /// Vertical-minus bit vector, per `(column, block)`.
    pub ms: Vec<Option<Word>>,
    /// Bottom-cell score, per `(column, block)`.
    pub scores: Vec<Option<isize>>,
    /// First active block index, per column (always `0` in this driver).
    pub first_blocks: Vec<Option<usize>>,
    /// Last active block index, per column.
    pub last_blocks: Vec<Option<usize>>,
}

impl AlignmentData {
    /// Allocate storage for `max_num_blocks` blocks across `target_len`
    /// columns.
    pub fn new(max_num_blocks: usize, target_len: usize) -> Self {
        AlignmentData {
            ps: vec![None; max_num_blocks * target_len],
            ms: vec![None; max_num_blocks * target_len],
            scores: vec![None; max_num_blocks * target_len],
            first_blocks: vec![None; target_len],
            last_blocks: vec![None; target_len],
        }
    }
}

fn word_size() -> usize {
    WORD_SIZE as usize
}

fn max_num_blocks_for(len: usize) -> usize {
    crate::ceil_div!(len.max(1), word_size())
}

impl Alignment {
    /// Align `query` against `target` under `config`, producing edit
    /// distance, locations, and (if requested) the edit script.
    ///
    /// ### Example
    /// ```
    /// use edlign::{align::Alignment, config::AlignConfig};
    ///
    /// let result = Alignment::run(AlignConfig::default(), "ACT", "CGT").unwrap();
    /// assert_eq!(result.edit_distance, Some(2));
    /// ```
    pub fn run(config: AlignConfig, query: impl AsRef<str>, target: impl AsRef<str>) -> Result<Self> {
        let (query, target) = (query.as_ref(), target.as_ref());
        let mut alignment = Alignment::default();

        let transformed = transform_sequences(query, target, &config.added_equalities)?;
        alignment.alphabet_length = transformed.alphabet.len();
        let (q, t) = (&transformed.query, &transformed.target);

        if q.is_empty() || t.is_empty() {
            match config.mode {
                AlignMode::NW => {
                    alignment.edit_distance = Some(q.len().max(t.len()));
                    alignment.end_locations = Some(vec![t.len() as isize - 1]);
                }
                AlignMode::SHW | AlignMode::HW => {
                    alignment.edit_distance = Some(q.len());
                    alignment.end_locations = Some(vec![-1]);
                }
            }
            if matches!(config.task, AlignTask::Loc | AlignTask::Path) {
                alignment.start_locations = alignment.end_locations.clone().map(|locs| {
                    locs.iter().map(|_| 0).collect()
                });
            }
            return Ok(alignment);
        }

        let max_num_blocks = max_num_blocks_for(q.len());
        let padding = max_num_blocks * word_size() - q.len();
        let peq = build_peq_table(transformed.alphabet.len(), q);

        let mut dynamic_k = false;
        let mut k = config.k.unwrap_or_else(|| {
            dynamic_k = true;
            word_size()
        });

        loop {
            tracing::debug!(k, mode = ?config.mode, "alignment attempt");
            match config.mode {
                AlignMode::NW => {
                    let dist = crate::dst::calc_edit_dst_nw(&peq, padding, max_num_blocks, q.len(), t, k, None);
                    alignment.edit_distance = dist;
                    if dist.is_some() {
                        alignment.end_locations = Some(vec![t.len() as isize - 1]);
                    }
                }
                AlignMode::SHW | AlignMode::HW => {
                    let result = crate::dst::calc_edit_dst_semi_global(
                        &peq,
                        padding,
                        max_num_blocks,
                        q.len(),
                        t,
                        k,
                        config.mode,
                    );
                    alignment.edit_distance = result.edit_distance;
                    if result.edit_distance.is_some() {
                        alignment.end_locations = Some(result.end_locations);
                    }
                }
            }

            if !dynamic_k || alignment.edit_distance.is_some() || k > q.len().max(t.len()) {
                break;
            }
            k *= 2;
            tracing::trace!(next_k = k, "k doubled, retrying");
        }

        if alignment.edit_distance.is_none() {
            return Ok(alignment);
        }

        if matches!(config.task, AlignTask::Loc | AlignTask::Path) {
            let distance = alignment.edit_distance.unwrap();
            let end_locations = alignment.end_locations.clone().unwrap_or_default();
            let start_locations = if config.mode == AlignMode::HW {
                end_locations
                    .iter()
                    .map(|&loc| {
                        if loc < 0 {
                            0
                        } else {
                            hw_start_location(q, t, transformed.alphabet.len(), loc, distance)
                        }
                    })
                    .collect()
            } else {
                end_locations.iter().map(|_| 0).collect()
            };
            alignment.start_locations = Some(start_locations);
        }

        if config.task == AlignTask::Path {
            let start = alignment
                .start_locations
                .as_ref()
                .and_then(|locs| locs.first().copied())
                .ok_or(AlignError::NoPath("no start location available"))?;
            let end = alignment
                .end_locations
                .as_ref()
                .and_then(|locs| locs.first().copied())
                .ok_or(AlignError::NoPath("no end location available"))?;
            if start < 0 || end < start {
                return Err(AlignError::NoPath("start/end locations out of range"));
            }
            let window = &t[start as usize..=end as usize];

            let window_blocks = max_num_blocks;
            let window_padding = padding;
            let mut data = AlignmentData::new(window_blocks, window.len());
            crate::dst::calc_edit_dst_nw(
                &peq,
                window_padding,
                window_blocks,
                q.len(),
                window,
                q.len().max(window.len()),
                Some(&mut data),
            );
            alignment.alignment = Some(traceback::traceback(q, window, &data, window_blocks));
        }

        Ok(alignment)
    }
}

/// Recover the start of an HW (infix) alignment by re-running a bounded SHW
/// search on the reversed query against the reversed target prefix ending at
/// `end_loc`. Among all reverse end-points achieving `distance`, the
/// rightmost (closest to `end_loc`) is used, so the alignment prefers
/// mismatches over leading insertions when both are equally cheap.
fn hw_start_location(
    query: &[usize],
    target: &[usize],
    alphabet_size: usize,
    end_loc: isize,
    distance: usize,
) -> isize {
    let rev_query: Vec<usize> = query.iter().rev().copied().collect();
    let rev_target_prefix: Vec<usize> = target[..=end_loc as usize].iter().rev().copied().collect();

    let max_num_blocks = max_num_blocks_for(rev_query.len());
    let padding = max_num_blocks * word_size() - rev_query.len();
    let rev_peq = build_peq_table(alphabet_size, &rev_query);

    let result = crate::dst::calc_edit_dst_semi_global(
        &rev_peq,
        padding,
        max_num_blocks,
        rev_query.len(),
        &rev_target_prefix,
        distance,
        AlignMode::SHW,
    );

    match result.end_locations.last() {
        Some(&rev_last) => end_loc - rev_last,
        None => 0,
    }
}

/// Render a two-line side-by-side view of an alignment, target on top, query
/// on the bottom, with `|`/`.`/` ` markers for match/mismatch/gap.
pub fn format_alignment(
    query: &str,
    target: &str,
    ops: &[EditOp],
    query_start: usize,
    target_start: usize,
) -> String {
    let query_chars: Vec<char> = query.chars().collect();
    let target_chars: Vec<char> = target.chars().collect();

    let mut top = String::new();
    let mut mid = String::new();
    let mut bottom = String::new();
    let (mut qi, mut ti) = (query_start, target_start);

    for op in ops {
        match op {
            EditOp::Match => {
                top.push(target_chars[ti]);
                mid.push('|');
                bottom.push(query_chars[qi]);
                qi += 1;
                ti += 1;
            }
            EditOp::Mismatch => {
                top.push(target_chars[ti]);
                mid.push('.');
                bottom.push(query_chars[qi]);
                qi += 1;
                ti += 1;
            }
            EditOp::Insert => {
                top.push(target_chars[ti]);
                mid.push(' ');
                bottom.push('-');
                ti += 1;
            }
            EditOp::Delete => {
                top.push('-');
                mid.push(' ');
                bottom.push(query_chars[qi]);
                qi += 1;
            }
        }
    }

    format!("{top}\n{mid}\n{bottom}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_sequences_builds_shared_alphabet() {
        let transformed = transform_sequences("ACT", "CGT", &[]).unwrap();
        assert_eq!(transformed.alphabet, vec!['A', 'C', 'T', 'G']);
        assert_eq!(transformed.query, vec![0, 1, 2]);
        assert_eq!(transformed.target, vec![1, 3, 2]);
    }

    #[test]
    fn transform_sequences_folds_added_equalities() {
        let pairs = [EqualityPair::new('A', 'T')];
        let transformed = transform_sequences("A", "T", &pairs).unwrap();
        assert_eq!(transformed.query, transformed.target);
    }

    #[test]
    fn unknown_equality_char_is_an_error() {
        let pairs = [EqualityPair::new('A', 'Z')];
        let err = transform_sequences("ACT", "CGT", &pairs).unwrap_err();
        assert_eq!(err, AlignError::UnknownEqualityChar('Z'));
    }
}
