use crate::{
    align::{Word, WORD_SIZE},
    ceil_div,
};

/// Build the Peq (query profile) table for a transformed query.
///
/// Peq is a table of dimensions `(alphabet_size + 1) x max_num_blocks`: row
/// `s` holds, per block, a bitmask where bit `i` is `1` iff the query symbol
/// `W*block + i` rows from the top of the block equals symbol `s`. Row
/// `alphabet_size` is the wildcard row (all bits set), used by
/// [`equal`](crate::equal) characters that want to match anything.
///
/// Query positions at or past `query.len()` (padding, needed to fill out the
/// last block to a full word) are treated as matching every real symbol, so
/// the padding never introduces a spurious mismatch.
pub fn build_peq_table(alphabet_size: usize, query: &[usize]) -> Vec<Word> {
    let word_size = WORD_SIZE as usize;
    let max_num_blocks = ceil_div!(query.len().max(1), word_size);
    let mut peq = vec![0 as Word; (alphabet_size + 1) * max_num_blocks];

    for symbol in 0..alphabet_size {
        for block in 0..max_num_blocks {
            let mut bits: Word = 0;
            let block_start = block * word_size;
            for r in (block_start..block_start + word_size).rev() {
                bits <<= 1;
                if r >= query.len() || query[r] == symbol {
                    bits |= 1;
                }
            }
            peq[symbol * max_num_blocks + block] = bits;
        }
    }
    // Wildcard row: matches everything, everywhere.
    for block in 0..max_num_blocks {
        peq[alphabet_size * max_num_blocks + block] = Word::MAX;
    }

    peq
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::transform_sequences;

    #[test]
    fn build_peq_table_matches_known_values() {
        // Kept to one block (8 symbols, well under WORD_SIZE) so the expected
        // bit patterns below can be hand-verified directly against the
        // `r >= query.len() || query[r] == symbol` rule in
        // `build_peq_table`, rather than against a multi-block layout.
        let query = "AGGATACA";
        let transformed = transform_sequences(query, query, &[]).unwrap();
        assert_eq!(transformed.alphabet, vec!['A', 'G', 'T', 'C']);
        assert_eq!(transformed.query, vec![0, 1, 1, 0, 2, 0, 3, 0]);

        let table = build_peq_table(transformed.alphabet.len(), &transformed.query);

        // Row layout: one block per symbol (A, G, T, C), then the wildcard
        // row. Within a block, bit `i` is set iff `query[i] == symbol` or
        // `i >= query.len()` (here, `i >= 8`), so every row's top 56 bits
        // (padding) are all set, and the low byte encodes the 8 real rows.
        assert_eq!(
            table,
            [
                18446744073709551529, // A: low byte 0b1010_1001 (positions 0,3,5,7)
                18446744073709551366, // G: low byte 0b0000_0110 (positions 1,2)
                18446744073709551376, // T: low byte 0b0001_0000 (position 4)
                18446744073709551424, // C: low byte 0b0100_0000 (position 6)
                18446744073709551615, // wildcard: all bits set
            ]
        )
    }

    #[test]
    fn padding_rows_match_every_real_symbol() {
        // Query shorter than one block: rows past query.len() are padding.
        let transformed = transform_sequences("AC", "AC", &[]).unwrap();
        let table = build_peq_table(transformed.alphabet.len(), &transformed.query);
        let word_size = WORD_SIZE as usize;
        // Every symbol's single block should have all bits above position 2 set.
        for symbol in 0..transformed.alphabet.len() {
            let bits = table[symbol];
            for r in 2..word_size {
                assert_eq!((bits >> r) & 1, 1, "row {r} should be padding-matched");
            }
        }
    }
}
