//! CIGAR encoding/decoding.
//!
//! See <http://samtools.github.io/hts-specs/SAMv1.pdf> and
//! <http://drive5.com/usearch/manual/cigar.html>.

use crate::error::{AlignError, Result};

/// Which letters `to_cigar`/`parse_cigar` use for each edit kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CigarFormat {
    /// Match: `M`, Mismatch: `M`, Insertion: `I`, Deletion: `D`.
    /// Standard CIGAR cannot distinguish a match from a mismatch.
    Standard,
    /// Match: `=`, Mismatch: `X`, Insertion: `I`, Deletion: `D`.
    Extended,
}

/// One edit operation in an alignment path, query-to-target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    /// Characters are equal.
    Match,
    /// Insertion to target = deletion from query.
    ///
    /// ### Example
    /// * Target: `ATCG`
    /// * Query:  `A-CG`
    Insert,
    /// Deletion from target = insertion to query.
    ///
    /// ### Example
    /// * Target: `A-CG`
    /// * Query:  `ATCG`
    Delete,
    /// Characters differ.
    Mismatch,
}

impl EditOp {
    fn letter(self, format: CigarFormat) -> char {
        match (self, format) {
            (EditOp::Match, CigarFormat::Standard) => 'M',
            (EditOp::Mismatch, CigarFormat::Standard) => 'M',
            (EditOp::Match, CigarFormat::Extended) => '=',
            (EditOp::Mismatch, CigarFormat::Extended) => 'X',
            (EditOp::Insert, _) => 'I',
            (EditOp::Delete, _) => 'D',
        }
    }

    fn from_letter(c: char, format: CigarFormat) -> Result<Self> {
        match (c, format) {
            ('M', CigarFormat::Standard) => Ok(EditOp::Match),
            ('=', CigarFormat::Extended) => Ok(EditOp::Match),
            ('X', CigarFormat::Extended) => Ok(EditOp::Mismatch),
            ('I', _) => Ok(EditOp::Insert),
            ('D', _) => Ok(EditOp::Delete),
            _ => Err(AlignError::InvalidMoveCode(c as u8)),
        }
    }
}

/// Run-length encode an edit script into a CIGAR string.
///
/// Consecutive identical operations (e.g. a `Match` run) are collapsed into a
/// single `<length><letter>` field; field order follows `ops` exactly.
pub fn to_cigar(ops: &[EditOp], format: CigarFormat) -> String {
    let mut out = String::new();
    let mut iter = ops.iter().peekable();
    while let Some(&op) = iter.next() {
        let mut run = 1usize;
        while iter.peek() == Some(&&op) {
            iter.next();
            run += 1;
        }
        out.push_str(&run.to_string());
        out.push(op.letter(format));
    }
    out
}

/// Parse a CIGAR string back into an edit script.
///
/// Each `<length><letter>` field expands into `length` copies of the
/// corresponding [`EditOp`]. Standard-format `M` fields always decode to
/// [`EditOp::Match`], since standard CIGAR has no way to mark a mismatch.
pub fn parse_cigar(cigar: &str, format: CigarFormat) -> Result<Vec<EditOp>> {
    let mut ops = Vec::new();
    let mut chars = cigar.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if !c.is_ascii_digit() {
            return Err(AlignError::MalformedCigar(start));
        }
        let mut end = start;
        while let Some(&(i, c)) = chars.peek() {
            if c.is_ascii_digit() {
                end = i + c.len_utf8();
                chars.next();
            } else {
                break;
            }
        }
        let run: usize = cigar[start..end]
            .parse()
            .map_err(|_| AlignError::MalformedCigar(start))?;
        let (_, letter) = chars.next().ok_or(AlignError::MalformedCigar(end))?;
        let op = EditOp::from_letter(letter, format)?;
        ops.extend(std::iter::repeat(op).take(run));
    }

    Ok(ops)
}
