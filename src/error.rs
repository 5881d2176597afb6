//! Error types for the alignment core.

use thiserror::Error;

/// Errors the core can return.
///
/// "Best score exceeds k" is deliberately *not* a variant here: per the
/// external interface it is reported as `edit_distance = None`, not as a
/// `Result::Err`. These variants are reserved for genuine misuse or
/// malformed input to an API, not for exhausted search budgets.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlignError {
    /// A character used in `added_equalities` does not appear in either
    /// sequence's alphabet.
    #[error("character '{0}' in added_equalities is not part of the alphabet")]
    UnknownEqualityChar(char),

    /// `toCigar`/`parse_cigar` was given a move code or CIGAR letter it does
    /// not recognize.
    #[error("invalid move code {0} in edit script")]
    InvalidMoveCode(u8),

    /// `to_cigar` was given an unparseable CIGAR string.
    #[error("malformed CIGAR string at byte offset {0}")]
    MalformedCigar(usize),

    /// Path reconstruction was requested for a result that has no alignment
    /// (`edit_distance` is `None`, or `task != Path`).
    #[error("no alignment path available: {0}")]
    NoPath(&'static str),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AlignError>;
