//! How gaps before and after the query are treated.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlignMode {
    #[default]
    /// Global alignment (Needleman-Wunsch).
    /// Useful for finding out how similar the whole query is to the whole target.
    NW,
    /// Prefix alignment (semi-global, "SHW").
    ///
    /// Does not penalize gaps at the end of the target: trailing target
    /// characters past the end of the query cost nothing.
    ///
    /// ### Example
    /// `ACT` against `ACTGGC`: edit distance 0, because `GGC` at the end of
    /// the target is free to drop.
    SHW,
    /// Infix alignment ("HW").
    ///
    /// Neither leading nor trailing target characters are penalized, so the
    /// query is free to match anywhere inside the target.
    ///
    /// ### Example
    /// `ACT` against `CGACTGAC`: edit distance 0, because `CG` at the start
    /// and `GAC` at the end of the target are both free to drop. This is the
    /// mode used for aligning a short read against a longer reference.
    HW,
}
