//! How much of an alignment result to compute.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlignTask {
    #[default]
    /// Edit distance and end locations only.
    Distance,
    /// Edit distance, end locations, and start locations.
    Loc,
    /// Edit distance, locations, and the edit script itself.
    Path,
}
