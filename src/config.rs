use crate::{equal::EqualityPair, mode::AlignMode, task::AlignTask};

/// Alignment configuration.
#[derive(Debug, Clone, Default)]
pub struct AlignConfig {
    /// Threshold on the number of differences between target and query.
    ///
    /// * `Some(k)`: search is bounded to edit distance `<= k`. If the true
    ///   edit distance exceeds `k`, `Alignment::edit_distance` is `None`.
    ///   Smaller `k` means faster search.
    /// * `None`: `k` auto-expands (doubling from the word size) until a
    ///   score is found.
    pub k: Option<usize>,
    /// Alignment method, see [`AlignMode`].
    pub mode: AlignMode,
    /// How much of the result to compute, see [`AlignTask`].
    pub task: AlignTask,
    /// Pairs of characters to additionally treat as equal, on top of literal
    /// equality. Folded into shared symbol codes before alignment runs.
    pub added_equalities: Vec<EqualityPair>,
}

impl AlignConfig {
    /// Config for computing only the edit distance, in the given mode.
    pub fn distance(mode: AlignMode) -> Self {
        AlignConfig {
            mode,
            task: AlignTask::Distance,
            ..Default::default()
        }
    }

    /// Config for computing the full edit script, in the given mode.
    pub fn path(mode: AlignMode) -> Self {
        AlignConfig {
            mode,
            task: AlignTask::Path,
            ..Default::default()
        }
    }

    /// Builder-style setter for `k`.
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = Some(k);
        self
    }

    /// Builder-style setter for `added_equalities`.
    pub fn with_equalities(mut self, pairs: Vec<EqualityPair>) -> Self {
        self.added_equalities = pairs;
        self
    }
}
