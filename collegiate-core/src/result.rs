//! Ranked output of the match engine.

use crate::Institution;

/// One institution in a ranked result with its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedEntry<'a> {
    /// The ranked institution.
    pub institution: &'a Institution,
    /// Similarity (or positional) score.
    pub score: f64,
    /// Planar distance from the query point in degrees.
    pub distance: f64,
}

/// Institutions ordered best first.
///
/// Entries borrow from the store the query ran against.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RankedResult<'a> {
    entries: Vec<RankedEntry<'a>>,
}

impl<'a> RankedResult<'a> {
    /// Wrap entries that are already in ranked order.
    pub const fn new(entries: Vec<RankedEntry<'a>>) -> Self {
        Self { entries }
    }

    /// Ranked entries, best first.
    pub fn entries(&self) -> &[RankedEntry<'a>] {
        &self.entries
    }

    /// Institution names in ranked order.
    pub fn names(&self) -> Vec<&'a str> {
        self.entries
            .iter()
            .map(|entry| entry.institution.name.as_str())
            .collect()
    }

    /// Scores in ranked order.
    pub fn scores(&self) -> Vec<f64> {
        self.entries.iter().map(|entry| entry.score).collect()
    }

    /// Number of ranked institutions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Report whether the result is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the result and return its entries.
    pub fn into_entries(self) -> Vec<RankedEntry<'a>> {
        self.entries
    }
}

impl<'a> IntoIterator for RankedResult<'a> {
    type Item = RankedEntry<'a>;
    type IntoIter = std::vec::IntoIter<RankedEntry<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
