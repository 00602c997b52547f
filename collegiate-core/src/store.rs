//! Read-only access to the loaded institution table.
//!
//! The `InstitutionStore` trait is the boundary between the matching logic
//! and however the dataset was loaded. Stores are built once, before any
//! query, and never mutated afterwards, so they can be shared across threads
//! without locking.

use geo::Coord;

use crate::{Candidate, ColumnStatistics, Institution, InvalidArgument, nearest};

/// Immutable snapshot of institutions and their column statistics.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use collegiate_core::{ColumnStatistics, Institution, InstitutionStore};
///
/// struct Snapshot {
///     institutions: Vec<Institution>,
///     statistics: ColumnStatistics,
/// }
///
/// impl InstitutionStore for Snapshot {
///     fn institutions(&self) -> &[Institution] {
///         &self.institutions
///     }
///
///     fn statistics(&self) -> &ColumnStatistics {
///         &self.statistics
///     }
/// }
///
/// let store = Snapshot {
///     institutions: vec![Institution::new("Only", "Town", "ST", Coord { x: 0.0, y: 0.0 })],
///     statistics: ColumnStatistics::default(),
/// };
/// let found = store.nearest(Coord { x: 1.0, y: 1.0 }, 10)?;
/// assert_eq!(found.len(), 1);
/// # Ok::<(), collegiate_core::InvalidArgument>(())
/// ```
pub trait InstitutionStore: Send + Sync {
    /// Every institution in table order.
    fn institutions(&self) -> &[Institution];

    /// Statistics computed over the whole table.
    fn statistics(&self) -> &ColumnStatistics;

    /// Number of institutions in the store.
    fn len(&self) -> usize {
        self.institutions().len()
    }

    /// Report whether the store is empty.
    fn is_empty(&self) -> bool {
        self.institutions().is_empty()
    }

    /// Return the `k` institutions nearest to `point`.
    ///
    /// See [`nearest`](crate::nearest) for the distance metric and
    /// tie-breaking rules.
    ///
    /// # Errors
    /// Propagates [`InvalidArgument`] for non-positive `k` or a non-finite
    /// point.
    fn nearest(&self, point: Coord<f64>, k: i64) -> Result<Vec<Candidate<'_>>, InvalidArgument> {
        nearest(self.institutions(), point, k)
    }
}
