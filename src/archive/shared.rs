//! Mutex-guarded archive for concurrent producers.

use super::bounded::BoundedArchive;
use super::strategy::DiversityStrategy;
use crate::dominance::DominanceComparator;
use crate::solution::Solution;
use crate::Result;
use parking_lot::Mutex;

/// A [`BoundedArchive`] that can be shared between threads.
///
/// Every insertion runs under one lock, so the dominance check, removals,
/// insertion, eviction and grid updates of one `add` are never interleaved
/// with another.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use u_pareto::{BoundedArchive, SharedArchive, Solution};
///
/// let archive = Arc::new(SharedArchive::new(BoundedArchive::crowding(10).unwrap()));
/// let handles: Vec<_> = (0..4)
///     .map(|t| {
///         let archive = Arc::clone(&archive);
///         std::thread::spawn(move || {
///             let x = t as f64;
///             archive.add(Solution::from_objectives(vec![x, 3.0 - x])).unwrap();
///         })
///     })
///     .collect();
/// for h in handles {
///     h.join().unwrap();
/// }
/// assert_eq!(archive.len(), 4);
/// ```
#[derive(Debug)]
pub struct SharedArchive<V, D, C> {
    inner: Mutex<BoundedArchive<V, D, C>>,
}

impl<V, D, C> SharedArchive<V, D, C>
where
    D: DiversityStrategy,
    C: DominanceComparator,
{
    /// Wraps `archive`.
    pub fn new(archive: BoundedArchive<V, D, C>) -> Self {
        Self {
            inner: Mutex::new(archive),
        }
    }

    /// Offers `solution` to the archive. See [`BoundedArchive::add`].
    pub fn add(&self, solution: Solution<V>) -> Result<bool> {
        self.inner.lock().add(solution)
    }

    /// Offers every solution in order, returning how many were kept.
    ///
    /// The lock is held for the whole batch.
    pub fn extend<I>(&self, solutions: I) -> Result<usize>
    where
        I: IntoIterator<Item = Solution<V>>,
    {
        let mut archive = self.inner.lock();
        let mut kept = 0;
        for solution in solutions {
            if archive.add(solution)? {
                kept += 1;
            }
        }
        Ok(kept)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether the archive has no members.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Runs `f` with exclusive access to the archive.
    pub fn with_archive<R>(&self, f: impl FnOnce(&mut BoundedArchive<V, D, C>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Clones the current members.
    pub fn snapshot(&self) -> Vec<Solution<V>>
    where
        V: Clone,
    {
        self.inner.lock().as_slice().to_vec()
    }

    /// Unwraps the archive.
    pub fn into_inner(self) -> BoundedArchive<V, D, C> {
        self.inner.into_inner()
    }
}
