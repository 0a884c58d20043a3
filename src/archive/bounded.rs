//! Capacity-limited archive of mutually non-dominated solutions.

use super::config::ArchiveConfig;
use super::strategy::{CrowdingDiversity, DiversityStrategy, GridDiversity};
use crate::dominance::{DominanceComparator, ParetoDominance};
use crate::solution::{check_finite, Solution};
use crate::{ParetoError, Result};
use rand::Rng;
use std::cmp::Ordering;
use tracing::{debug, trace};

/// A bounded archive of the best non-dominated solutions found so far.
///
/// Members are mutually non-dominated under the archive's comparator and
/// never exceed the capacity. Diversity bookkeeping and eviction are
/// delegated to a [`DiversityStrategy`].
///
/// The archive is not internally synchronized; wrap it in a
/// [`SharedArchive`](super::SharedArchive) when several producers insert
/// concurrently.
///
/// # Example
///
/// ```
/// use u_pareto::{BoundedArchive, Solution};
///
/// let mut archive = BoundedArchive::crowding(1).unwrap();
/// assert!(archive.add(Solution::from_objectives(vec![1.0, 1.0])).unwrap());
/// assert!(archive.add(Solution::from_objectives(vec![0.0, 0.0])).unwrap());
///
/// assert_eq!(archive.len(), 1);
/// assert_eq!(archive.get(0).unwrap().objectives, vec![0.0, 0.0]);
/// ```
#[derive(Debug, Clone)]
pub struct BoundedArchive<V, D, C = ParetoDominance> {
    members: Vec<Solution<V>>,
    capacity: usize,
    strategy: D,
    comparator: C,
}

impl<V> BoundedArchive<V, CrowdingDiversity, ParetoDominance> {
    /// Archive that evicts the member with the smallest crowding distance.
    pub fn crowding(capacity: usize) -> Result<Self> {
        Self::with_strategy(capacity, CrowdingDiversity, ParetoDominance)
    }
}

impl<V> BoundedArchive<V, GridDiversity, ParetoDominance> {
    /// Archive that evicts from crowded hypercubes of an adaptive grid.
    pub fn grid(config: &ArchiveConfig, num_objectives: usize) -> Result<Self> {
        let strategy = GridDiversity::from_config(config, num_objectives)?;
        Self::with_strategy(config.capacity, strategy, ParetoDominance)
    }
}

impl<V, C> BoundedArchive<V, GridDiversity, C> {
    /// Picks a member from a sparse grid region, for parent or leader
    /// selection. See [`GridDiversity::select_sparse`].
    pub fn select_sparse<R: Rng>(&self, rng: &mut R) -> Option<&Solution<V>> {
        self.strategy.select_sparse(&self.members, rng)
    }
}

impl<V, D, C> BoundedArchive<V, D, C>
where
    D: DiversityStrategy,
    C: DominanceComparator,
{
    /// Creates an empty archive with an explicit strategy and comparator.
    ///
    /// # Errors
    ///
    /// [`ParetoError::InvalidCapacity`] if `capacity` is zero.
    pub fn with_strategy(capacity: usize, strategy: D, comparator: C) -> Result<Self> {
        if capacity == 0 {
            return Err(ParetoError::InvalidCapacity(capacity));
        }
        Ok(Self {
            members: Vec::with_capacity(capacity + 1),
            capacity,
            strategy,
            comparator,
        })
    }

    /// Offers `solution` to the archive.
    ///
    /// 1. If a member dominates `solution`, it is rejected (`Ok(false)`).
    /// 2. Members dominated by `solution` are removed.
    /// 3. `solution` is inserted.
    /// 4. If the archive is now over capacity, the strategy evicts exactly
    ///    one member, which may be `solution` itself.
    ///
    /// Returns `Ok(true)` whenever step 3 was reached.
    ///
    /// # Errors
    ///
    /// The candidate is validated before the archive changes:
    /// [`ParetoError::InvalidObjectiveCount`] for no objectives,
    /// [`ParetoError::ObjectiveCountMismatch`] if it disagrees with the
    /// members or the strategy on objective count, and
    /// [`ParetoError::NonFiniteObjective`] for NaN or infinite values.
    /// Grid and capacity invariant violations are reported as the
    /// corresponding error variants.
    pub fn add(&mut self, solution: Solution<V>) -> Result<bool> {
        self.validate_candidate(&solution)?;

        if self
            .members
            .iter()
            .any(|m| self.comparator.compare(m, &solution) == Ordering::Less)
        {
            trace!(objectives = ?solution.objectives, "candidate dominated, rejected");
            return Ok(false);
        }

        let mut i = 0;
        while i < self.members.len() {
            if self.comparator.compare(&solution, &self.members[i]) == Ordering::Less {
                let removed = self.members.remove(i);
                self.strategy.on_remove(&mut self.members, &removed)?;
            } else {
                i += 1;
            }
        }

        self.members.push(solution);
        let index = self.members.len() - 1;
        if let Err(err) = self.strategy.on_insert(&mut self.members, index) {
            self.members.pop();
            return Err(err);
        }

        if self.members.len() > self.capacity {
            let victim = self.strategy.select_victim(&mut self.members)?;
            let evicted = self.members.remove(victim);
            self.strategy.on_remove(&mut self.members, &evicted)?;
            debug!(
                victim,
                objectives = ?evicted.objectives,
                size = self.members.len(),
                "archive over capacity, evicted member"
            );
        }

        if self.members.len() > self.capacity {
            return Err(ParetoError::CapacityExceeded {
                size: self.members.len(),
                capacity: self.capacity,
            });
        }
        Ok(true)
    }

    fn validate_candidate(&self, solution: &Solution<V>) -> Result<()> {
        if solution.num_objectives() == 0 {
            return Err(ParetoError::InvalidObjectiveCount);
        }
        if let Some(first) = self.members.first() {
            if first.num_objectives() != solution.num_objectives() {
                return Err(ParetoError::ObjectiveCountMismatch {
                    expected: first.num_objectives(),
                    actual: solution.num_objectives(),
                });
            }
        }
        check_finite(&solution.objectives)?;
        self.strategy.check(solution)
    }

    /// Removes every member and resets the strategy's bookkeeping.
    pub fn clear(&mut self) {
        self.members.clear();
        self.strategy.on_clear();
    }
}

impl<V, D, C> BoundedArchive<V, D, C> {
    /// Member at `index`.
    pub fn get(&self, index: usize) -> Option<&Solution<V>> {
        self.members.get(index)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Number of members. Alias of [`len`](Self::len).
    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// Whether the archive has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Maximum number of members.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates over the members.
    pub fn iter(&self) -> std::slice::Iter<'_, Solution<V>> {
        self.members.iter()
    }

    /// Members as a slice.
    pub fn as_slice(&self) -> &[Solution<V>] {
        &self.members
    }

    /// Consumes the archive, returning its members.
    pub fn into_vec(self) -> Vec<Solution<V>> {
        self.members
    }

    /// The diversity strategy.
    pub fn strategy(&self) -> &D {
        &self.strategy
    }

    /// The dominance comparator.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }
}

impl<'a, V, D, C> IntoIterator for &'a BoundedArchive<V, D, C> {
    type Item = &'a Solution<V>;
    type IntoIter = std::slice::Iter<'a, Solution<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}
