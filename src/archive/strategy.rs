//! Diversity strategies for bounded archives.
//!
//! A strategy keeps its density bookkeeping in step with the archive's
//! members and chooses which member to evict when the archive overflows.

use super::config::{ArchiveConfig, GridPrune};
use crate::crowding::{assign_crowding_distance, least_crowded_index};
use crate::grid::AdaptiveGrid;
use crate::solution::Solution;
use crate::{ParetoError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

/// Density bookkeeping and eviction policy of a bounded archive.
///
/// The archive calls the hooks in this order during one insertion:
/// [`on_remove`](DiversityStrategy::on_remove) for every member the
/// newcomer dominates, [`on_insert`](DiversityStrategy::on_insert) for
/// the newcomer, and, if over capacity,
/// [`select_victim`](DiversityStrategy::select_victim) followed by
/// `on_remove` for the evicted member.
pub trait DiversityStrategy {
    /// Rejects a candidate the strategy cannot track. Called before the
    /// archive changes.
    fn check<V>(&self, _candidate: &Solution<V>) -> Result<()> {
        Ok(())
    }

    /// Called after `members[index]` joined the archive.
    fn on_insert<V>(&mut self, members: &mut [Solution<V>], index: usize) -> Result<()>;

    /// Called after `removed` left the archive; `members` is what remains.
    fn on_remove<V>(&mut self, members: &mut [Solution<V>], removed: &Solution<V>) -> Result<()>;

    /// Index of the member to evict from a full archive.
    fn select_victim<V>(&mut self, members: &mut [Solution<V>]) -> Result<usize>;

    /// Called after every member was dropped at once.
    fn on_clear(&mut self) {}
}

/// Evicts the member with the smallest crowding distance.
///
/// Distances are recomputed over the whole archive, treated as a single
/// front, whenever membership changes. Ties go to the earliest member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrowdingDiversity;

impl DiversityStrategy for CrowdingDiversity {
    fn on_insert<V>(&mut self, members: &mut [Solution<V>], _index: usize) -> Result<()> {
        assign_crowding_distance(members);
        Ok(())
    }

    fn on_remove<V>(&mut self, members: &mut [Solution<V>], _removed: &Solution<V>) -> Result<()> {
        assign_crowding_distance(members);
        Ok(())
    }

    fn select_victim<V>(&mut self, members: &mut [Solution<V>]) -> Result<usize> {
        let distances: Vec<f64> = members
            .iter()
            .map(|s| s.crowding_distance.unwrap_or(f64::INFINITY))
            .collect();
        least_crowded_index(&distances).ok_or(ParetoError::EmptyCollection)
    }
}

/// Evicts from crowded hypercubes of an [`AdaptiveGrid`].
///
/// Grid bounds track the exact extremes of the archive: inserting a point
/// outside them, or removing a point that lies on one, rebuilds the grid.
/// Every other change only adjusts a single cell count.
#[derive(Debug, Clone)]
pub struct GridDiversity {
    grid: AdaptiveGrid,
    prune: GridPrune,
    rng: StdRng,
}

impl GridDiversity {
    /// Creates a grid strategy for `num_objectives` objectives.
    pub fn new(
        bisections: usize,
        num_objectives: usize,
        prune: GridPrune,
        seed: Option<u64>,
    ) -> Result<Self> {
        Ok(Self {
            grid: AdaptiveGrid::new(bisections, num_objectives)?,
            prune,
            rng: StdRng::seed_from_u64(seed.unwrap_or_else(rand::random)),
        })
    }

    /// Creates a grid strategy from an archive configuration.
    pub fn from_config(config: &ArchiveConfig, num_objectives: usize) -> Result<Self> {
        config.validate()?;
        Self::new(
            config.bisections,
            num_objectives,
            config.grid_prune,
            config.seed,
        )
    }

    /// The underlying grid.
    pub fn grid(&self) -> &AdaptiveGrid {
        &self.grid
    }

    /// The pruning policy.
    pub fn prune(&self) -> GridPrune {
        self.prune
    }

    /// Picks a member from a sparse region.
    ///
    /// The cell is drawn with [`AdaptiveGrid::roulette_wheel_selection`],
    /// then one of its members uniformly. Returns `None` for an empty
    /// archive.
    pub fn select_sparse<'a, V, R: Rng>(
        &self,
        members: &'a [Solution<V>],
        rng: &mut R,
    ) -> Option<&'a Solution<V>> {
        let cell = self.grid.roulette_wheel_selection(rng)?;
        let in_cell: Vec<&Solution<V>> = members
            .iter()
            .filter(|s| s.grid_cell == Some(cell))
            .collect();
        if in_cell.is_empty() {
            return None;
        }
        Some(in_cell[rng.random_range(0..in_cell.len())])
    }
}

impl DiversityStrategy for GridDiversity {
    fn check<V>(&self, candidate: &Solution<V>) -> Result<()> {
        if candidate.num_objectives() != self.grid.num_objectives() {
            return Err(ParetoError::ObjectiveCountMismatch {
                expected: self.grid.num_objectives(),
                actual: candidate.num_objectives(),
            });
        }
        Ok(())
    }

    fn on_insert<V>(&mut self, members: &mut [Solution<V>], index: usize) -> Result<()> {
        if !self.grid.is_within_limits(&members[index].objectives) {
            trace!("newcomer outside grid limits");
            return self.grid.rebuild(members);
        }
        let cell = self.grid.location(&members[index])?;
        members[index].grid_cell = Some(cell);
        self.grid.add_solution(cell)
    }

    fn on_remove<V>(&mut self, members: &mut [Solution<V>], removed: &Solution<V>) -> Result<()> {
        match removed.grid_cell {
            Some(cell) if !self.grid.is_extreme(&removed.objectives) => {
                self.grid.remove_solution(cell)
            }
            _ => {
                if members.is_empty() {
                    self.grid.clear();
                    Ok(())
                } else {
                    self.grid.rebuild(members)
                }
            }
        }
    }

    fn select_victim<V>(&mut self, members: &mut [Solution<V>]) -> Result<usize> {
        let cell = match self.prune {
            GridPrune::MostPopulated => self.grid.most_populated_hypercube(),
            GridPrune::Roulette => self.grid.roulette_wheel_prune(&mut self.rng),
        }
        .ok_or(ParetoError::EmptyCollection)?;

        members
            .iter()
            .position(|s| s.grid_cell == Some(cell))
            .ok_or(ParetoError::UntrackedCell { cell })
    }

    fn on_clear(&mut self) {
        self.grid.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sols(points: &[&[f64]]) -> Vec<Solution<()>> {
        points
            .iter()
            .map(|p| Solution::from_objectives(p.to_vec()))
            .collect()
    }

    #[test]
    fn test_crowding_victim_is_least_isolated() {
        let mut members = sols(&[&[0.0, 4.0], &[1.0, 3.0], &[1.1, 2.9], &[4.0, 0.0]]);
        let mut strategy = CrowdingDiversity;
        strategy.on_insert(&mut members, 3).unwrap();
        let victim = strategy.select_victim(&mut members).unwrap();
        assert!(victim == 1 || victim == 2);
        assert!(members[0].crowding_distance.unwrap().is_infinite());
    }

    #[test]
    fn test_grid_check_objective_count() {
        let strategy = GridDiversity::new(2, 2, GridPrune::MostPopulated, Some(1)).unwrap();
        assert!(strategy.check(&Solution::from_objectives(vec![1.0, 2.0])).is_ok());
        assert_eq!(
            strategy.check(&Solution::from_objectives(vec![1.0, 2.0, 3.0])),
            Err(ParetoError::ObjectiveCountMismatch {
                expected: 2,
                actual: 3
            })
        );
        assert!(CrowdingDiversity
            .check(&Solution::from_objectives(vec![1.0]))
            .is_ok());
    }

    #[test]
    fn test_grid_insert_inside_limits_adds_one() {
        let mut strategy = GridDiversity::new(2, 2, GridPrune::MostPopulated, Some(1)).unwrap();
        let mut members = sols(&[&[0.0, 4.0], &[4.0, 0.0]]);
        strategy.grid.rebuild(&mut members).unwrap();

        members.push(Solution::from_objectives(vec![2.5, 1.5]));
        strategy.on_insert(&mut members, 2).unwrap();
        assert_eq!(members[2].grid_cell, Some(2 + 4));
        assert_eq!(strategy.grid().tracked(), 3);
        assert_eq!(strategy.grid().upper_limits(), &[4.0, 4.0]);
    }

    #[test]
    fn test_grid_insert_outside_limits_rebuilds() {
        let mut strategy = GridDiversity::new(2, 2, GridPrune::MostPopulated, Some(1)).unwrap();
        let mut members = sols(&[&[0.0, 4.0], &[4.0, 0.0]]);
        strategy.grid.rebuild(&mut members).unwrap();

        members.push(Solution::from_objectives(vec![8.0, -4.0]));
        strategy.on_insert(&mut members, 2).unwrap();
        assert_eq!(strategy.grid().upper_limits(), &[8.0, 4.0]);
        assert_eq!(strategy.grid().lower_limits(), &[0.0, -4.0]);
        assert_eq!(strategy.grid().tracked(), 3);
    }

    #[test]
    fn test_grid_remove_interior_decrements() {
        let mut strategy = GridDiversity::new(2, 2, GridPrune::MostPopulated, Some(1)).unwrap();
        let mut members = sols(&[&[0.0, 4.0], &[2.5, 1.5], &[4.0, 0.0]]);
        strategy.grid.rebuild(&mut members).unwrap();

        let removed = members.remove(1);
        strategy.on_remove(&mut members, &removed).unwrap();
        assert_eq!(strategy.grid().tracked(), 2);
        assert_eq!(strategy.grid().location_density(6), 0);
    }

    #[test]
    fn test_grid_remove_extreme_shrinks_limits() {
        let mut strategy = GridDiversity::new(2, 2, GridPrune::MostPopulated, Some(1)).unwrap();
        let mut members = sols(&[&[0.0, 4.0], &[2.0, 2.0], &[4.0, 0.0]]);
        strategy.grid.rebuild(&mut members).unwrap();

        let removed = members.remove(2);
        strategy.on_remove(&mut members, &removed).unwrap();
        assert_eq!(strategy.grid().upper_limits(), &[2.0, 4.0]);
        assert_eq!(strategy.grid().lower_limits(), &[0.0, 2.0]);
        assert_eq!(strategy.grid().tracked(), 2);
    }

    #[test]
    fn test_grid_victim_in_most_populated_cell() {
        let mut strategy = GridDiversity::new(2, 2, GridPrune::MostPopulated, Some(1)).unwrap();
        let mut members = sols(&[&[0.0, 4.0], &[3.6, 0.3], &[3.8, 0.2], &[4.0, 0.0]]);
        strategy.grid.rebuild(&mut members).unwrap();
        // Cell 3 holds (3.6, 0.3), (3.8, 0.2) and (4.0, 0.0).
        assert_eq!(strategy.grid().location_density(3), 3);
        assert_eq!(strategy.select_victim(&mut members).unwrap(), 1);
    }

    #[test]
    fn test_select_sparse_prefers_isolated_member() {
        let mut strategy = GridDiversity::new(2, 2, GridPrune::MostPopulated, Some(1)).unwrap();
        let mut members = sols(&[&[0.0, 4.0], &[3.6, 0.3], &[3.8, 0.2], &[4.0, 0.0]]);
        strategy.grid.rebuild(&mut members).unwrap();

        let mut rng = StdRng::seed_from_u64(5);
        let isolated = (0..2000)
            .filter(|_| {
                strategy
                    .select_sparse(&members, &mut rng)
                    .map(|s| s.objectives == vec![0.0, 4.0])
                    .unwrap_or(false)
            })
            .count();
        // Weights 1 vs 1/3: isolated member picked ~75% of the time.
        assert!(isolated > 1300, "got {isolated}/2000");
    }
}
