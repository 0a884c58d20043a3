//! Adaptive hypercube grid over objective space.

use crate::solution::{check_finite, Solution};
use crate::{ParetoError, Result};
use std::collections::BTreeMap;
use tracing::trace;

/// A regular grid over objective space whose bounds follow the data.
///
/// Each dimension is split into `2^bisections` cells, giving
/// `(2^bisections)^m` hypercubes for `m` objectives. A hypercube is
/// identified by a single index built by mixed-radix encoding of the
/// per-dimension cell positions (dimension 0 is the least significant
/// digit); [`position`](AdaptiveGrid::position) decodes it.
///
/// Bounds are **not** recomputed on insertion. Call
/// [`update_limits`](AdaptiveGrid::update_limits) (or
/// [`rebuild`](AdaptiveGrid::rebuild), which also recounts occupancy)
/// whenever the tracked set's extremes change.
///
/// # Example
///
/// ```
/// use u_pareto::{AdaptiveGrid, Solution};
///
/// let mut grid = AdaptiveGrid::new(2, 2).unwrap(); // 4 x 4 cells
/// let points = vec![
///     Solution::from_objectives(vec![0.0, 0.0]),
///     Solution::from_objectives(vec![4.0, 4.0]),
/// ];
/// grid.update_limits(&points).unwrap();
///
/// let cell = grid.location_of(&[1.5, 3.5]).unwrap();
/// assert_eq!(grid.position(cell), vec![1, 3]);
///
/// grid.add_solution(cell).unwrap();
/// assert_eq!(grid.location_density(cell), 1);
/// ```
#[derive(Debug, Clone)]
pub struct AdaptiveGrid {
    bisections: usize,
    num_objectives: usize,
    cells_per_dim: usize,
    total_cells: usize,
    lower: Vec<f64>,
    upper: Vec<f64>,
    division_size: Vec<f64>,
    initialized: bool,
    /// Occupied cell → count. Cells with count zero are not stored.
    occupancy: BTreeMap<usize, usize>,
}

impl AdaptiveGrid {
    /// Creates an empty grid.
    ///
    /// # Errors
    ///
    /// Rejects zero bisections, zero objectives, and grids whose cell count
    /// does not fit in `usize`.
    pub fn new(bisections: usize, num_objectives: usize) -> Result<Self> {
        if bisections == 0 {
            return Err(ParetoError::InvalidBisections(bisections));
        }
        if num_objectives == 0 {
            return Err(ParetoError::InvalidObjectiveCount);
        }
        let too_large = ParetoError::GridTooLarge {
            bisections,
            objectives: num_objectives,
        };
        let cells_per_dim = u32::try_from(bisections)
            .ok()
            .and_then(|b| 1usize.checked_shl(b))
            .ok_or_else(|| too_large.clone())?;
        let total_cells = u32::try_from(num_objectives)
            .ok()
            .and_then(|m| cells_per_dim.checked_pow(m))
            .ok_or(too_large)?;

        Ok(Self {
            bisections,
            num_objectives,
            cells_per_dim,
            total_cells,
            lower: vec![0.0; num_objectives],
            upper: vec![0.0; num_objectives],
            division_size: vec![0.0; num_objectives],
            initialized: false,
            occupancy: BTreeMap::new(),
        })
    }

    /// Number of bisections per dimension.
    pub fn bisections(&self) -> usize {
        self.bisections
    }

    /// Number of objectives (grid dimensions).
    pub fn num_objectives(&self) -> usize {
        self.num_objectives
    }

    /// Cells per dimension, `2^bisections`.
    pub fn cells_per_dimension(&self) -> usize {
        self.cells_per_dim
    }

    /// Total number of hypercubes.
    pub fn total_cells(&self) -> usize {
        self.total_cells
    }

    /// Per-dimension lower bounds.
    pub fn lower_limits(&self) -> &[f64] {
        &self.lower
    }

    /// Per-dimension upper bounds.
    pub fn upper_limits(&self) -> &[f64] {
        &self.upper
    }

    /// Whether limits have been set by a non-empty update.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Recomputes per-dimension bounds from `solutions`.
    ///
    /// An empty slice is a no-op. Occupancy counts are left untouched;
    /// counts recorded under the old bounds are stale afterwards.
    pub fn update_limits<V>(&mut self, solutions: &[Solution<V>]) -> Result<()> {
        if solutions.is_empty() {
            return Ok(());
        }
        if let Some(bad) = solutions
            .iter()
            .find(|s| s.num_objectives() != self.num_objectives)
        {
            return Err(self.mismatch(bad.num_objectives()));
        }
        for solution in solutions {
            check_finite(&solution.objectives)?;
        }

        for obj in 0..self.num_objectives {
            let (lo, hi) = solutions
                .iter()
                .map(|s| s.objectives[obj])
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                    (lo.min(v), hi.max(v))
                });
            self.lower[obj] = lo;
            self.upper[obj] = hi;
            self.division_size[obj] = hi - lo;
        }
        self.initialized = true;

        trace!(lower = ?self.lower, upper = ?self.upper, "grid limits updated");
        Ok(())
    }

    /// Hypercube index of `solution`.
    pub fn location<V>(&self, solution: &Solution<V>) -> Result<usize> {
        self.location_of(&solution.objectives)
    }

    /// Hypercube index of an objective vector.
    ///
    /// Values outside the bounds are clamped to the nearest edge cell.
    /// A dimension whose bounds coincide maps everything to cell 0.
    pub fn location_of(&self, objectives: &[f64]) -> Result<usize> {
        if !self.initialized {
            return Err(ParetoError::GridUninitialized);
        }
        if objectives.len() != self.num_objectives {
            return Err(self.mismatch(objectives.len()));
        }
        check_finite(objectives)?;

        let mut location = 0usize;
        let mut radix = 1usize;
        for (obj, &value) in objectives.iter().enumerate() {
            location += self.cell_in_dimension(obj, value) * radix;
            radix = radix.saturating_mul(self.cells_per_dim);
        }

        debug_assert!(location < self.total_cells);
        Ok(location)
    }

    /// Binary descent over the bisections of one dimension.
    fn cell_in_dimension(&self, obj: usize, value: f64) -> usize {
        let lower = self.lower[obj];
        if value <= lower {
            return 0;
        }
        if value >= self.upper[obj] {
            return self.cells_per_dim - 1;
        }

        let mut position = 0usize;
        let mut size = self.division_size[obj];
        let mut account = lower;
        let mut ranges = self.cells_per_dim;
        for _ in 0..self.bisections {
            size /= 2.0;
            ranges /= 2;
            if value > account + size {
                position += ranges;
                account += size;
            }
        }
        position
    }

    /// Decodes a hypercube index into per-dimension cell positions.
    pub fn position(&self, location: usize) -> Vec<usize> {
        let mut rest = location;
        (0..self.num_objectives)
            .map(|_| {
                let p = rest % self.cells_per_dim;
                rest /= self.cells_per_dim;
                p
            })
            .collect()
    }

    /// Increments the occupancy of `location`.
    pub fn add_solution(&mut self, location: usize) -> Result<()> {
        self.check_range(location)?;
        *self.occupancy.entry(location).or_insert(0) += 1;
        Ok(())
    }

    /// Decrements the occupancy of `location`.
    ///
    /// # Errors
    ///
    /// [`ParetoError::EmptyCell`] if the cell holds no solution. Counts
    /// never go negative.
    pub fn remove_solution(&mut self, location: usize) -> Result<()> {
        self.check_range(location)?;
        match self.occupancy.get_mut(&location) {
            Some(count) if *count > 1 => *count -= 1,
            Some(_) => {
                self.occupancy.remove(&location);
            }
            None => return Err(ParetoError::EmptyCell { cell: location }),
        }
        Ok(())
    }

    /// Current occupancy of `location` (0 if never populated).
    pub fn location_density(&self, location: usize) -> usize {
        self.occupancy.get(&location).copied().unwrap_or(0)
    }

    /// Occupied hypercubes in ascending index order.
    pub fn occupied_hypercubes(&self) -> impl Iterator<Item = usize> + '_ {
        self.occupancy.keys().copied()
    }

    /// Number of occupied hypercubes.
    pub fn num_occupied(&self) -> usize {
        self.occupancy.len()
    }

    /// Sum of occupancy over all cells.
    pub fn tracked(&self) -> usize {
        self.occupancy.values().sum()
    }

    /// Clears every occupancy count; bounds are kept.
    pub fn reset_occupancy(&mut self) {
        self.occupancy.clear();
    }

    /// Forgets bounds and occupancy; the next location query requires a
    /// fresh limit update.
    pub fn clear(&mut self) {
        self.occupancy.clear();
        self.initialized = false;
    }

    /// Occupied hypercube with the highest count (lowest index on ties).
    pub fn most_populated_hypercube(&self) -> Option<usize> {
        self.occupancy
            .iter()
            .fold(None, |best: Option<(usize, usize)>, (&cell, &count)| match best {
                Some((_, c)) if c >= count => best,
                _ => Some((cell, count)),
            })
            .map(|(cell, _)| cell)
    }

    pub(crate) fn occupancy(&self) -> &BTreeMap<usize, usize> {
        &self.occupancy
    }

    /// Whether every value lies within the current bounds.
    pub fn is_within_limits(&self, objectives: &[f64]) -> bool {
        self.initialized
            && objectives.len() == self.num_objectives
            && objectives
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(&v, (&lo, &hi))| v >= lo && v <= hi)
    }

    /// Whether any value lies on (or beyond) a bound, i.e. removing this
    /// point may shrink the bounds.
    pub fn is_extreme(&self, objectives: &[f64]) -> bool {
        !self.initialized
            || objectives
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .any(|(&v, (&lo, &hi))| v <= lo || v >= hi)
    }

    /// Recomputes bounds from `solutions`, recounts occupancy, and writes
    /// each solution's [`grid_cell`](Solution::grid_cell).
    ///
    /// Bounds and cell indices change together, so no caller observes a
    /// location computed against stale bounds.
    pub fn rebuild<V>(&mut self, solutions: &mut [Solution<V>]) -> Result<()> {
        self.update_limits(solutions)?;
        self.occupancy.clear();
        for solution in solutions.iter_mut() {
            let cell = self.location(solution)?;
            solution.grid_cell = Some(cell);
            *self.occupancy.entry(cell).or_insert(0) += 1;
        }
        trace!(
            tracked = solutions.len(),
            occupied = self.occupancy.len(),
            "grid rebuilt"
        );
        Ok(())
    }

    fn check_range(&self, location: usize) -> Result<()> {
        if location >= self.total_cells {
            return Err(ParetoError::CellOutOfRange {
                cell: location,
                total: self.total_cells,
            });
        }
        Ok(())
    }

    fn mismatch(&self, actual: usize) -> ParetoError {
        ParetoError::ObjectiveCountMismatch {
            expected: self.num_objectives,
            actual,
        }
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

    fn grid_4x4() -> AdaptiveGrid {
        let mut grid = AdaptiveGrid::new(2, 2).unwrap();
        grid.update_limits(&sols(&[&[0.0, 0.0], &[4.0, 4.0]])).unwrap();
        grid
    }

    #[test]
    fn test_dimensions() {
        let grid = AdaptiveGrid::new(3, 2).unwrap();
        assert_eq!(grid.cells_per_dimension(), 8);
        assert_eq!(grid.total_cells(), 64);
        assert!(!grid.is_initialized());
    }

    #[test]
    fn test_invalid_arguments() {
        assert_eq!(
            AdaptiveGrid::new(0, 2).unwrap_err(),
            ParetoError::InvalidBisections(0)
        );
        assert_eq!(
            AdaptiveGrid::new(2, 0).unwrap_err(),
            ParetoError::InvalidObjectiveCount
        );
        assert!(matches!(
            AdaptiveGrid::new(40, 4),
            Err(ParetoError::GridTooLarge { .. })
        ));
        assert!(matches!(
            AdaptiveGrid::new(200, 1),
            Err(ParetoError::GridTooLarge { .. })
        ));
    }

    #[test]
    fn test_location_before_limits() {
        let grid = AdaptiveGrid::new(2, 2).unwrap();
        assert_eq!(
            grid.location_of(&[1.0, 1.0]),
            Err(ParetoError::GridUninitialized)
        );
    }

    #[test]
    fn test_empty_update_is_noop() {
        let mut grid = AdaptiveGrid::new(2, 2).unwrap();
        grid.update_limits::<()>(&[]).unwrap();
        assert!(!grid.is_initialized());
    }

    #[test]
    fn test_location_cells() {
        let grid = grid_4x4();
        // Cells are (0,1], (1,2], (2,3], (3,4] with the lower bound in cell 0.
        assert_eq!(grid.location_of(&[0.0, 0.0]).unwrap(), 0);
        assert_eq!(grid.location_of(&[1.5, 0.0]).unwrap(), 1);
        assert_eq!(grid.location_of(&[2.5, 0.0]).unwrap(), 2);
        assert_eq!(grid.location_of(&[4.0, 0.0]).unwrap(), 3);
        assert_eq!(grid.location_of(&[1.5, 3.5]).unwrap(), 1 + 3 * 4);
        assert_eq!(grid.location_of(&[4.0, 4.0]).unwrap(), 15);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let grid = grid_4x4();
        assert_eq!(grid.location_of(&[-10.0, 10.0]).unwrap(), 12);
        assert_eq!(grid.position(12), vec![0, 3]);
    }

    #[test]
    fn test_degenerate_dimension() {
        let mut grid = AdaptiveGrid::new(2, 2).unwrap();
        grid.update_limits(&sols(&[&[0.0, 5.0], &[4.0, 5.0]])).unwrap();
        assert_eq!(grid.location_of(&[3.5, 5.0]).unwrap(), 3);
    }

    #[test]
    fn test_position_inverts_location() {
        let mut grid = AdaptiveGrid::new(3, 3).unwrap();
        grid.update_limits(&sols(&[&[0.0, 0.0, 0.0], &[8.0, 8.0, 8.0]]))
            .unwrap();
        for cell in 0..grid.total_cells() {
            let pos = grid.position(cell);
            // Centre of the encoded cell maps back to the same index.
            let centre: Vec<f64> = pos.iter().map(|&p| p as f64 + 0.5).collect();
            assert_eq!(grid.location_of(&centre).unwrap(), cell);
        }
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let mut grid = grid_4x4();
        assert_eq!(
            grid.update_limits(&sols(&[&[1.0, 1.0], &[f64::NAN, 3.0]])),
            Err(ParetoError::NonFiniteObjective { index: 0 })
        );
        // Limits from the earlier update survive.
        assert_eq!(grid.upper_limits(), &[4.0, 4.0]);
        assert_eq!(
            grid.location_of(&[1.0, f64::INFINITY]),
            Err(ParetoError::NonFiniteObjective { index: 1 })
        );
    }

    #[test]
    fn test_mismatched_objectives() {
        let grid = grid_4x4();
        assert!(matches!(
            grid.location_of(&[1.0]),
            Err(ParetoError::ObjectiveCountMismatch { .. })
        ));
    }

    #[test]
    fn test_add_remove_density() {
        let mut grid = grid_4x4();
        grid.add_solution(5).unwrap();
        grid.add_solution(5).unwrap();
        grid.add_solution(9).unwrap();
        assert_eq!(grid.location_density(5), 2);
        assert_eq!(grid.location_density(0), 0);
        assert_eq!(grid.tracked(), 3);
        assert_eq!(grid.most_populated_hypercube(), Some(5));

        grid.remove_solution(5).unwrap();
        grid.remove_solution(5).unwrap();
        assert_eq!(grid.location_density(5), 0);
        assert_eq!(grid.occupied_hypercubes().collect::<Vec<_>>(), vec![9]);
    }

    #[test]
    fn test_remove_empty_cell_fails() {
        let mut grid = grid_4x4();
        assert_eq!(
            grid.remove_solution(3),
            Err(ParetoError::EmptyCell { cell: 3 })
        );
    }

    #[test]
    fn test_cell_out_of_range() {
        let mut grid = grid_4x4();
        assert_eq!(
            grid.add_solution(16),
            Err(ParetoError::CellOutOfRange { cell: 16, total: 16 })
        );
    }

    #[test]
    fn test_most_populated_tie_takes_lowest() {
        let mut grid = grid_4x4();
        grid.add_solution(7).unwrap();
        grid.add_solution(2).unwrap();
        assert_eq!(grid.most_populated_hypercube(), Some(2));
        assert_eq!(AdaptiveGrid::new(1, 1).unwrap().most_populated_hypercube(), None);
    }

    #[test]
    fn test_rebuild_writes_cells() {
        let mut grid = AdaptiveGrid::new(2, 2).unwrap();
        let mut s = sols(&[&[0.0, 4.0], &[1.5, 2.5], &[4.0, 0.0]]);
        grid.rebuild(&mut s).unwrap();
        assert_eq!(s[0].grid_cell, Some(12));
        assert_eq!(s[1].grid_cell, Some(1 + 2 * 4));
        assert_eq!(s[2].grid_cell, Some(3));
        assert_eq!(grid.tracked(), 3);
    }

    #[test]
    fn test_clear_forgets_limits() {
        let mut grid = grid_4x4();
        grid.add_solution(1).unwrap();
        grid.clear();
        assert!(!grid.is_initialized());
        assert_eq!(grid.tracked(), 0);
        assert_eq!(
            grid.location_of(&[1.0, 1.0]),
            Err(ParetoError::GridUninitialized)
        );
    }

    #[test]
    fn test_within_limits_and_extreme() {
        let grid = grid_4x4();
        assert!(grid.is_within_limits(&[2.0, 2.0]));
        assert!(!grid.is_within_limits(&[5.0, 2.0]));
        assert!(grid.is_extreme(&[0.0, 2.0]));
        assert!(!grid.is_extreme(&[1.0, 2.0]));
    }
}
