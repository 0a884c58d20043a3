//! Weighted random selection over occupied hypercubes.
//!
//! All selections sample only cells with occupancy > 0. When exactly one
//! cell is occupied it is always returned; an empty grid yields `None`.

use super::adaptive::AdaptiveGrid;
use rand::Rng;

impl AdaptiveGrid {
    /// Picks an occupied cell with probability inversely proportional to
    /// its occupancy, favoring sparse regions.
    ///
    /// Used to choose parents or leaders from under-represented areas.
    pub fn roulette_wheel_selection<R: Rng>(&self, rng: &mut R) -> Option<usize> {
        self.roulette(rng, |count| 1.0 / count as f64)
    }

    /// Picks an occupied cell with probability proportional to its
    /// occupancy, favoring crowded regions.
    ///
    /// Used to choose which region to prune.
    pub fn roulette_wheel_prune<R: Rng>(&self, rng: &mut R) -> Option<usize> {
        self.roulette(rng, |count| count as f64)
    }

    /// Picks an occupied cell uniformly at random.
    pub fn random_occupied_hypercube<R: Rng>(&self, rng: &mut R) -> Option<usize> {
        let n = self.num_occupied();
        if n == 0 {
            return None;
        }
        self.occupied_hypercubes().nth(rng.random_range(0..n))
    }

    fn roulette<R, W>(&self, rng: &mut R, weight: W) -> Option<usize>
    where
        R: Rng,
        W: Fn(usize) -> f64,
    {
        let occupancy = self.occupancy();
        let last = *occupancy.keys().next_back()?;
        if occupancy.len() == 1 {
            return Some(last);
        }

        let total: f64 = occupancy.values().map(|&c| weight(c)).sum();
        let threshold = rng.random_range(0.0..total);
        let mut cumulative = 0.0;
        for (&cell, &count) in occupancy {
            cumulative += weight(count);
            if cumulative > threshold {
                return Some(cell);
            }
        }

        Some(last) // floating-point fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn populated(cells: &[(usize, usize)]) -> AdaptiveGrid {
        let mut grid = AdaptiveGrid::new(2, 2).unwrap();
        for &(cell, count) in cells {
            for _ in 0..count {
                grid.add_solution(cell).unwrap();
            }
        }
        grid
    }

    #[test]
    fn test_empty_grid_yields_none() {
        let grid = populated(&[]);
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(grid.roulette_wheel_selection(&mut rng), None);
        assert_eq!(grid.roulette_wheel_prune(&mut rng), None);
        assert_eq!(grid.random_occupied_hypercube(&mut rng), None);
    }

    #[test]
    fn test_single_cell_always_returned() {
        let grid = populated(&[(6, 4)]);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            assert_eq!(grid.roulette_wheel_selection(&mut rng), Some(6));
            assert_eq!(grid.roulette_wheel_prune(&mut rng), Some(6));
            assert_eq!(grid.random_occupied_hypercube(&mut rng), Some(6));
        }
    }

    #[test]
    fn test_only_occupied_cells_sampled() {
        let grid = populated(&[(1, 1), (10, 3)]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let a = grid.roulette_wheel_selection(&mut rng).unwrap();
            let b = grid.roulette_wheel_prune(&mut rng).unwrap();
            let c = grid.random_occupied_hypercube(&mut rng).unwrap();
            assert!([1, 10].contains(&a));
            assert!([1, 10].contains(&b));
            assert!([1, 10].contains(&c));
        }
    }

    #[test]
    fn test_selection_favors_sparse() {
        // Cell 0 holds 1, cell 15 holds 9: weights 1 vs 1/9.
        let grid = populated(&[(0, 1), (15, 9)]);
        let mut rng = StdRng::seed_from_u64(42);
        let n = 10000;
        let sparse = (0..n)
            .filter(|_| grid.roulette_wheel_selection(&mut rng) == Some(0))
            .count();
        assert!(
            sparse > 8000,
            "expected sparse cell ~90% of the time, got {sparse}/{n}"
        );
    }

    #[test]
    fn test_prune_favors_crowded() {
        let grid = populated(&[(0, 1), (15, 9)]);
        let mut rng = StdRng::seed_from_u64(42);
        let n = 10000;
        let crowded = (0..n)
            .filter(|_| grid.roulette_wheel_prune(&mut rng) == Some(15))
            .count();
        assert!(
            crowded > 8000,
            "expected crowded cell ~90% of the time, got {crowded}/{n}"
        );
    }

    #[test]
    fn test_random_occupied_is_roughly_uniform() {
        let grid = populated(&[(2, 1), (5, 8), (11, 3)]);
        let mut rng = StdRng::seed_from_u64(3);
        let mut counts = [0u32; 3];
        for _ in 0..9000 {
            match grid.random_occupied_hypercube(&mut rng) {
                Some(2) => counts[0] += 1,
                Some(5) => counts[1] += 1,
                Some(11) => counts[2] += 1,
                other => panic!("unexpected cell {other:?}"),
            }
        }
        for &c in &counts {
            assert!(c > 2500, "expected uniform, got {counts:?}");
        }
    }

    #[test]
    fn test_seeded_draws_are_reproducible() {
        let grid = populated(&[(0, 2), (3, 1), (9, 4), (14, 1)]);
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        let left: Vec<_> = (0..50).map(|_| grid.roulette_wheel_selection(&mut a)).collect();
        let right: Vec<_> = (0..50).map(|_| grid.roulette_wheel_selection(&mut b)).collect();
        assert_eq!(left, right);
    }
}
