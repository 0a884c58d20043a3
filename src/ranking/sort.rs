//! Fast non-dominated sorting.

use super::config::RankingConfig;
use super::extended::refine_first_front;
use crate::dominance::DominanceComparator;
use crate::solution::{validate_objective_counts, Solution};
use crate::{ParetoError, Result};
use std::cmp::Ordering;
use tracing::trace;

/// Result of non-dominated ranking.
///
/// Fronts hold indices into the ranked collection. Front 0 is the Pareto
/// front; every solution appears in exactly one front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranking {
    ranks: Vec<usize>,
    fronts: Vec<Vec<usize>>,
}

impl Ranking {
    pub(crate) fn from_fronts(n: usize, fronts: Vec<Vec<usize>>) -> Self {
        let mut ranks = vec![0usize; n];
        for (r, front) in fronts.iter().enumerate() {
            for &i in front {
                ranks[i] = r;
            }
        }
        Self { ranks, fronts }
    }

    /// Indices grouped by front: `fronts()[0]` is the best front.
    pub fn fronts(&self) -> &[Vec<usize>] {
        &self.fronts
    }

    /// Indices of front `rank`, if it exists.
    pub fn front(&self, rank: usize) -> Option<&[usize]> {
        self.fronts.get(rank).map(Vec::as_slice)
    }

    /// Number of fronts.
    pub fn num_fronts(&self) -> usize {
        self.fronts.len()
    }

    /// Rank of the solution at `index`, or `None` if out of range.
    pub fn rank_of(&self, index: usize) -> Option<usize> {
        self.ranks.get(index).copied()
    }

    /// Rank of every solution, in input order.
    pub fn ranks(&self) -> &[usize] {
        &self.ranks
    }

    /// Moves `solutions` into per-front vectors, preserving front order.
    ///
    /// `solutions` must be the collection this ranking was computed on.
    pub fn into_fronts<V>(self, solutions: Vec<Solution<V>>) -> Result<Vec<Vec<Solution<V>>>> {
        if solutions.len() != self.ranks.len() {
            return Err(ParetoError::LengthMismatch {
                expected: self.ranks.len(),
                actual: solutions.len(),
            });
        }
        let mut slots: Vec<Option<Solution<V>>> = solutions.into_iter().map(Some).collect();
        Ok(self
            .fronts
            .iter()
            .map(|front| front.iter().filter_map(|&i| slots[i].take()).collect())
            .collect())
    }
}

/// Ranks `solutions` into non-dominated fronts.
///
/// Writes [`Solution::rank`] on every solution and returns the fronts as
/// index lists.
///
/// # Algorithm (Deb et al., 2002)
///
/// 1. For each pair of solutions, determine dominance
/// 2. Solutions dominated by no other belong to front 0
/// 3. Each member of the current front releases the solutions it
///    dominates; those whose count of dominators drops to zero form the
///    next front
///
/// # Complexity
///
/// O(m * n²) where m = number of objectives, n = number of solutions
///
/// # Errors
///
/// [`ParetoError::EmptyCollection`] for an empty slice and
/// [`ParetoError::ObjectiveCountMismatch`] for inconsistent objective counts.
///
/// # Example
///
/// ```
/// use u_pareto::{rank, ParetoDominance, Solution};
///
/// let mut solutions = vec![
///     Solution::from_objectives(vec![1.0, 5.0]),
///     Solution::from_objectives(vec![3.0, 3.0]),
///     Solution::from_objectives(vec![5.0, 1.0]),
///     Solution::from_objectives(vec![4.0, 4.0]), // dominated by (3, 3)
/// ];
///
/// let ranking = rank(&mut solutions, &ParetoDominance).unwrap();
/// assert_eq!(ranking.front(0), Some(&[0, 1, 2][..]));
/// assert_eq!(ranking.front(1), Some(&[3][..]));
/// assert_eq!(solutions[3].rank, Some(1));
/// ```
pub fn rank<V, C>(solutions: &mut [Solution<V>], comparator: &C) -> Result<Ranking>
where
    V: Sync,
    C: DominanceComparator,
{
    rank_with(solutions, comparator, &RankingConfig::default())
}

/// Ranks `solutions`, optionally applying the extended angular refinement
/// described on [`RankingConfig`].
pub fn rank_with<V, C>(
    solutions: &mut [Solution<V>],
    comparator: &C,
    config: &RankingConfig,
) -> Result<Ranking>
where
    V: Sync,
    C: DominanceComparator,
{
    config.validate()?;
    let m = validate_objective_counts(solutions)?;
    let n = solutions.len();

    let mut fronts = {
        let view: &[Solution<V>] = &*solutions;
        sort_fronts(n, |i, j| comparator.compare(&view[i], &view[j]))
    };

    if config.extended && fronts[0].len() > 1 {
        let refined = refine_first_front(&*solutions, &fronts[0], comparator, config.shift_for(m));
        trace!(
            first_front = fronts[0].len(),
            sub_fronts = refined.len(),
            "extended ranking refined first front"
        );
        fronts.splice(0..1, refined);
    }

    let ranking = Ranking::from_fronts(n, fronts);
    for (solution, &r) in solutions.iter_mut().zip(&ranking.ranks) {
        solution.rank = Some(r);
    }
    Ok(ranking)
}

/// Sorts `n` items into fronts given a dominance relation over indices.
///
/// `cmp(i, j) == Less` means item `i` dominates item `j`.
pub(crate) fn sort_fronts<F>(n: usize, cmp: F) -> Vec<Vec<usize>>
where
    F: Fn(usize, usize) -> Ordering + Sync,
{
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![vec![0]];
    }

    let (dominated_by, mut domination_count) = dominance_lists(n, &cmp);

    let front_0: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();
    let mut fronts = vec![front_0];
    loop {
        let mut next_front = Vec::new();
        if let Some(current) = fronts.last() {
            for &i in current {
                for &j in &dominated_by[i] {
                    domination_count[j] -= 1;
                    if domination_count[j] == 0 {
                        next_front.push(j);
                    }
                }
            }
        }

        if next_front.is_empty() {
            break;
        }
        next_front.sort_unstable();
        fronts.push(next_front);
    }

    debug_assert_eq!(fronts.iter().map(Vec::len).sum::<usize>(), n);
    fronts
}

/// For each item: the items it dominates, and how many items dominate it.
#[cfg(not(feature = "parallel"))]
fn dominance_lists<F>(n: usize, cmp: &F) -> (Vec<Vec<usize>>, Vec<usize>)
where
    F: Fn(usize, usize) -> Ordering + Sync,
{
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut domination_count = vec![0usize; n];

    for i in 0..n {
        for j in (i + 1)..n {
            match cmp(i, j) {
                Ordering::Less => {
                    dominated_by[i].push(j);
                    domination_count[j] += 1;
                }
                Ordering::Greater => {
                    dominated_by[j].push(i);
                    domination_count[i] += 1;
                }
                Ordering::Equal => {}
            }
        }
    }

    (dominated_by, domination_count)
}

/// Parallel variant: rows are computed independently, comparing each pair
/// from both sides.
#[cfg(feature = "parallel")]
fn dominance_lists<F>(n: usize, cmp: &F) -> (Vec<Vec<usize>>, Vec<usize>)
where
    F: Fn(usize, usize) -> Ordering + Sync,
{
    use rayon::prelude::*;

    (0..n)
        .into_par_iter()
        .map(|i| {
            let mut dominated = Vec::new();
            let mut count = 0usize;
            for j in (0..n).filter(|&j| j != i) {
                match cmp(i, j) {
                    Ordering::Less => dominated.push(j),
                    Ordering::Greater => count += 1,
                    Ordering::Equal => {}
                }
            }
            (dominated, count)
        })
        .unzip()
}
