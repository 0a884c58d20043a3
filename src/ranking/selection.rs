//! Ranking-and-crowding truncation (NSGA-II environmental selection).

use super::sort::rank;
use crate::crowding::{assign_crowding_distance, sort_by_crowding_distance};
use crate::dominance::DominanceComparator;
use crate::solution::Solution;
use crate::Result;

/// Keeps the best `n` solutions by rank, breaking the last front by crowding.
///
/// Whole fronts are taken in rank order until the next front no longer
/// fits. That front is sorted by descending crowding distance and
/// truncated. Every returned solution has `rank` and `crowding_distance`
/// set.
///
/// # Errors
///
/// Same as [`rank`]: the input must be non-empty with consistent
/// objective counts.
///
/// # Example
///
/// ```
/// use u_pareto::{select_by_rank_and_crowding, ParetoDominance, Solution};
///
/// let population = vec![
///     Solution::from_objectives(vec![0.0, 4.0]),
///     Solution::from_objectives(vec![1.0, 3.0]),
///     Solution::from_objectives(vec![4.0, 0.0]),
///     Solution::from_objectives(vec![5.0, 5.0]),
/// ];
/// let survivors = select_by_rank_and_crowding(population, 2, &ParetoDominance).unwrap();
/// assert_eq!(survivors.len(), 2);
/// assert!(survivors.iter().all(|s| s.rank == Some(0)));
/// ```
pub fn select_by_rank_and_crowding<V, C>(
    mut solutions: Vec<Solution<V>>,
    n: usize,
    comparator: &C,
) -> Result<Vec<Solution<V>>>
where
    V: Sync,
    C: DominanceComparator,
{
    let ranking = rank(&mut solutions, comparator)?;
    let n = n.min(solutions.len());
    let mut result = Vec::with_capacity(n);

    for mut front in ranking.into_fronts(solutions)? {
        let missing = n - result.len();
        if missing == 0 {
            break;
        }
        assign_crowding_distance(&mut front);
        if front.len() > missing {
            sort_by_crowding_distance(&mut front);
            front.truncate(missing);
        }
        result.extend(front);
    }

    debug_assert_eq!(result.len(), n);
    Ok(result)
}
