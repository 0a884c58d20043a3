//! Crowding distance estimation.
//!
//! Measures how isolated each member of a front is in objective space.
//! Higher distance means the solution is more isolated (more diverse) and
//! therefore preferable to keep when pruning.
//!
//! # Algorithm (Deb et al., 2002)
//!
//! For each objective:
//! 1. Sort solutions by objective value
//! 2. Assign infinity to the two boundary solutions
//! 3. For interior solutions, add `(next - prev) / (max - min)`
//!
//! An objective where `max == min` contributes nothing.
//!
//! # Complexity
//!
//! O(m * n * log n) where m = number of objectives, n = front size
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"

use crate::solution::Solution;
use std::cmp::Ordering;

/// Computes crowding distances for a front given as objective vectors.
///
/// Fronts of one or two points get `f64::INFINITY` everywhere.
///
/// # Example
///
/// ```
/// use u_pareto::crowding::crowding_distances;
///
/// let front: Vec<&[f64]> = vec![&[0.0, 10.0], &[5.0, 5.0], &[10.0, 0.0]];
/// let distances = crowding_distances(&front);
///
/// assert!(distances[0].is_infinite());
/// assert!(distances[2].is_infinite());
/// // 1.0 per objective, summed over both objectives
/// assert!((distances[1] - 2.0).abs() < 1e-12);
/// ```
pub fn crowding_distances(points: &[&[f64]]) -> Vec<f64> {
    let n = points.len();
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let m = points[0].len();
    let mut distances = vec![0.0f64; n];
    let mut indices: Vec<usize> = (0..n).collect();

    for obj_idx in 0..m {
        // Restart from identity so the result does not depend on the
        // previous objective's ordering.
        for (slot, i) in indices.iter_mut().zip(0..n) {
            *slot = i;
        }
        indices.sort_by(|&a, &b| {
            points[a][obj_idx]
                .partial_cmp(&points[b][obj_idx])
                .unwrap_or(Ordering::Equal)
        });

        distances[indices[0]] = f64::INFINITY;
        distances[indices[n - 1]] = f64::INFINITY;

        let min_val = points[indices[0]][obj_idx];
        let max_val = points[indices[n - 1]][obj_idx];
        let range = max_val - min_val;

        if range > 0.0 {
            for i in 1..(n - 1) {
                let prev = points[indices[i - 1]][obj_idx];
                let next = points[indices[i + 1]][obj_idx];
                distances[indices[i]] += (next - prev) / range;
            }
        }
    }

    distances
}

/// Writes the crowding distance of every member of `front` into
/// [`Solution::crowding_distance`].
///
/// The front is treated as a single set; ranks are not consulted.
/// Running this twice on an unchanged front yields identical scores.
pub fn assign_crowding_distance<V>(front: &mut [Solution<V>]) {
    let distances = {
        let points: Vec<&[f64]> = front.iter().map(|s| s.objectives.as_slice()).collect();
        crowding_distances(&points)
    };
    for (solution, d) in front.iter_mut().zip(distances) {
        solution.crowding_distance = Some(d);
    }
}

/// Sorts by crowding distance, most isolated first.
///
/// Solutions without a distance sort last. The sort is stable.
pub fn sort_by_crowding_distance<V>(front: &mut [Solution<V>]) {
    front.sort_by(|a, b| {
        let da = a.crowding_distance.unwrap_or(f64::NEG_INFINITY);
        let db = b.crowding_distance.unwrap_or(f64::NEG_INFINITY);
        db.partial_cmp(&da).unwrap_or(Ordering::Equal)
    });
}

/// Index of the member with the smallest crowding distance.
///
/// Ties resolve to the earliest index. Returns `None` for an empty slice.
pub(crate) fn least_crowded_index(distances: &[f64]) -> Option<usize> {
    distances
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &d)| match best {
            Some((_, bd)) if bd <= d => best,
            _ => Some((i, d)),
        })
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn front(points: &[&[f64]]) -> Vec<Solution<()>> {
        points
            .iter()
            .map(|p| Solution::from_objectives(p.to_vec()))
            .collect()
    }

    #[test]
    fn test_crowding_single() {
        let dist = crowding_distances(&[&[1.0, 2.0]]);
        assert_eq!(dist.len(), 1);
        assert!(dist[0].is_infinite());
    }

    #[test]
    fn test_crowding_two() {
        let dist = crowding_distances(&[&[1.0, 3.0], &[3.0, 1.0]]);
        assert!(dist.iter().all(|d| d.is_infinite()));
    }

    #[test]
    fn test_crowding_empty() {
        assert!(crowding_distances(&[]).is_empty());
    }

    #[test]
    fn test_three_point_front() {
        let mut f = front(&[&[0.0, 10.0], &[5.0, 5.0], &[10.0, 0.0]]);
        assign_crowding_distance(&mut f);

        assert_eq!(f[0].crowding_distance, Some(f64::INFINITY));
        assert_eq!(f[2].crowding_distance, Some(f64::INFINITY));
        let mid = f[1].crowding_distance.unwrap();
        assert!(mid.is_finite() && mid > 0.0);
        // Each objective contributes (10 - 0) / 10 = 1.0
        assert!((mid - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_evenly_spaced_interior_equal() {
        let dist = crowding_distances(&[
            &[0.0, 4.0],
            &[1.0, 3.0],
            &[2.0, 2.0],
            &[3.0, 1.0],
            &[4.0, 0.0],
        ]);
        assert!(dist[0].is_infinite());
        assert!(dist[4].is_infinite());
        assert!((dist[1] - dist[2]).abs() < 1e-10);
        assert!((dist[2] - dist[3]).abs() < 1e-10);
    }

    #[test]
    fn test_zero_range_objective() {
        let dist = crowding_distances(&[&[1.0, 5.0], &[2.0, 5.0], &[3.0, 5.0]]);
        assert!(dist[0].is_infinite());
        assert!(dist[2].is_infinite());
        assert!((dist[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_idempotent() {
        let mut f = front(&[
            &[0.0, 9.0],
            &[1.0, 7.0],
            &[4.0, 3.0],
            &[6.0, 2.5],
            &[9.0, 0.0],
        ]);
        assign_crowding_distance(&mut f);
        let first: Vec<_> = f.iter().map(|s| s.crowding_distance).collect();
        assign_crowding_distance(&mut f);
        let second: Vec<_> = f.iter().map(|s| s.crowding_distance).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_sort_by_crowding_distance() {
        let mut f = front(&[&[0.0, 4.0], &[1.0, 3.5], &[3.0, 1.0], &[4.0, 0.0]]);
        assign_crowding_distance(&mut f);
        sort_by_crowding_distance(&mut f);
        assert!(f[0].crowding_distance.unwrap().is_infinite());
        assert!(f[1].crowding_distance.unwrap().is_infinite());
        assert!(f[2].crowding_distance >= f[3].crowding_distance);
    }

    #[test]
    fn test_least_crowded_index() {
        assert_eq!(least_crowded_index(&[]), None);
        assert_eq!(least_crowded_index(&[f64::INFINITY, 0.5, 0.2, 0.2]), Some(2));
    }
}
