//! Pareto dominance comparison.
//!
//! Comparators return [`Ordering`] with the convention that
//! [`Ordering::Less`] means the **left** solution dominates (is better),
//! [`Ordering::Greater`] means the right one dominates, and
//! [`Ordering::Equal`] means neither dominates the other.

use crate::solution::Solution;
use crate::{ParetoError, Result};
use std::cmp::Ordering;

/// Pairwise ordering of two solutions by dominance.
///
/// Implementations must be deterministic. Callers guarantee that both
/// solutions carry the same number of objectives; use
/// [`try_compare`](DominanceComparator::try_compare) when that has not been
/// checked yet.
pub trait DominanceComparator: Send + Sync {
    /// Compares `a` against `b`. `Less` means `a` dominates `b`.
    fn compare<V>(&self, a: &Solution<V>, b: &Solution<V>) -> Ordering;

    /// Like [`compare`](DominanceComparator::compare), but rejects solutions
    /// with different objective counts.
    fn try_compare<V>(&self, a: &Solution<V>, b: &Solution<V>) -> Result<Ordering> {
        if a.num_objectives() != b.num_objectives() {
            return Err(ParetoError::ObjectiveCountMismatch {
                expected: a.num_objectives(),
                actual: b.num_objectives(),
            });
        }
        Ok(self.compare(a, b))
    }
}

/// Pareto dominance with a constraint-violation override.
///
/// If the violation degrees differ, the smaller degree wins outright,
/// whatever the objectives say. Otherwise, including two infeasible
/// solutions with the same degree, strict Pareto dominance on the
/// objectives decides.
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use u_pareto::{DominanceComparator, ParetoDominance, Solution};
///
/// let a = Solution::from_objectives(vec![1.0, 1.0]);
/// let b = Solution::from_objectives(vec![2.0, 2.0]);
/// assert_eq!(ParetoDominance.compare(&a, &b), Ordering::Less);
///
/// // An infeasible solution loses regardless of objectives.
/// let c = Solution::from_objectives(vec![0.0, 0.0]).with_violation(1.0);
/// assert_eq!(ParetoDominance.compare(&c, &b), Ordering::Greater);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParetoDominance;

impl DominanceComparator for ParetoDominance {
    fn compare<V>(&self, a: &Solution<V>, b: &Solution<V>) -> Ordering {
        match a.violation.partial_cmp(&b.violation) {
            Some(Ordering::Equal) | None => pareto_cmp(&a.objectives, &b.objectives),
            Some(order) => order,
        }
    }
}

/// Strict Pareto dominance on objectives only; violation degrees are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjectiveDominance;

impl DominanceComparator for ObjectiveDominance {
    fn compare<V>(&self, a: &Solution<V>, b: &Solution<V>) -> Ordering {
        pareto_cmp(&a.objectives, &b.objectives)
    }
}

/// Compares two objective vectors for Pareto dominance (minimization).
///
/// `Less` if `a` is no worse everywhere and strictly better somewhere,
/// `Greater` for the mirror case, `Equal` otherwise.
pub fn pareto_cmp(a: &[f64], b: &[f64]) -> Ordering {
    let mut a_better_in_some = false;
    let mut b_better_in_some = false;

    for (&va, &vb) in a.iter().zip(b.iter()) {
        if va < vb {
            a_better_in_some = true;
        } else if vb < va {
            b_better_in_some = true;
        }
        if a_better_in_some && b_better_in_some {
            return Ordering::Equal;
        }
    }

    match (a_better_in_some, b_better_in_some) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

/// Returns `true` if objective vector `a` Pareto-dominates `b`.
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    pareto_cmp(a, b) == Ordering::Less
}

/// NSGA-II crowded-comparison operator.
///
/// Lower rank wins; on equal rank the larger crowding distance wins.
/// Missing rank or distance counts as the worst possible value.
/// `Less` means `a` is preferred.
pub fn crowded_comparison<V>(a: &Solution<V>, b: &Solution<V>) -> Ordering {
    let rank_a = a.rank.unwrap_or(usize::MAX);
    let rank_b = b.rank.unwrap_or(usize::MAX);
    rank_a.cmp(&rank_b).then_with(|| {
        let da = a.crowding_distance.unwrap_or(f64::NEG_INFINITY);
        let db = b.crowding_distance.unwrap_or(f64::NEG_INFINITY);
        db.partial_cmp(&da).unwrap_or(Ordering::Equal)
    })
}
