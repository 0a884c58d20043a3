//! Angular refinement of the first front.
//!
//! In many-objective problems most of a population tends to land in the
//! first front. The extended ranking re-projects the first front's points
//! and re-ranks them, splitting that front into ordered sub-fronts.
//!
//! Each point `f` is converted to polar form: radius `r = ‖f‖` and, per
//! objective, the angle `φ_i = acos(f_i / r)` to that axis. The angle is
//! shifted by `ω` and converted back:
//!
//! ```text
//! f'_i = r · sin(φ_i + ω) / sin(ω)
//! ```
//!
//! `ω = π/2` is the identity; smaller `ω` widens the region each point
//! dominates, so fewer projected points remain mutually non-dominated.
//!
//! # References
//!
//! - Sato, Aguirre & Tanaka (2007), "Controlling Dominance Area of
//!   Solutions and Its Impact on the Performance of MOEAs"

use super::sort::sort_fronts;
use crate::dominance::DominanceComparator;
use crate::solution::Solution;

/// Projects one objective vector through the angular shift `shift`.
///
/// The origin maps to itself.
///
/// # Example
///
/// ```
/// use u_pareto::ranking::angular_projection;
/// use std::f64::consts::FRAC_PI_2;
///
/// let p = angular_projection(&[3.0, 4.0], FRAC_PI_2);
/// assert!((p[0] - 3.0).abs() < 1e-12);
/// assert!((p[1] - 4.0).abs() < 1e-12);
/// ```
pub fn angular_projection(objectives: &[f64], shift: f64) -> Vec<f64> {
    let r = objectives.iter().map(|v| v * v).sum::<f64>().sqrt();
    if r == 0.0 || !r.is_finite() {
        return objectives.to_vec();
    }
    let sin_shift = shift.sin();
    objectives
        .iter()
        .map(|&v| {
            let phi = (v / r).clamp(-1.0, 1.0).acos();
            r * (phi + shift).sin() / sin_shift
        })
        .collect()
}

/// Re-ranks the projected members of `first_front`.
///
/// Returns sub-fronts holding indices into `solutions`. Violation degrees
/// are carried over to the projected points so `comparator` applies the
/// same feasibility policy as the primary ranking.
pub(crate) fn refine_first_front<V, C>(
    solutions: &[Solution<V>],
    first_front: &[usize],
    comparator: &C,
    shift: f64,
) -> Vec<Vec<usize>>
where
    C: DominanceComparator,
{
    let projected: Vec<Solution<()>> = first_front
        .iter()
        .map(|&i| {
            let s = &solutions[i];
            Solution::from_objectives(angular_projection(&s.objectives, shift))
                .with_violation(s.violation)
        })
        .collect();

    sort_fronts(projected.len(), |a, b| {
        comparator.compare(&projected[a], &projected[b])
    })
    .into_iter()
    .map(|sub| sub.into_iter().map(|k| first_front[k]).collect())
    .collect()
}
