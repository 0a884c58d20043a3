//! The solution record shared by every algorithm in this crate.
//!
//! A [`Solution`] carries objective values (minimized), opaque decision
//! variables, a constraint-violation degree, and the metadata that ranking,
//! crowding and grid bookkeeping write back in place.

/// A candidate solution scored on several objectives.
///
/// All objectives are **minimized**: lower values are better.
///
/// The decision variables `V` are never inspected by this crate. They
/// default to `Vec<f64>` for real-coded problems.
///
/// # Example
///
/// ```
/// use u_pareto::Solution;
///
/// let s = Solution::new(vec![1.0, 2.0], vec![0.5, 0.5]).with_violation(0.0);
/// assert_eq!(s.num_objectives(), 2);
/// assert!(s.is_feasible());
/// assert!(s.rank.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution<V = Vec<f64>> {
    /// Objective values, one per objective.
    pub objectives: Vec<f64>,

    /// Decision variables.
    pub variables: V,

    /// Constraint-violation degree. Zero means feasible; larger is worse.
    pub violation: f64,

    /// Pareto rank written by ranking (0 = first front).
    pub rank: Option<usize>,

    /// Crowding distance written by the crowding estimator.
    pub crowding_distance: Option<f64>,

    /// Hypercube index written by the adaptive grid.
    pub grid_cell: Option<usize>,
}

impl<V> Solution<V> {
    /// Creates a feasible solution with no metadata.
    pub fn new(objectives: Vec<f64>, variables: V) -> Self {
        Self {
            objectives,
            variables,
            violation: 0.0,
            rank: None,
            crowding_distance: None,
            grid_cell: None,
        }
    }

    /// Sets the constraint-violation degree.
    ///
    /// A negative degree means every constraint holds with slack, which is
    /// the same as feasible, so it is stored as 0. NaN is not a degree and
    /// fails a debug assertion.
    pub fn with_violation(mut self, violation: f64) -> Self {
        debug_assert!(!violation.is_nan(), "constraint violation must not be NaN");
        self.violation = violation.max(0.0);
        self
    }

    /// Number of objectives.
    pub fn num_objectives(&self) -> usize {
        self.objectives.len()
    }

    /// Returns `true` when the violation degree is zero.
    pub fn is_feasible(&self) -> bool {
        self.violation == 0.0
    }

    /// Clears rank, crowding distance and grid cell.
    pub fn clear_metadata(&mut self) {
        self.rank = None;
        self.crowding_distance = None;
        self.grid_cell = None;
    }
}

impl Solution<()> {
    /// Creates a solution that only carries objective values.
    pub fn from_objectives(objectives: Vec<f64>) -> Self {
        Self::new(objectives, ())
    }
}

/// Rejects NaN and infinite objective values.
pub(crate) fn check_finite(objectives: &[f64]) -> crate::Result<()> {
    match objectives.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(crate::ParetoError::NonFiniteObjective { index }),
        None => Ok(()),
    }
}

/// Checks that `solutions` is non-empty and that every member has the same,
/// non-zero objective count of finite values. Returns that count.
pub(crate) fn validate_objective_counts<V>(solutions: &[Solution<V>]) -> crate::Result<usize> {
    let first = solutions.first().ok_or(crate::ParetoError::EmptyCollection)?;
    let m = first.num_objectives();
    if m == 0 {
        return Err(crate::ParetoError::InvalidObjectiveCount);
    }
    if let Some(bad) = solutions.iter().find(|s| s.num_objectives() != m) {
        return Err(crate::ParetoError::ObjectiveCountMismatch {
            expected: m,
            actual: bad.num_objectives(),
        });
    }
    for solution in solutions {
        check_finite(&solution.objectives)?;
    }
    Ok(m)
}
