//! Error types.
//!
//! Errors fall into two groups:
//!
//! - **Invalid arguments**: empty collections, mismatched objective counts,
//!   non-positive capacities or bisection counts. Rejected up front.
//! - **Invariant violations**: an internal bookkeeping inconsistency, such as
//!   removing a solution from an empty grid cell. These abort the current
//!   operation and indicate a bug in the caller or in this crate.
//!
//! Degenerate numeric data (e.g. every solution sharing one objective value)
//! is not an error; each algorithm defines a fallback for it.

use thiserror::Error;

/// Errors reported by ranking, crowding, grid and archive operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParetoError {
    /// A collection that must hold at least one solution was empty.
    #[error("solution collection must not be empty")]
    EmptyCollection,

    /// Two solutions (or a solution and a grid) disagree on objective count.
    #[error("objective count mismatch: expected {expected}, got {actual}")]
    ObjectiveCountMismatch { expected: usize, actual: usize },

    /// A ranking was applied to a collection of a different length.
    #[error("expected {expected} solutions, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Archive capacity must be at least 1.
    #[error("archive capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),

    /// Grid bisection count must be at least 1.
    #[error("grid bisections must be at least 1, got {0}")]
    InvalidBisections(usize),

    /// An objective value is NaN or infinite.
    #[error("objective {index} is not a finite number")]
    NonFiniteObjective { index: usize },

    /// Solutions must carry at least one objective.
    #[error("number of objectives must be at least 1")]
    InvalidObjectiveCount,

    /// `cells_per_dim ^ objectives` does not fit in `usize`.
    #[error("grid with {bisections} bisections over {objectives} objectives has too many cells")]
    GridTooLarge { bisections: usize, objectives: usize },

    /// Angular shift for extended ranking must lie in `(0, π/2]`.
    #[error("angular shift must lie in (0, pi/2], got {0}")]
    InvalidShift(f64),

    /// A location query was made before the grid limits were set.
    #[error("grid limits have not been initialized")]
    GridUninitialized,

    /// Tried to decrement the occupancy of an empty cell.
    #[error("grid cell {cell} is already empty")]
    EmptyCell { cell: usize },

    /// A cell index outside `[0, total_cells)`.
    #[error("grid cell {cell} is out of range (total cells: {total})")]
    CellOutOfRange { cell: usize, total: usize },

    /// A grid cell is counted as occupied but no archive member maps to it.
    #[error("grid cell {cell} has occupancy but no archive member")]
    UntrackedCell { cell: usize },

    /// The archive grew beyond its capacity.
    #[error("archive size {size} exceeds capacity {capacity}")]
    CapacityExceeded { size: usize, capacity: usize },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ParetoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = ParetoError::ObjectiveCountMismatch {
            expected: 2,
            actual: 3,
        };
        assert_eq!(err.to_string(), "objective count mismatch: expected 2, got 3");
        assert_eq!(
            ParetoError::EmptyCell { cell: 7 }.to_string(),
            "grid cell 7 is already empty"
        );
        assert_eq!(
            ParetoError::NonFiniteObjective { index: 1 }.to_string(),
            "objective 1 is not a finite number"
        );
    }
}
