//! Archive configuration.

use crate::{ParetoError, Result};

/// How a grid-based archive picks the hypercube to prune.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridPrune {
    /// Always prune the most populated hypercube (lowest index on ties).
    #[default]
    MostPopulated,

    /// Pick the hypercube by roulette wheel, proportional to occupancy.
    Roulette,
}

/// Configuration for a bounded archive.
///
/// # Defaults
///
/// ```
/// use u_pareto::archive::{ArchiveConfig, GridPrune};
///
/// let config = ArchiveConfig::default();
/// assert_eq!(config.capacity, 100);
/// assert_eq!(config.bisections, 5);
/// assert_eq!(config.grid_prune, GridPrune::MostPopulated);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_pareto::archive::{ArchiveConfig, GridPrune};
///
/// let config = ArchiveConfig::default()
///     .with_capacity(50)
///     .with_bisections(4)
///     .with_grid_prune(GridPrune::Roulette)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArchiveConfig {
    /// Maximum number of members.
    pub capacity: usize,

    /// Bisections per objective for grid-based archives.
    ///
    /// Each objective is split into `2^bisections` cells.
    pub bisections: usize,

    /// Pruning policy for grid-based archives.
    pub grid_prune: GridPrune,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            bisections: 5,
            grid_prune: GridPrune::default(),
            seed: None,
        }
    }
}

impl ArchiveConfig {
    /// Sets the capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the number of grid bisections.
    pub fn with_bisections(mut self, bisections: usize) -> Self {
        self.bisections = bisections;
        self
    }

    /// Sets the grid pruning policy.
    pub fn with_grid_prune(mut self, prune: GridPrune) -> Self {
        self.grid_prune = prune;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(ParetoError::InvalidCapacity(self.capacity));
        }
        if self.bisections == 0 {
            return Err(ParetoError::InvalidBisections(self.bisections));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ArchiveConfig::default();
        assert_eq!(config.capacity, 100);
        assert_eq!(config.bisections, 5);
        assert_eq!(config.grid_prune, GridPrune::MostPopulated);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = ArchiveConfig::default()
            .with_capacity(20)
            .with_bisections(3)
            .with_grid_prune(GridPrune::Roulette)
            .with_seed(7);
        assert_eq!(config.capacity, 20);
        assert_eq!(config.bisections, 3);
        assert_eq!(config.grid_prune, GridPrune::Roulette);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_validate_zero_capacity() {
        let config = ArchiveConfig::default().with_capacity(0);
        assert_eq!(config.validate(), Err(ParetoError::InvalidCapacity(0)));
    }

    #[test]
    fn test_validate_zero_bisections() {
        let config = ArchiveConfig::default().with_bisections(0);
        assert_eq!(config.validate(), Err(ParetoError::InvalidBisections(0)));
    }
}
