//! Ranking configuration.

use crate::{ParetoError, Result};
use std::f64::consts::FRAC_PI_2;

/// Configuration for non-dominated ranking.
///
/// Standard ranking is the default. The extended ranking refines the first
/// front by re-ranking an angular projection of its points, which helps
/// separate solutions that tie in many-objective settings.
///
/// # Examples
///
/// ```
/// use u_pareto::ranking::RankingConfig;
///
/// let config = RankingConfig::default();
/// assert!(!config.extended);
///
/// let config = RankingConfig::default()
///     .with_extended(true)
///     .with_angular_shift(0.3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankingConfig {
    /// Whether to apply the angular refinement to the first front.
    pub extended: bool,

    /// Shift angle in radians, within `(0, π/2]`.
    ///
    /// `None` uses `π / (2·m)` for `m` objectives. A shift of `π/2` leaves
    /// the points unchanged; smaller shifts widen each point's dominance area.
    pub angular_shift: Option<f64>,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            extended: false,
            angular_shift: None,
        }
    }
}

impl RankingConfig {
    /// Configuration with the angular refinement enabled.
    pub fn extended() -> Self {
        Self::default().with_extended(true)
    }

    /// Enables or disables the angular refinement.
    pub fn with_extended(mut self, extended: bool) -> Self {
        self.extended = extended;
        self
    }

    /// Sets an explicit shift angle in radians.
    pub fn with_angular_shift(mut self, shift: f64) -> Self {
        self.angular_shift = Some(shift);
        self
    }

    /// Shift angle for `num_objectives` objectives.
    pub fn shift_for(&self, num_objectives: usize) -> f64 {
        self.angular_shift
            .unwrap_or_else(|| FRAC_PI_2 / num_objectives.max(1) as f64)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if let Some(shift) = self.angular_shift {
            if !(shift > 0.0 && shift <= FRAC_PI_2) {
                return Err(ParetoError::InvalidShift(shift));
            }
        }
        Ok(())
    }
}
