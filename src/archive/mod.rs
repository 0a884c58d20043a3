//! Bounded, diversity-preserving archives.
//!
//! A [`BoundedArchive`] keeps at most `capacity` mutually non-dominated
//! solutions. When an insertion overflows it, a [`DiversityStrategy`]
//! chooses one member to evict:
//!
//! - [`CrowdingDiversity`]: smallest crowding distance (NSGA-II style)
//! - [`GridDiversity`]: a member of the most populated (or
//!   roulette-chosen) hypercube of an adaptive grid (PAES style)
//!
//! [`SharedArchive`] serializes insertions from several threads.
//!
//! # References
//!
//! - Knowles & Corne (2000), "Approximating the Nondominated Front Using the
//!   Pareto Archived Evolution Strategy"
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"

mod bounded;
mod config;
mod shared;
mod strategy;

pub use bounded::BoundedArchive;
pub use config::{ArchiveConfig, GridPrune};
pub use shared::SharedArchive;
pub use strategy::{CrowdingDiversity, DiversityStrategy, GridDiversity};
