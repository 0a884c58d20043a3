//! Pareto ranking and bounded archives for multi-objective metaheuristics.
//!
//! Provides the building blocks that multi-objective evolutionary
//! algorithms (NSGA-II, PAES, SPEA-style archives, multi-objective PSO)
//! share:
//!
//! - **Dominance**: Pareto comparison with a constraint-violation override
//!   ([`ParetoDominance`]), plus the NSGA-II crowded-comparison operator.
//! - **Ranking**: Fast non-dominated sorting into ordered fronts
//!   ([`rank`]), with an optional angular refinement of the first front for
//!   many-objective problems ([`rank_with`]).
//! - **Crowding distance**: Per-front density estimate
//!   ([`assign_crowding_distance`]).
//! - **Adaptive grid**: Hypercube partition of objective space with
//!   occupancy counts and roulette-wheel sampling ([`AdaptiveGrid`]).
//! - **Bounded archive**: Capacity-limited non-dominated archive with
//!   pluggable diversity strategies ([`BoundedArchive`]).
//!
//! All objectives are **minimized**.
//!
//! # Architecture
//!
//! This crate sits at Layer 2 (Algorithms) in the U-Engine ecosystem,
//! next to `u-metaheur`. The evolutionary loop, variation operators and
//! problem definitions live in consumers; they feed evaluated
//! [`Solution`]s in and read ranks, crowding distances and archive
//! contents back out.
//!
//! # Example
//!
//! ```
//! use u_pareto::{assign_crowding_distance, rank, BoundedArchive, ParetoDominance, Solution};
//!
//! let mut population: Vec<Solution> = vec![
//!     Solution::new(vec![1.0, 5.0], vec![0.1]),
//!     Solution::new(vec![3.0, 3.0], vec![0.5]),
//!     Solution::new(vec![5.0, 1.0], vec![0.9]),
//!     Solution::new(vec![4.0, 4.0], vec![0.6]),
//! ];
//!
//! let ranking = rank(&mut population, &ParetoDominance).unwrap();
//! assert_eq!(ranking.num_fronts(), 2);
//!
//! let mut fronts = ranking.into_fronts(population.clone()).unwrap();
//! assign_crowding_distance(&mut fronts[0]);
//!
//! let mut archive = BoundedArchive::crowding(2).unwrap();
//! for s in population {
//!     archive.add(s).unwrap();
//! }
//! assert_eq!(archive.len(), 2);
//! ```

pub mod archive;
pub mod crowding;
pub mod dominance;
mod error;
pub mod grid;
pub mod ranking;
mod solution;

pub use archive::{ArchiveConfig, BoundedArchive, GridPrune, SharedArchive};
pub use crowding::assign_crowding_distance;
pub use dominance::{DominanceComparator, ObjectiveDominance, ParetoDominance};
pub use error::{ParetoError, Result};
pub use grid::AdaptiveGrid;
pub use ranking::{rank, rank_with, select_by_rank_and_crowding, Ranking, RankingConfig};
pub use solution::Solution;
