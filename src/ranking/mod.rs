//! Non-dominated ranking.
//!
//! Partitions a collection of solutions into ordered Pareto fronts.
//!
//! # Algorithms
//!
//! - [`rank`]: Fast non-dominated sorting (Deb et al., 2002)
//! - [`rank_with`]: Same, with optional angular refinement of the first
//!   front for many-objective problems (see [`RankingConfig`])
//! - [`select_by_rank_and_crowding`]: NSGA-II truncation of a population
//!   to a target size
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - IEEE Transactions on Evolutionary Computation, 6(2), 182-197

mod config;
mod extended;
mod selection;
mod sort;

pub use config::RankingConfig;
pub use extended::angular_projection;
pub use selection::select_by_rank_and_crowding;
pub use sort::{rank, rank_with, Ranking};
