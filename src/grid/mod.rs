//! Adaptive hypercube grid.
//!
//! Partitions objective space into a regular grid whose bounds follow the
//! tracked solutions, counting how many solutions fall in each hypercube.
//! The counts serve two purposes:
//!
//! - **Density estimation**: [`AdaptiveGrid::location_density`]
//! - **Biased sampling**: [`AdaptiveGrid::roulette_wheel_selection`]
//!   prefers sparse regions, [`AdaptiveGrid::roulette_wheel_prune`] and
//!   [`AdaptiveGrid::most_populated_hypercube`] prefer crowded ones
//!
//! # References
//!
//! - Knowles & Corne (2000), "Approximating the Nondominated Front Using the
//!   Pareto Archived Evolution Strategy"

mod adaptive;
mod selection;

pub use adaptive::AdaptiveGrid;
