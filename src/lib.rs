//! Genetic-algorithm optimizer for the Traveling Salesperson Problem.
//!
//! Candidate tours are permutations of city indices. A population of them
//! (a *deme*) is evolved with fitness-proportionate selection, swap mutation
//! and ordered crossover, converging toward short tours.
//!
//! - [`ga`]: chromosomes, the deme and its generation step, configuration
//! - [`cities`]: the [`DistanceOracle`] contract and planar [`Cities`]
//! - [`random`]: seeded random sources
//!
//! # Architecture
//!
//! The GA never inspects coordinates. It asks a [`DistanceOracle`] for the
//! number of cities and for the length of a visiting order; fitness is the
//! inverse of that length. All randomness flows from one explicitly seeded
//! generator per deme.

pub mod cities;
pub mod error;
pub mod ga;
pub mod random;

pub use cities::{Cities, DistanceOracle, Point};
pub use error::{Result, TspError};
