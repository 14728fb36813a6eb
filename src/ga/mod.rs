//! Genetic Algorithm for the Traveling Salesperson Problem.
//!
//! A tour is a [`Chromosome`]: a permutation of city indices. A [`Deme`]
//! evolves a population of tours by roulette-wheel selection, swap
//! mutation and ordered crossover, replacing the whole population at every
//! generation.
//!
//! # Key Types
//!
//! - [`Chromosome`]: one candidate tour and its genetic operators
//! - [`Deme`]: the population and its generation step
//! - [`DemeConfig`]: population size, mutation rate, odd-size policy, seed
//! - [`DemeRunner`]: advances a deme a fixed number of generations
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"

mod chromosome;
mod config;
mod deme;
mod runner;

pub use chromosome::Chromosome;
pub use config::{DemeConfig, OddSizePolicy};
pub use deme::Deme;
pub use runner::{DemeRunner, EvolutionResult};
