//! Fixed-length evolution driver.
//!
//! [`DemeRunner`] builds a [`Deme`] and advances it a caller-chosen number
//! of generations. It never stops early: deciding how long to evolve stays
//! with the caller.

use super::chromosome::Chromosome;
use super::config::DemeConfig;
use super::deme::Deme;
use crate::cities::DistanceOracle;
use crate::error::Result;

/// Result of a fixed-length run.
#[derive(Debug, Clone)]
pub struct EvolutionResult {
    /// The fittest tour of the final generation.
    pub best: Chromosome,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Tour length of `best` as reported by the oracle.
    pub best_distance: f64,

    /// Number of generation steps performed.
    pub generations: usize,

    /// Best fitness of the initial population followed by the best fitness
    /// after each generation.
    pub fitness_history: Vec<f64>,
}

/// Runs a deme for a fixed number of generations.
///
/// # Usage
///
/// ```
/// use tsp_deme::ga::{DemeConfig, DemeRunner};
/// use tsp_deme::{Cities, Point};
///
/// let cities = Cities::new(vec![
///     Point::new(0.0, 0.0),
///     Point::new(0.0, 1.0),
///     Point::new(1.0, 1.0),
///     Point::new(1.0, 0.0),
/// ]);
/// let config = DemeConfig::default().with_population_size(10).with_seed(42);
/// let result = DemeRunner::run(&cities, &config, 25).unwrap();
/// assert_eq!(result.fitness_history.len(), 26);
/// assert!(result.best.is_valid());
/// ```
pub struct DemeRunner;

impl DemeRunner {
    /// Evolves a fresh deme for `generations` steps.
    ///
    /// # Errors
    /// Configuration errors from [`DemeConfig::validate`] and any error raised
    /// while building or advancing the deme.
    pub fn run<O: DistanceOracle>(
        oracle: &O,
        config: &DemeConfig,
        generations: usize,
    ) -> Result<EvolutionResult> {
        let mut deme = Deme::from_config(oracle, config)?;

        let mut fitness_history = Vec::with_capacity(generations + 1);
        fitness_history.push(deme.best_fitness()?);

        tracing::info!(
            population = config.population_size,
            cities = oracle.city_count(),
            generations,
            "starting evolution"
        );

        for gen in 0..generations {
            deme.compute_next_generation()?;
            let best_fitness = deme.best_fitness()?;
            fitness_history.push(best_fitness);
            tracing::debug!(generation = gen + 1, best_fitness, "generation finished");
        }

        let best = deme.get_best()?.clone();
        let best_fitness = deme.best_fitness()?;
        let best_distance = oracle.total_path_distance(best.ordering());

        tracing::info!(best_distance, generations, "evolution finished");

        Ok(EvolutionResult {
            best,
            best_fitness,
            best_distance,
            generations,
            fitness_history,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
