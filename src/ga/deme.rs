//! Population container and generational replacement.
//!
//! A [`Deme`] owns every chromosome of the current generation together with
//! their cached fitness. One call to [`Deme::compute_next_generation`]
//! replaces the whole population:
//!
//! 1. select two parents by roulette wheel (self-pairing allowed)
//! 2. mutate each parent in place with probability `mutation_rate`
//! 3. recombine the pair with ordered crossover, keeping both children
//!
//! Mutation happens before recombination and on the parent itself, so a
//! mutated parent is also seen mutated by later selections of the same
//! generation.

use super::chromosome::Chromosome;
use super::config::{DemeConfig, OddSizePolicy};
use crate::cities::DistanceOracle;
use crate::error::{Result, TspError};
use crate::random::rng_from_seed;
use rand::rngs::StdRng;
use rand::Rng;
use tracing::instrument;

/// A population of tours evolved together.
///
/// # Examples
///
/// ```
/// use tsp_deme::ga::{Deme, DemeConfig};
/// use tsp_deme::{Cities, Point};
///
/// let cities = Cities::new(
///     (0..8)
///         .map(|i| Point::new(i as f64, ((i * 7) % 5) as f64))
///         .collect(),
/// );
/// let config = DemeConfig::default()
///     .with_population_size(20)
///     .with_mutation_rate(0.1)
///     .with_seed(42);
///
/// let mut deme = Deme::from_config(&cities, &config).unwrap();
/// for _ in 0..10 {
///     deme.compute_next_generation().unwrap();
/// }
/// let best = deme.get_best().unwrap();
/// assert!(best.is_valid());
/// ```
#[derive(Debug)]
pub struct Deme<O: DistanceOracle> {
    oracle: O,
    population: Vec<Chromosome>,
    fitness: Vec<f64>,
    mutation_rate: f64,
    odd_size_policy: OddSizePolicy,
    rng: StdRng,
    generation: usize,
}

impl<O: DistanceOracle> Deme<O> {
    /// Creates `pop_size` random chromosomes over the cities of `oracle`.
    ///
    /// `mutation_rate` is stored as given. Odd sizes use
    /// [`OddSizePolicy::CarryParent`].
    pub fn new(oracle: O, pop_size: usize, mutation_rate: f64, rng: StdRng) -> Result<Self> {
        Self::build(
            oracle,
            pop_size,
            mutation_rate,
            OddSizePolicy::default(),
            rng,
        )
    }

    /// Creates a deme from a validated configuration.
    pub fn from_config(oracle: O, config: &DemeConfig) -> Result<Self> {
        config.validate()?;
        Self::build(
            oracle,
            config.population_size,
            config.mutation_rate,
            config.odd_size_policy,
            rng_from_seed(config.seed),
        )
    }

    fn build(
        oracle: O,
        pop_size: usize,
        mutation_rate: f64,
        odd_size_policy: OddSizePolicy,
        mut rng: StdRng,
    ) -> Result<Self> {
        let population = (0..pop_size)
            .map(|_| Chromosome::random(&oracle, &mut rng))
            .collect::<Result<Vec<_>>>()?;
        let fitness = evaluate(&oracle, &population)?;

        tracing::debug!(
            population = pop_size,
            cities = oracle.city_count(),
            mutation_rate,
            "initialized deme"
        );

        Ok(Self {
            oracle,
            population,
            fitness,
            mutation_rate,
            odd_size_policy,
            rng,
            generation: 0,
        })
    }

    /// Advances the population by exactly one generation.
    ///
    /// The old population is dropped and replaced by the offspring. Borrows
    /// handed out by [`get_best`](Self::get_best) end before this call.
    #[instrument(level = "debug", skip(self), fields(generation = self.generation, population = self.population.len()))]
    pub fn compute_next_generation(&mut self) -> Result<()> {
        let size = self.population.len();
        if size % 2 == 1 && self.odd_size_policy == OddSizePolicy::Reject {
            return Err(TspError::PreconditionFailed(format!(
                "odd population size {size} is rejected by policy"
            )));
        }

        let pairs = size / 2;
        let mut next = Vec::with_capacity(size);

        for _ in 0..pairs {
            let first = self.select_parent()?;
            let second = self.select_parent()?;
            let (a, b) = self.breed_pair(first, second)?;
            next.push(a);
            next.push(b);
        }

        if size % 2 == 1 && self.odd_size_policy == OddSizePolicy::CarryParent {
            let idx = self.select_parent()?;
            next.push(self.population[idx].clone());
        }

        let fitness = evaluate(&self.oracle, &next)?;
        self.population = next;
        self.fitness = fitness;
        self.generation += 1;

        tracing::debug!(
            population = self.population.len(),
            best_fitness = self.fitness.iter().copied().fold(0.0, f64::max),
            "generation complete"
        );
        Ok(())
    }

    /// Mutates each parent in place with probability `mutation_rate`, then
    /// recombines the (possibly mutated) pair.
    fn breed_pair(&mut self, first: usize, second: usize) -> Result<(Chromosome, Chromosome)> {
        for idx in [first, second] {
            if self.rng.random::<f64>() < self.mutation_rate {
                self.mutate_in_place(idx)?;
            }
        }

        self.population[first].recombine(&self.population[second], &mut self.rng)
    }

    /// Mutates the chromosome at `idx` and refreshes its cached fitness.
    ///
    /// Nothing is written back unless the mutated tour can be evaluated.
    fn mutate_in_place(&mut self, idx: usize) -> Result<()> {
        let mut mutated = self.population[idx].clone();
        mutated.mutate(&mut self.rng);
        let fitness = mutated.fitness(&self.oracle)?;

        self.population[idx] = mutated;
        self.fitness[idx] = fitness;
        tracing::trace!(index = idx, fitness, "mutated parent");
        Ok(())
    }

    /// Fitness-proportionate (roulette-wheel) selection.
    ///
    /// Returns the index of the first chromosome, in storage order, at which
    /// the running fitness sum strictly exceeds a uniform draw from
    /// `[0, total)`. When the total fitness is not positive the choice is
    /// uniform.
    ///
    /// # Errors
    /// [`TspError::PreconditionFailed`] if the population is empty.
    pub fn select_parent(&mut self) -> Result<usize> {
        let n = self.population.len();
        if n == 0 {
            return Err(TspError::PreconditionFailed(
                "cannot select from empty population".into(),
            ));
        }

        let total: f64 = self.fitness.iter().sum();
        if !(total.is_finite() && total > 0.0) {
            return Ok(self.rng.random_range(0..n));
        }

        let threshold = self.rng.random_range(0.0..total);
        let mut partial = 0.0;
        for (i, &f) in self.fitness.iter().enumerate() {
            partial += f;
            if partial > threshold {
                return Ok(i);
            }
        }

        Ok(n - 1) // floating-point fallback
    }

    /// The fittest chromosome of the current population.
    ///
    /// Ties resolve to the first in storage order.
    ///
    /// # Errors
    /// [`TspError::PreconditionFailed`] unless the population holds more
    /// than one chromosome.
    pub fn get_best(&self) -> Result<&Chromosome> {
        let idx = self.best_index()?;
        Ok(&self.population[idx])
    }

    /// Fitness of [`get_best`](Self::get_best).
    pub fn best_fitness(&self) -> Result<f64> {
        let idx = self.best_index()?;
        Ok(self.fitness[idx])
    }

    fn best_index(&self) -> Result<usize> {
        if self.population.len() <= 1 {
            return Err(TspError::PreconditionFailed(format!(
                "population must hold more than one chromosome, has {}",
                self.population.len()
            )));
        }

        let mut best = 0;
        for (i, &f) in self.fitness.iter().enumerate().skip(1) {
            if f > self.fitness[best] {
                best = i;
            }
        }
        Ok(best)
    }

    pub fn population(&self) -> &[Chromosome] {
        &self.population
    }

    /// Cached fitness of the chromosome at `index`.
    pub fn fitness_of(&self, index: usize) -> Option<f64> {
        self.fitness.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.population.len()
    }

    pub fn is_empty(&self) -> bool {
        self.population.is_empty()
    }

    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    /// Number of completed generation steps.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }
}

fn evaluate<O: DistanceOracle>(oracle: &O, population: &[Chromosome]) -> Result<Vec<f64>> {
    population.iter().map(|c| c.fitness(oracle)).collect()
}

// ============================================================================
// Tests
// ============================================================================
