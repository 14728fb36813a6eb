//! Deme configuration.
//!
//! [`DemeConfig`] holds every parameter that shapes a run: population size,
//! mutation rate, odd-size handling and the random seed.

use crate::error::{Result, TspError};

/// What a generation step does when the population size is odd.
///
/// Offspring come in pairs, so an odd population cannot be refilled by
/// crossover alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OddSizePolicy {
    /// Carry one extra roulette-selected parent into the next generation
    /// unchanged, keeping the size constant.
    #[default]
    CarryParent,

    /// Keep only the `2 * floor(n / 2)` offspring. The population loses one
    /// slot on the first generation and stays even afterwards.
    Truncate,

    /// Refuse to build a deme with an odd population size.
    Reject,
}

/// Configuration for a [`Deme`](super::Deme).
///
/// # Defaults
///
/// ```
/// use tsp_deme::ga::DemeConfig;
///
/// let config = DemeConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert!(config.seed.is_none());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use tsp_deme::ga::{DemeConfig, OddSizePolicy};
///
/// let config = DemeConfig::default()
///     .with_population_size(50)
///     .with_mutation_rate(0.2)
///     .with_odd_size_policy(OddSizePolicy::Reject)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DemeConfig {
    /// Number of chromosomes in the population.
    pub population_size: usize,

    /// Probability that a selected parent is mutated before crossover (0.0–1.0).
    pub mutation_rate: f64,

    /// Handling of odd population sizes.
    pub odd_size_policy: OddSizePolicy,

    /// Random seed for reproducibility.
    ///
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for DemeConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            mutation_rate: 0.05,
            odd_size_policy: OddSizePolicy::default(),
            seed: None,
        }
    }
}

impl DemeConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the mutation rate, clamped to `[0, 1]`.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the odd-size policy.
    pub fn with_odd_size_policy(mut self, policy: OddSizePolicy) -> Self {
        self.odd_size_policy = policy;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks every parameter.
    ///
    /// # Errors
    /// [`TspError::InvalidConfig`] describing the first offending parameter.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(TspError::InvalidConfig(
                "population_size must be at least 2".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(TspError::InvalidConfig(format!(
                "mutation_rate must lie in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if self.odd_size_policy == OddSizePolicy::Reject && self.population_size % 2 == 1 {
            return Err(TspError::InvalidConfig(format!(
                "population_size must be even, got {}",
                self.population_size
            )));
        }
        Ok(())
    }
}
