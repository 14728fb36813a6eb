//! A single candidate tour.
//!
//! A [`Chromosome`] owns one permutation of city indices `0..n`. Every
//! public operation keeps it a permutation: swap mutation trivially, ordered
//! crossover by construction (checked before the child is handed out).
//!
//! # Operators
//!
//! - [`Chromosome::mutate`]: exchange two random positions, O(1)
//! - [`Chromosome::recombine`]: ordered crossover (OX) producing two children
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"

use crate::cities::DistanceOracle;
use crate::error::{Result, TspError};
use crate::random::random_permutation;
use rand::Rng;

/// One candidate tour: a permutation of `0..city_count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chromosome {
    ordering: Vec<usize>,
}

impl Chromosome {
    /// Creates a uniformly random tour over all cities of `oracle`.
    ///
    /// # Errors
    /// [`TspError::PreconditionFailed`] if the oracle has no cities.
    pub fn random<O, R>(oracle: &O, rng: &mut R) -> Result<Self>
    where
        O: DistanceOracle + ?Sized,
        R: Rng,
    {
        let n = oracle.city_count();
        if n == 0 {
            return Err(TspError::PreconditionFailed(
                "cannot build a tour over zero cities".into(),
            ));
        }

        let chromosome = Self {
            ordering: random_permutation(n, rng),
        };
        chromosome.ensure_valid()?;
        Ok(chromosome)
    }

    /// Wraps an explicit ordering, checking that it is a non-empty permutation.
    pub fn from_ordering(ordering: Vec<usize>) -> Result<Self> {
        if ordering.is_empty() {
            return Err(TspError::PreconditionFailed(
                "cannot build a tour over zero cities".into(),
            ));
        }

        let chromosome = Self { ordering };
        chromosome.ensure_valid()?;
        Ok(chromosome)
    }

    /// The visiting order of this tour.
    pub fn ordering(&self) -> &[usize] {
        &self.ordering
    }

    pub fn city_count(&self) -> usize {
        self.ordering.len()
    }

    pub fn into_ordering(self) -> Vec<usize> {
        self.ordering
    }

    // ------------------------------------------------------------------------
    // Genetic operators
    // ------------------------------------------------------------------------

    /// Swaps the cities at two independently drawn positions.
    ///
    /// Both positions may coincide, in which case the tour is unchanged.
    pub fn mutate<R: Rng>(&mut self, rng: &mut R) {
        let n = self.ordering.len();
        let i = rng.random_range(0..n);
        let j = rng.random_range(0..n);
        self.ordering.swap(i, j);
    }

    /// Ordered crossover with `other`, returning two new children.
    ///
    /// Two cut points are drawn independently from `0..n`; the window
    /// `[min, max)` is kept verbatim from one parent and the remaining
    /// positions are filled from the other. The first child keeps the window
    /// of `self`, the second the window of `other`.
    ///
    /// # Errors
    /// [`TspError::PreconditionFailed`] if the parents differ in length,
    /// [`TspError::InvariantViolation`] if either parent is not a permutation.
    pub fn recombine<R: Rng>(
        &self,
        other: &Chromosome,
        rng: &mut R,
    ) -> Result<(Chromosome, Chromosome)> {
        let n = self.ordering.len();
        if n != other.ordering.len() {
            return Err(TspError::PreconditionFailed(format!(
                "parents must have equal length, got {} and {}",
                n,
                other.ordering.len()
            )));
        }

        let a = rng.random_range(0..n);
        let b = rng.random_range(0..n);
        let (begin, end) = if a <= b { (a, b) } else { (b, a) };

        let first = Self::create_crossover_child(self, other, begin, end)?;
        let second = Self::create_crossover_child(other, self, begin, end)?;
        Ok((first, second))
    }

    /// Builds one OX child of `p1` and `p2` for the window `[begin, end)`.
    ///
    /// Positions inside the window are copied from `p1`. The other positions
    /// are filled left to right with the values of `p2`, in `p2`'s order,
    /// skipping any value that already sits in `p1`'s window.
    ///
    /// ```
    /// use tsp_deme::ga::Chromosome;
    ///
    /// let p1 = Chromosome::from_ordering(vec![0, 1, 2, 3, 4]).unwrap();
    /// let p2 = Chromosome::from_ordering(vec![4, 3, 2, 1, 0]).unwrap();
    /// let child = Chromosome::create_crossover_child(&p1, &p2, 1, 3).unwrap();
    /// assert_eq!(child.ordering(), &[4, 1, 2, 3, 0]);
    /// ```
    ///
    /// # Errors
    /// [`TspError::PreconditionFailed`] for mismatched lengths or a window
    /// outside `0..=n`; [`TspError::InvariantViolation`] if a parent is not a
    /// permutation or the child would not be one.
    pub fn create_crossover_child(
        p1: &Chromosome,
        p2: &Chromosome,
        begin: usize,
        end: usize,
    ) -> Result<Chromosome> {
        let n = p1.ordering.len();
        if n != p2.ordering.len() {
            return Err(TspError::PreconditionFailed(format!(
                "parents must have equal length, got {} and {}",
                n,
                p2.ordering.len()
            )));
        }
        if begin > end || end > n {
            return Err(TspError::PreconditionFailed(format!(
                "crossover window [{begin}, {end}) does not fit {n} cities"
            )));
        }
        p1.ensure_valid()?;
        p2.ensure_valid()?;

        let mut donor = p2
            .ordering
            .iter()
            .copied()
            .filter(|&value| !p1.is_in_range(value, begin, end));

        let mut ordering = Vec::with_capacity(n);
        for i in 0..n {
            if (begin..end).contains(&i) {
                ordering.push(p1.ordering[i]);
            } else {
                let value = donor.next().ok_or_else(|| {
                    TspError::InvariantViolation(format!(
                        "second parent exhausted while filling position {i}"
                    ))
                })?;
                ordering.push(value);
            }
        }

        let child = Chromosome { ordering };
        child.ensure_valid()?;
        Ok(child)
    }

    // ------------------------------------------------------------------------
    // Evaluation
    // ------------------------------------------------------------------------

    /// Inverse of the tour length reported by `oracle`. Higher is better.
    ///
    /// # Errors
    /// [`TspError::PreconditionFailed`] if the tour length differs from the
    /// oracle's city count; [`TspError::DegenerateDistance`] when the
    /// distance is zero, negative or not finite.
    pub fn fitness<O: DistanceOracle + ?Sized>(&self, oracle: &O) -> Result<f64> {
        if self.ordering.len() != oracle.city_count() {
            return Err(TspError::PreconditionFailed(format!(
                "tour over {} cities evaluated against an oracle of {}",
                self.ordering.len(),
                oracle.city_count()
            )));
        }

        let distance = oracle.total_path_distance(&self.ordering);
        if !(distance.is_finite() && distance > 0.0) {
            return Err(TspError::DegenerateDistance(distance));
        }
        Ok(1.0 / distance)
    }

    /// Whether the ordering is a permutation of `0..n`.
    ///
    /// Sorts a copy, so O(n log n).
    pub fn is_valid(&self) -> bool {
        let n = self.ordering.len();
        if self.ordering.iter().any(|&v| v >= n) {
            return false;
        }

        let mut sorted = self.ordering.clone();
        sorted.sort_unstable();
        sorted.windows(2).all(|w| w[0] != w[1])
    }

    /// Whether `value` appears in `ordering[begin..end)`.
    ///
    /// A window reaching past the end of the tour contains nothing.
    pub fn is_in_range(&self, value: usize, begin: usize, end: usize) -> bool {
        self.ordering
            .get(begin..end)
            .is_some_and(|window| window.contains(&value))
    }

    fn ensure_valid(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(TspError::InvariantViolation(format!(
                "ordering {:?} is not a permutation of 0..{}",
                self.ordering,
                self.ordering.len()
            )))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
