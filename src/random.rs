//! Seeded random sources.
//!
//! Every stochastic operation in the crate draws from a single
//! explicitly-seeded generator owned by the caller, so a run is fully
//! reproducible from its seed.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Creates a deterministic random generator from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from `seed`, or from OS entropy when `None`.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

/// Returns a uniformly random permutation of `0..len`.
pub fn random_permutation<R: Rng>(len: usize, rng: &mut R) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..len).collect();
    perm.shuffle(rng);
    perm
}
