//! Error type shared by every module of the crate.

use std::io;

/// Crate-wide result alias.
pub type Result<T, E = TspError> = std::result::Result<T, E>;

/// Errors raised by the GA core and its city-loading collaborator.
///
/// The first two variants signal programming errors (a broken invariant or a
/// violated precondition) rather than bad user input. They are surfaced as
/// values so callers and tests can observe them without aborting.
#[derive(Debug, thiserror::Error)]
pub enum TspError {
    /// A chromosome ordering is no longer a permutation of `0..n`.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// An operation was called on inputs it does not accept.
    #[error("precondition failed: {0}")]
    PreconditionFailed(String),

    /// The distance oracle returned a distance that has no finite inverse.
    #[error("degenerate tour distance {0}: fitness is undefined")]
    DegenerateDistance(f64),

    /// A [`DemeConfig`](crate::ga::DemeConfig) parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A line of a city file could not be parsed.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}
