//! Error type shared by the engine and every strategy.

/// Errors raised by the engine, the genetic operators and the selection
/// strategies.
///
/// Nothing is recovered internally: every error propagates to the caller
/// of [`Engine::run`](crate::ea::Engine::run).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A parameter failed validation at construction time.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The initial population yielded no candidate with a usable fitness.
    #[error("initial population evaluation produced no fitness-bearing candidate")]
    EmptyPopulation,

    /// Two paired parents carry genotypes of different length.
    #[error("genotype length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    /// Paired parents are not permutations of the same gene set.
    #[error("parents are not permutations of one another: {0}")]
    NotAPermutation(String),

    /// A strategy received fewer candidates than it needs.
    #[error("{strategy} requires at least {required} candidates, got {available}")]
    Capacity {
        strategy: &'static str,
        required: usize,
        available: usize,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
