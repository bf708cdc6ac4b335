//! Core data types and the problem contract.
//!
//! [`Candidate`] is the unit of selection and reproduction. [`Problem`]
//! is the contract between the generic engine and a concrete optimization
//! problem: it creates genotypes and scores them.

use rand::RngCore;
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A candidate solution: genotype, fitness and age.
///
/// Fitness is `None` until the engine evaluates the candidate, and is set
/// exactly once. Higher fitness is better (maximization).
///
/// # Examples
///
/// ```
/// use u_evolve::ea::Candidate;
///
/// let c = Candidate::new(vec![2, 0, 1]);
/// assert!(c.fitness.is_none());
/// assert_eq!(c.age, 0);
/// assert_eq!(c.to_string(), "Candidate(fitness=unevaluated, age=0)");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Candidate<G> {
    /// The genetic material. Opaque to the engine.
    pub genotype: G,

    /// Fitness assigned by evaluation; `None` while unevaluated.
    pub fitness: Option<f64>,

    /// Number of generations this candidate has survived.
    pub age: usize,
}

impl<G> Candidate<G> {
    /// Wraps a genotype as a fresh, unevaluated candidate of age 0.
    pub fn new(genotype: G) -> Self {
        Self {
            genotype,
            fitness: None,
            age: 0,
        }
    }

    /// Returns the fitness if it is set and not NaN.
    ///
    /// Only such candidates count as fitness-bearing for best tracking
    /// and statistics.
    pub fn score(&self) -> Option<f64> {
        self.fitness.filter(|f| !f.is_nan())
    }
}

impl<G> fmt::Display for Candidate<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fitness {
            Some(fit) => write!(f, "Candidate(fitness={fit:.4}, age={})", self.age),
            None => write!(f, "Candidate(fitness=unevaluated, age={})", self.age),
        }
    }
}

/// Compares two candidates by fitness.
///
/// Unset or NaN fitness ranks strictly below every real fitness,
/// `-inf` included; two such candidates compare equal.
pub(crate) fn compare_fitness<G>(a: &Candidate<G>, b: &Candidate<G>) -> Ordering {
    match (a.score(), b.score()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort, best first.
pub(crate) fn sort_by_fitness_desc<G>(pool: &mut [Candidate<G>]) {
    pool.sort_by(|a, b| compare_fitness(b, a));
}

/// Index of the fittest candidate; the first one wins ties.
pub(crate) fn best_index<G>(pool: &[Candidate<G>]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, c) in pool.iter().enumerate() {
        match best {
            Some(b) if compare_fitness(c, &pool[b]) != Ordering::Greater => {}
            _ => best = Some(i),
        }
    }
    best
}

/// Defines an optimization problem for the engine.
///
/// # Thread Safety
///
/// `Problem` must be `Send + Sync`: with the `parallel` feature the engine
/// may call [`fitness`](Problem::fitness) from several rayon workers at
/// once.
///
/// # Implementing
///
/// ```
/// use rand::{seq::SliceRandom, RngCore};
/// use u_evolve::ea::Problem;
///
/// struct Sorted {
///     n: usize,
/// }
///
/// impl Problem for Sorted {
///     type Genotype = Vec<usize>;
///
///     fn initialize(&self, rng: &mut dyn RngCore) -> Vec<usize> {
///         let mut perm: Vec<usize> = (0..self.n).collect();
///         perm.shuffle(rng);
///         perm
///     }
///
///     fn fitness(&self, perm: &Vec<usize>) -> f64 {
///         perm.iter().enumerate().filter(|(i, v)| i == *v).count() as f64
///     }
/// }
/// ```
pub trait Problem: Send + Sync {
    /// Genotype representation.
    type Genotype: Clone + Send + Sync + fmt::Debug;

    /// Creates one fresh, independent genotype.
    fn initialize(&self, rng: &mut dyn RngCore) -> Self::Genotype;

    /// Scores a genotype. Higher is better. Must be free of side effects.
    fn fitness(&self, genotype: &Self::Genotype) -> f64;

    /// Name reported in the run configuration snapshot.
    fn name(&self) -> &str {
        "Problem"
    }
}

/// A [`Problem`] built from an initializer closure and a fitness closure.
///
/// ```
/// use rand::{Rng, RngCore};
/// use u_evolve::ea::{FnProblem, Problem};
///
/// let problem = FnProblem::new(
///     |rng: &mut dyn RngCore| rng.random_range(0..10u32),
///     |g: &u32| f64::from(*g),
/// );
/// assert_eq!(problem.fitness(&7), 7.0);
/// ```
pub struct FnProblem<G, I, F> {
    initializer: I,
    fitness: F,
    name: String,
    _genotype: PhantomData<fn() -> G>,
}

impl<G, I, F> FnProblem<G, I, F>
where
    I: Fn(&mut dyn RngCore) -> G + Send + Sync,
    F: Fn(&G) -> f64 + Send + Sync,
{
    /// Creates the adapter.
    pub fn new(initializer: I, fitness: F) -> Self {
        Self {
            initializer,
            fitness,
            name: "FnProblem".to_string(),
            _genotype: PhantomData,
        }
    }

    /// Sets the name reported in the configuration snapshot.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl<G, I, F> Problem for FnProblem<G, I, F>
where
    G: Clone + Send + Sync + fmt::Debug,
    I: Fn(&mut dyn RngCore) -> G + Send + Sync,
    F: Fn(&G) -> f64 + Send + Sync,
{
    type Genotype = G;

    fn initialize(&self, rng: &mut dyn RngCore) -> G {
        (self.initializer)(rng)
    }

    fn fitness(&self, genotype: &G) -> f64 {
        (self.fitness)(genotype)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
