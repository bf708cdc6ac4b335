//! Parent selection strategies.
//!
//! Parent selection decides which candidates reproduce. Both strategies
//! here return as many parents as there are candidates in the population;
//! a candidate may be picked any number of times.
//!
//! All strategies assume **maximization** (higher fitness = better).
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::{compare_fitness, Candidate};
use crate::error::{Error, Result};
use rand::seq::index;
use rand::{Rng, RngCore};
use std::cmp::Ordering;

/// Chooses the parents of the next generation.
pub trait ParentSelection<G>: Send + Sync {
    /// Name reported in the run configuration snapshot.
    fn name(&self) -> &str;

    /// Returns the selected parents, in draw order.
    fn select(&self, population: &[Candidate<G>], rng: &mut dyn RngCore)
        -> Result<Vec<Candidate<G>>>;
}

/// Tournament selection: `k` distinct contenders, the fittest wins.
///
/// Higher `k` = stronger selection pressure.
/// - k=2: light pressure (good for diversity)
/// - k=3-5: moderate pressure (typical default)
/// - k>5: strong pressure (risk of premature convergence)
///
/// Contenders are sampled without replacement within a tournament;
/// tournaments are independent of each other.
///
/// # Complexity
/// O(k) per tournament
///
/// # Examples
///
/// ```
/// use u_evolve::ea::TournamentSelection;
///
/// assert!(TournamentSelection::new(3).is_ok());
/// assert!(TournamentSelection::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentSelection {
    k: usize,
}

impl TournamentSelection {
    /// Creates a tournament of size `k`.
    ///
    /// # Errors
    /// [`Error::Configuration`] if `k == 0`.
    pub fn new(k: usize) -> Result<Self> {
        if k == 0 {
            return Err(Error::Configuration(
                "tournament size k must be at least 1".into(),
            ));
        }
        Ok(Self { k })
    }

    /// Tournament size.
    pub fn k(&self) -> usize {
        self.k
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self { k: 3 }
    }
}

impl<G: Clone> ParentSelection<G> for TournamentSelection {
    fn name(&self) -> &str {
        "TournamentSelection"
    }

    fn select(
        &self,
        population: &[Candidate<G>],
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Candidate<G>>> {
        let n = population.len();
        if n == 0 {
            return Ok(Vec::new());
        }
        if self.k > n {
            return Err(Error::Capacity {
                strategy: "TournamentSelection",
                required: self.k,
                available: n,
            });
        }

        let mut parents = Vec::with_capacity(n);
        for _ in 0..n {
            let winner = index::sample(rng, n, self.k).into_iter().fold(
                None,
                |best: Option<usize>, i| match best {
                    Some(b) if compare_fitness(&population[i], &population[b]) != Ordering::Greater => {
                        Some(b)
                    }
                    _ => Some(i),
                },
            );
            if let Some(w) = winner {
                parents.push(population[w].clone());
            }
        }
        Ok(parents)
    }
}

/// Uniform selection: every parent is drawn uniformly at random with
/// replacement, ignoring fitness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UniformSelection;

impl<G: Clone> ParentSelection<G> for UniformSelection {
    fn name(&self) -> &str {
        "UniformSelection"
    }

    fn select(
        &self,
        population: &[Candidate<G>],
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Candidate<G>>> {
        let n = population.len();
        Ok((0..n)
            .map(|_| population[rng.random_range(0..n)].clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ea::types::tests::scored;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn counts(parents: &[Candidate<usize>], n: usize) -> Vec<u32> {
        let mut counts = vec![0u32; n];
        for p in parents {
            counts[p.genotype] += 1;
        }
        counts
    }

    #[test]
    fn test_tournament_cardinality() {
        let pop = scored(&[3.0, 1.0, 4.0, 1.5, 9.0, 2.6]);
        let mut rng = StdRng::seed_from_u64(42);
        for k in 1..=pop.len() {
            let sel = TournamentSelection::new(k).unwrap();
            let parents = sel.select(&pop, &mut rng).unwrap();
            assert_eq!(parents.len(), pop.len());
            assert!(parents.iter().all(|p| pop.contains(p)));
        }
    }

    #[test]
    fn test_tournament_full_size_always_picks_best() {
        let pop = scored(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = StdRng::seed_from_u64(42);
        let sel = TournamentSelection::new(4).unwrap();
        let parents = sel.select(&pop, &mut rng).unwrap();
        assert!(parents.iter().all(|p| p.genotype == 0));
    }

    #[test]
    fn test_tournament_never_picks_worst_with_k2() {
        // The worst candidate loses every tournament it enters.
        let pop = scored(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = StdRng::seed_from_u64(42);
        let sel = TournamentSelection::new(2).unwrap();
        for _ in 0..200 {
            let parents = sel.select(&pop, &mut rng).unwrap();
            assert!(parents.iter().all(|p| p.genotype != 2));
        }
    }

    #[test]
    fn test_tournament_size_1_is_random() {
        let pop = scored(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = StdRng::seed_from_u64(42);
        let sel = TournamentSelection::new(1).unwrap();
        let mut parents = Vec::new();
        for _ in 0..2500 {
            parents.extend(sel.select(&pop, &mut rng).unwrap());
        }
        for &c in &counts(&parents, 4) {
            assert!(c > 2000, "expected uniform, got counts: {:?}", counts(&parents, 4));
        }
    }

    #[test]
    fn test_tournament_empty_population() {
        let mut rng = StdRng::seed_from_u64(42);
        let sel = TournamentSelection::new(3).unwrap();
        assert!(sel.select(&scored(&[]), &mut rng).unwrap().is_empty());
    }

    #[test]
    fn test_tournament_larger_than_population() {
        let mut rng = StdRng::seed_from_u64(42);
        let sel = TournamentSelection::new(5).unwrap();
        let err = sel.select(&scored(&[1.0, 2.0]), &mut rng).unwrap_err();
        assert!(matches!(
            err,
            Error::Capacity {
                required: 5,
                available: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_tournament_rejects_zero() {
        assert!(matches!(
            TournamentSelection::new(0),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_uniform_cardinality_and_spread() {
        let pop = scored(&[100.0, 50.0, 1.0, 80.0]);
        let mut rng = StdRng::seed_from_u64(42);
        let mut parents = Vec::new();
        for _ in 0..2500 {
            let batch = UniformSelection.select(&pop, &mut rng).unwrap();
            assert_eq!(batch.len(), 4);
            parents.extend(batch);
        }
        for &c in &counts(&parents, 4) {
            assert!(c > 2000, "expected uniform, got {:?}", counts(&parents, 4));
        }
    }

    #[test]
    fn test_uniform_empty_population() {
        let mut rng = StdRng::seed_from_u64(42);
        assert!(UniformSelection.select(&scored(&[]), &mut rng).unwrap().is_empty());
    }
}
