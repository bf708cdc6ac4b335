//! Mutation strategies.
//!
//! A [`Mutation`] perturbs offspring in place. Each candidate is mutated
//! independently with the configured per-candidate [`Rate`].

use super::operators;
use super::schedule::Rate;
use super::types::Candidate;
use crate::error::Result;
use rand::{Rng, RngCore};

/// Perturbs offspring genotypes in place.
pub trait Mutation<G>: Send + Sync {
    /// Name reported in the run configuration snapshot.
    fn name(&self) -> &str;

    /// Mutates `offspring` for the given generation.
    fn mutate(
        &self,
        offspring: &mut [Candidate<G>],
        generation: usize,
        rng: &mut dyn RngCore,
    ) -> Result<()>;
}

/// Swap mutation over permutation genotypes.
///
/// See [`operators::swap_mutation`].
#[derive(Debug, Clone)]
pub struct SwapMutation {
    probability: Rate,
}

impl SwapMutation {
    /// Creates the strategy with a constant or scheduled per-candidate
    /// probability.
    pub fn new(probability: impl Into<Rate>) -> Self {
        Self {
            probability: probability.into(),
        }
    }
}

impl<T: Send + Sync> Mutation<Vec<T>> for SwapMutation {
    fn name(&self) -> &str {
        "SwapMutation"
    }

    fn mutate(
        &self,
        offspring: &mut [Candidate<Vec<T>>],
        generation: usize,
        rng: &mut dyn RngCore,
    ) -> Result<()> {
        let p = self.probability.resolve(generation);
        for child in offspring.iter_mut() {
            if rng.random::<f64>() < p {
                operators::swap_mutation(&mut child.genotype, rng);
            }
        }
        Ok(())
    }
}

/// Inversion mutation (reverse sequence mutation) over permutation
/// genotypes.
///
/// `[A, B, C, D, E, F]` with span `2..=4` becomes `[A, B, E, D, C, F]`.
/// See [`operators::invert_mutation`].
#[derive(Debug, Clone)]
pub struct InversionMutation {
    probability: Rate,
}

impl InversionMutation {
    /// Creates the strategy with a constant or scheduled per-candidate
    /// probability.
    pub fn new(probability: impl Into<Rate>) -> Self {
        Self {
            probability: probability.into(),
        }
    }
}

impl<T: Send + Sync> Mutation<Vec<T>> for InversionMutation {
    fn name(&self) -> &str {
        "InversionMutation"
    }

    fn mutate(
        &self,
        offspring: &mut [Candidate<Vec<T>>],
        generation: usize,
        rng: &mut dyn RngCore,
    ) -> Result<()> {
        let p = self.probability.resolve(generation);
        for child in offspring.iter_mut() {
            if rng.random::<f64>() < p {
                operators::invert_mutation(&mut child.genotype, rng);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn identity_offspring(count: usize, n: usize) -> Vec<Candidate<Vec<usize>>> {
        (0..count)
            .map(|_| Candidate::new((0..n).collect()))
            .collect()
    }

    fn strategies(p: f64) -> Vec<Box<dyn Mutation<Vec<usize>>>> {
        vec![
            Box::new(SwapMutation::new(p)),
            Box::new(InversionMutation::new(p)),
        ]
    }

    #[test]
    fn test_probability_one_mutates_every_candidate() {
        let mut rng = StdRng::seed_from_u64(42);
        for strategy in strategies(1.0) {
            let mut offspring = identity_offspring(20, 8);
            strategy.mutate(&mut offspring, 1, &mut rng).unwrap();
            for child in &offspring {
                assert_ne!(child.genotype, (0..8).collect::<Vec<_>>(), "{}", strategy.name());
                let mut genes = child.genotype.clone();
                genes.sort();
                assert_eq!(genes, (0..8).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn test_probability_zero_is_identity() {
        let mut rng = StdRng::seed_from_u64(42);
        for strategy in strategies(0.0) {
            let mut offspring = identity_offspring(20, 8);
            strategy.mutate(&mut offspring, 1, &mut rng).unwrap();
            assert!(offspring.iter().all(|c| c.genotype == (0..8).collect::<Vec<_>>()));
        }
    }

    #[test]
    fn test_short_genotypes_untouched() {
        let mut rng = StdRng::seed_from_u64(42);
        for strategy in strategies(1.0) {
            let mut offspring = identity_offspring(5, 1);
            strategy.mutate(&mut offspring, 1, &mut rng).unwrap();
            assert!(offspring.iter().all(|c| c.genotype == vec![0]));
        }
    }

    #[test]
    fn test_mutation_is_per_candidate() {
        let mut rng = StdRng::seed_from_u64(42);
        let swap = SwapMutation::new(0.5);
        let mut offspring = identity_offspring(400, 6);
        swap.mutate(&mut offspring, 1, &mut rng).unwrap();
        let changed = offspring
            .iter()
            .filter(|c| c.genotype != (0..6).collect::<Vec<_>>())
            .count();
        assert!(
            (120..280).contains(&changed),
            "expected about half mutated, got {changed}/400"
        );
    }

    #[test]
    fn test_scheduled_probability() {
        let mut rng = StdRng::seed_from_u64(42);
        let inversion = InversionMutation::new(Rate::scheduled(|g| if g == 0 { 1.0 } else { 0.0 }));
        let mut offspring = identity_offspring(10, 5);
        inversion.mutate(&mut offspring, 3, &mut rng).unwrap();
        assert!(offspring.iter().all(|c| c.genotype == (0..5).collect::<Vec<_>>()));
        inversion.mutate(&mut offspring, 0, &mut rng).unwrap();
        assert!(offspring.iter().all(|c| c.genotype != (0..5).collect::<Vec<_>>()));
    }
}
