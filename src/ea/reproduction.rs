//! Reproduction pipelines.
//!
//! The engine sees reproduction as a single step: parents and the
//! generation index go in, fresh offspring come out. These pipelines
//! compose the crossover and mutation strategies into that step.

use super::crossover::Crossover;
use super::mutation::Mutation;
use super::types::Candidate;
use crate::error::Result;
use rand::RngCore;

/// Creates offspring from selected parents.
pub trait Reproduction<G>: Send + Sync {
    /// Name reported in the run configuration snapshot.
    fn name(&self) -> &str;

    /// Produces unevaluated offspring of age 0.
    fn reproduce(
        &self,
        parents: &[Candidate<G>],
        generation: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Candidate<G>>>;
}

/// Crossover followed by mutation of every offspring.
///
/// ```
/// use u_evolve::ea::{OrderedCrossover, Reproduction, StandardReproduction, SwapMutation};
///
/// let repro = StandardReproduction::<Vec<u32>>::new(
///     OrderedCrossover::new(0.9),
///     SwapMutation::new(0.2),
/// );
/// assert_eq!(repro.name(), "StandardReproduction(OrderedCrossover + SwapMutation)");
/// ```
pub struct StandardReproduction<G> {
    crossover: Box<dyn Crossover<G>>,
    mutation: Box<dyn Mutation<G>>,
    label: String,
}

impl<G> StandardReproduction<G> {
    /// Composes a crossover and a mutation strategy.
    pub fn new(
        crossover: impl Crossover<G> + 'static,
        mutation: impl Mutation<G> + 'static,
    ) -> Self {
        let label = format!(
            "StandardReproduction({} + {})",
            crossover.name(),
            mutation.name()
        );
        Self {
            crossover: Box::new(crossover),
            mutation: Box::new(mutation),
            label,
        }
    }
}

impl<G> Reproduction<G> for StandardReproduction<G> {
    fn name(&self) -> &str {
        &self.label
    }

    fn reproduce(
        &self,
        parents: &[Candidate<G>],
        generation: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Candidate<G>>> {
        let mut offspring = self.crossover.crossover(parents, generation, rng)?;
        self.mutation.mutate(&mut offspring, generation, rng)?;
        Ok(offspring)
    }
}

/// Fresh copies of every parent, then mutation. No recombination.
pub struct MutationOnlyReproduction<G> {
    mutation: Box<dyn Mutation<G>>,
    label: String,
}

impl<G> MutationOnlyReproduction<G> {
    /// Wraps a mutation strategy.
    pub fn new(mutation: impl Mutation<G> + 'static) -> Self {
        let label = format!("MutationOnlyReproduction({})", mutation.name());
        Self {
            mutation: Box::new(mutation),
            label,
        }
    }
}

impl<G: Clone> Reproduction<G> for MutationOnlyReproduction<G> {
    fn name(&self) -> &str {
        &self.label
    }

    fn reproduce(
        &self,
        parents: &[Candidate<G>],
        generation: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Candidate<G>>> {
        let mut offspring: Vec<Candidate<G>> = parents
            .iter()
            .map(|p| Candidate::new(p.genotype.clone()))
            .collect();
        self.mutation.mutate(&mut offspring, generation, rng)?;
        Ok(offspring)
    }
}
