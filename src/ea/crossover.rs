//! Crossover strategies.
//!
//! A [`Crossover`] turns an ordered list of parents into offspring.
//! Parents are consumed pairwise; an odd last parent is copied through.
//! Each pair recombines with the configured [`Rate`], otherwise both
//! parents are copied. Offspring are always fresh candidates: fitness
//! unset, age 0.

use super::operators;
use super::schedule::Rate;
use super::types::Candidate;
use crate::error::{Error, Result};
use rand::{Rng, RngCore};
use std::hash::Hash;

/// Recombines parents into offspring.
pub trait Crossover<G>: Send + Sync {
    /// Name reported in the run configuration snapshot.
    fn name(&self) -> &str;

    /// Produces offspring from `parents` for the given generation.
    fn crossover(
        &self,
        parents: &[Candidate<G>],
        generation: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Candidate<G>>>;
}

/// Ordered Crossover (OX1) over permutation genotypes.
///
/// See [`operators::order_crossover`].
///
/// ```
/// use u_evolve::ea::{Candidate, Crossover, OrderedCrossover};
/// use rand::SeedableRng;
///
/// let ox = OrderedCrossover::new(1.0);
/// let parents = vec![
///     Candidate::new(vec![0, 1, 2, 3]),
///     Candidate::new(vec![3, 2, 1, 0]),
/// ];
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let offspring = ox.crossover(&parents, 1, &mut rng).unwrap();
/// assert_eq!(offspring.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct OrderedCrossover {
    rate: Rate,
}

impl OrderedCrossover {
    /// Creates the strategy with a constant or scheduled rate.
    pub fn new(rate: impl Into<Rate>) -> Self {
        Self { rate: rate.into() }
    }
}

impl Default for OrderedCrossover {
    fn default() -> Self {
        Self::new(0.9)
    }
}

impl<T> Crossover<Vec<T>> for OrderedCrossover
where
    T: Clone + Eq + Hash + Send + Sync,
{
    fn name(&self) -> &str {
        "OrderedCrossover"
    }

    fn crossover(
        &self,
        parents: &[Candidate<Vec<T>>],
        generation: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Candidate<Vec<T>>>> {
        let rate = self.rate.resolve(generation);
        recombine_pairs(parents, rate, rng, |p1, p2, rng| {
            operators::order_crossover(p1, p2, rng)
        })
    }
}

/// Cycle Crossover (CX) over permutation genotypes.
///
/// See [`operators::cycle_crossover`].
#[derive(Debug, Clone)]
pub struct CycleCrossover {
    rate: Rate,
}

impl CycleCrossover {
    /// Creates the strategy with a constant or scheduled rate.
    pub fn new(rate: impl Into<Rate>) -> Self {
        Self { rate: rate.into() }
    }
}

impl Default for CycleCrossover {
    fn default() -> Self {
        Self::new(0.9)
    }
}

impl<T> Crossover<Vec<T>> for CycleCrossover
where
    T: Clone + Eq + Hash + Send + Sync,
{
    fn name(&self) -> &str {
        "CycleCrossover"
    }

    fn crossover(
        &self,
        parents: &[Candidate<Vec<T>>],
        generation: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Candidate<Vec<T>>>> {
        let rate = self.rate.resolve(generation);
        recombine_pairs(parents, rate, rng, |p1, p2, _rng| {
            operators::cycle_crossover(p1, p2)
        })
    }
}

/// Shared pairing loop: odd tail, length check, short genotypes, rate gate.
fn recombine_pairs<T, F>(
    parents: &[Candidate<Vec<T>>],
    rate: f64,
    rng: &mut dyn RngCore,
    mut recombine: F,
) -> Result<Vec<Candidate<Vec<T>>>>
where
    T: Clone,
    F: FnMut(&[T], &[T], &mut dyn RngCore) -> Result<(Vec<T>, Vec<T>)>,
{
    let mut offspring = Vec::with_capacity(parents.len());

    for pair in parents.chunks(2) {
        let [p1, p2] = pair else {
            offspring.push(Candidate::new(pair[0].genotype.clone()));
            continue;
        };

        let (g1, g2) = (&p1.genotype, &p2.genotype);
        if g1.len() != g2.len() {
            return Err(Error::LengthMismatch {
                left: g1.len(),
                right: g2.len(),
            });
        }

        if g1.len() < 2 || rng.random::<f64>() >= rate {
            offspring.push(Candidate::new(g1.clone()));
            offspring.push(Candidate::new(g2.clone()));
            continue;
        }

        let (c1, c2) = recombine(g1, g2, &mut *rng)?;
        offspring.push(Candidate::new(c1));
        offspring.push(Candidate::new(c2));
    }

    Ok(offspring)
}
