//! Survivor selection strategies.
//!
//! Survivor selection builds the next live population from the aged
//! current population (mu) and the evaluated offspring (lambda). Sorting is
//! stable and best-first; candidates without a usable fitness rank last.
//!
//! # References
//!
//! - Schwefel (1981), *Numerical Optimization of Computer Models*
//! - Eiben & Smith (2015), *Introduction to Evolutionary Computing*, ch. 5

use super::types::{sort_by_fitness_desc, Candidate};
use crate::error::{Error, Result};

/// Chooses the next live population.
pub trait SurvivorSelection<G>: Send + Sync {
    /// Name reported in the run configuration snapshot.
    fn name(&self) -> &str;

    /// Returns the next population from the aged population and the
    /// evaluated offspring.
    fn select(
        &self,
        population: Vec<Candidate<G>>,
        offspring: Vec<Candidate<G>>,
    ) -> Result<Vec<Candidate<G>>>;
}

fn check_population_size(population_size: usize) -> Result<()> {
    if population_size == 0 {
        return Err(Error::Configuration(
            "population_size must be at least 1".into(),
        ));
    }
    Ok(())
}

/// (mu + lambda) selection: the best `population_size` of parents and
/// offspring together.
///
/// Elitist: the best fitness in the population never decreases.
///
/// ```
/// use u_evolve::ea::{Candidate, PlusSelection, SurvivorSelection};
///
/// let scored = |f: f64| Candidate { genotype: (), fitness: Some(f), age: 0 };
/// let plus = PlusSelection::new(2).unwrap();
/// let next = plus
///     .select(vec![scored(5.0), scored(1.0)], vec![scored(3.0)])
///     .unwrap();
/// let kept: Vec<_> = next.iter().map(|c| c.fitness.unwrap()).collect();
/// assert_eq!(kept, vec![5.0, 3.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlusSelection {
    population_size: usize,
}

impl PlusSelection {
    /// # Errors
    /// [`Error::Configuration`] if `population_size == 0`.
    pub fn new(population_size: usize) -> Result<Self> {
        check_population_size(population_size)?;
        Ok(Self { population_size })
    }
}

impl<G: Send + Sync> SurvivorSelection<G> for PlusSelection {
    fn name(&self) -> &str {
        "PlusSelection"
    }

    fn select(
        &self,
        mut population: Vec<Candidate<G>>,
        offspring: Vec<Candidate<G>>,
    ) -> Result<Vec<Candidate<G>>> {
        population.extend(offspring);
        sort_by_fitness_desc(&mut population);
        population.truncate(self.population_size);
        Ok(population)
    }
}

/// (mu, lambda) selection: the best `population_size` offspring; the old
/// population is discarded.
///
/// Requires reproduction to produce at least `population_size` offspring.
/// Not elitist: the best solution can be lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommaSelection {
    population_size: usize,
}

impl CommaSelection {
    /// # Errors
    /// [`Error::Configuration`] if `population_size == 0`.
    pub fn new(population_size: usize) -> Result<Self> {
        check_population_size(population_size)?;
        Ok(Self { population_size })
    }
}

impl<G: Send + Sync> SurvivorSelection<G> for CommaSelection {
    fn name(&self) -> &str {
        "CommaSelection"
    }

    fn select(
        &self,
        _population: Vec<Candidate<G>>,
        mut offspring: Vec<Candidate<G>>,
    ) -> Result<Vec<Candidate<G>>> {
        if offspring.len() < self.population_size {
            return Err(Error::Capacity {
                strategy: "CommaSelection",
                required: self.population_size,
                available: offspring.len(),
            });
        }
        sort_by_fitness_desc(&mut offspring);
        offspring.truncate(self.population_size);
        Ok(offspring)
    }
}

/// (mu + lambda) selection that first retires every candidate older than
/// `max_age`.
///
/// Offspring (age 0) always pass the age filter. If fewer than
/// `population_size` candidates pass, the returned population is smaller
/// than the target and stays smaller in later generations, unless
/// [`with_backfill`](Self::with_backfill) is set, in which case the gap is
/// filled with the fittest retired candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlusAgeBasedSelection {
    population_size: usize,
    max_age: usize,
    backfill: bool,
}

impl PlusAgeBasedSelection {
    /// # Errors
    /// [`Error::Configuration`] if `population_size == 0`.
    pub fn new(population_size: usize, max_age: usize) -> Result<Self> {
        check_population_size(population_size)?;
        Ok(Self {
            population_size,
            max_age,
            backfill: false,
        })
    }

    /// Refill an undersized population from the fittest over-age
    /// candidates.
    pub fn with_backfill(mut self) -> Self {
        self.backfill = true;
        self
    }
}

impl<G: Send + Sync> SurvivorSelection<G> for PlusAgeBasedSelection {
    fn name(&self) -> &str {
        "PlusAgeBasedSelection"
    }

    fn select(
        &self,
        mut population: Vec<Candidate<G>>,
        offspring: Vec<Candidate<G>>,
    ) -> Result<Vec<Candidate<G>>> {
        population.extend(offspring);
        let (mut eligible, mut retired): (Vec<_>, Vec<_>) = population
            .into_iter()
            .partition(|c| c.age <= self.max_age);

        sort_by_fitness_desc(&mut eligible);
        eligible.truncate(self.population_size);

        if eligible.len() < self.population_size {
            if self.backfill {
                sort_by_fitness_desc(&mut retired);
                let missing = self.population_size - eligible.len();
                eligible.extend(retired.into_iter().take(missing));
            } else {
                tracing::warn!(
                    survivors = eligible.len(),
                    population_size = self.population_size,
                    max_age = self.max_age,
                    "age filter left the population undersized"
                );
            }
        }
        Ok(eligible)
    }
}
