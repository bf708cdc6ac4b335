//! Generational loop execution.
//!
//! [`Engine`] orchestrates the evolutionary process:
//! initialization → evaluation → parent selection → reproduction →
//! evaluation → aging → survivor selection → repeat.
//!
//! The engine owns the live population and the run [`History`]. Every
//! stochastic decision is delegated to the injected strategies, which all
//! draw from one [`StdRng`] seeded at the start of the run.

use super::config::EngineConfig;
use super::history::{GenerationStats, History};
use super::logger::{ConfigSnapshot, EvolutionLogger, NullLogger};
use super::reproduction::Reproduction;
use super::selection::ParentSelection;
use super::survivor::SurvivorSelection;
use super::types::{best_index, Candidate, Problem};
use crate::error::{Error, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Outcome of a completed (or cancelled) run.
#[derive(Debug, Clone)]
pub struct RunResult<G> {
    /// The fittest candidate evaluated at any point of the run.
    pub best: Candidate<G>,

    /// Statistics of every generation that had a fitness-bearing
    /// population, generation 0 included.
    pub history: History,

    /// Number of generations completed after generation 0.
    pub generations: usize,

    /// Whether the run stopped on the cancellation flag.
    pub cancelled: bool,

    /// Seed the run's generator was built from.
    pub seed: u64,
}

/// The evolutionary-algorithm engine.
///
/// # Usage
///
/// ```
/// use rand::seq::SliceRandom;
/// use rand::RngCore;
/// use u_evolve::ea::{
///     Engine, EngineConfig, FnProblem, OrderedCrossover, PlusSelection,
///     StandardReproduction, SwapMutation, TournamentSelection,
/// };
///
/// let problem = FnProblem::new(
///     |rng: &mut dyn RngCore| {
///         let mut perm: Vec<usize> = (0..8).collect();
///         perm.shuffle(rng);
///         perm
///     },
///     |perm: &Vec<usize>| perm.iter().enumerate().filter(|(i, v)| i == *v).count() as f64,
/// );
///
/// let mut engine = Engine::new(
///     problem,
///     EngineConfig::default().with_population_size(20).with_seed(7),
///     TournamentSelection::new(3).unwrap(),
///     StandardReproduction::new(OrderedCrossover::new(0.9), SwapMutation::new(0.2)),
///     PlusSelection::new(20).unwrap(),
/// )
/// .unwrap();
///
/// let result = engine.run(30).unwrap();
/// assert_eq!(result.generations, 30);
/// assert_eq!(result.history.len(), 31);
/// ```
pub struct Engine<P: Problem> {
    problem: P,
    config: EngineConfig,
    parent_selection: Box<dyn ParentSelection<P::Genotype>>,
    reproduction: Box<dyn Reproduction<P::Genotype>>,
    survivor_selection: Box<dyn SurvivorSelection<P::Genotype>>,
    logger: Box<dyn EvolutionLogger<P::Genotype>>,
}

impl<P: Problem> Engine<P> {
    /// Assembles an engine with the no-op logger.
    ///
    /// # Errors
    /// [`Error::Configuration`] if `config` fails validation.
    pub fn new(
        problem: P,
        config: EngineConfig,
        parent_selection: impl ParentSelection<P::Genotype> + 'static,
        reproduction: impl Reproduction<P::Genotype> + 'static,
        survivor_selection: impl SurvivorSelection<P::Genotype> + 'static,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            problem,
            config,
            parent_selection: Box::new(parent_selection),
            reproduction: Box::new(reproduction),
            survivor_selection: Box::new(survivor_selection),
            logger: Box::new(NullLogger),
        })
    }

    /// Replaces the logger.
    pub fn with_logger(mut self, logger: impl EvolutionLogger<P::Genotype> + 'static) -> Self {
        self.logger = Box::new(logger);
        self
    }

    /// The problem being optimized.
    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// The validated run configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs generation 0 plus `generations` generations.
    ///
    /// # Errors
    /// [`Error::EmptyPopulation`] if no initial candidate is fitness-bearing;
    /// any error raised by a strategy. The logger is closed either way.
    pub fn run(&mut self, generations: usize) -> Result<RunResult<P::Genotype>> {
        self.execute(generations, None)
    }

    /// Like [`run`](Self::run), but checks `cancel` at the start of every
    /// generation and stops early once it is set.
    pub fn run_with_cancel(
        &mut self,
        generations: usize,
        cancel: Arc<AtomicBool>,
    ) -> Result<RunResult<P::Genotype>> {
        self.execute(generations, Some(&cancel))
    }

    fn execute(
        &mut self,
        generations: usize,
        cancel: Option<&AtomicBool>,
    ) -> Result<RunResult<P::Genotype>> {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        tracing::info!(
            problem = self.problem.name(),
            population_size = self.config.population_size,
            seed,
            generations,
            "evolution started"
        );

        let snapshot = self.config_snapshot(seed);
        report("on_start", self.logger.on_start(&snapshot));

        let outcome = self.evolve(generations, seed, cancel);
        match &outcome {
            Ok(result) => {
                tracing::info!(
                    generations = result.generations,
                    best_fitness = ?result.best.fitness,
                    cancelled = result.cancelled,
                    "evolution finished"
                );
                report("on_end", self.logger.on_end(&result.best, result.generations));
            }
            Err(err) => tracing::info!(error = %err, "evolution aborted"),
        }
        report("close", self.logger.close());
        outcome
    }

    fn evolve(
        &mut self,
        generations: usize,
        seed: u64,
        cancel: Option<&AtomicBool>,
    ) -> Result<RunResult<P::Genotype>> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut history = History::new();
        let mut best: Option<Candidate<P::Genotype>> = None;

        // 1. Initial population
        let mut population: Vec<Candidate<P::Genotype>> = (0..self.config.population_size)
            .map(|_| Candidate::new(self.problem.initialize(&mut rng)))
            .collect();
        self.evaluate(&mut population, &mut best);
        if best.is_none() {
            return Err(Error::EmptyPopulation);
        }
        self.record(0, &population, &mut history);

        // 2. Generational loop
        let mut completed = 0;
        let mut cancelled = false;
        for generation in 1..=generations {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                cancelled = true;
                break;
            }

            let parents = self.parent_selection.select(&population, &mut rng)?;
            let mut offspring = self.reproduction.reproduce(&parents, generation, &mut rng)?;
            self.evaluate(&mut offspring, &mut best);

            for candidate in &mut population {
                candidate.age += 1;
            }
            population = self.survivor_selection.select(population, offspring)?;

            self.record(generation, &population, &mut history);
            completed = generation;
        }

        let best = best.ok_or(Error::EmptyPopulation)?;
        Ok(RunResult {
            best,
            history,
            generations: completed,
            cancelled,
            seed,
        })
    }

    /// Sets the fitness of every unevaluated candidate, then updates the
    /// best-ever tracker in population order.
    fn evaluate(
        &self,
        pool: &mut [Candidate<P::Genotype>],
        best: &mut Option<Candidate<P::Genotype>>,
    ) {
        let pending: Vec<usize> = pool
            .iter()
            .enumerate()
            .filter(|(_, c)| c.fitness.is_none())
            .map(|(i, _)| i)
            .collect();

        evaluate_pending(&self.problem, pool, self.config.parallel_enabled());

        for i in pending {
            let Some(fitness) = pool[i].score() else {
                continue;
            };
            let improves = best
                .as_ref()
                .and_then(Candidate::score)
                .map_or(true, |current| fitness > current);
            if improves {
                *best = Some(pool[i].clone());
            }
        }
    }

    /// Appends statistics for `generation` and notifies the logger, or
    /// skips both when nobody in the population has a usable fitness.
    fn record(
        &mut self,
        generation: usize,
        population: &[Candidate<P::Genotype>],
        history: &mut History,
    ) {
        let Some(stats) = GenerationStats::from_population(generation, population) else {
            tracing::warn!(
                generation,
                population_size = population.len(),
                "no fitness-bearing candidate, statistics skipped"
            );
            return;
        };

        tracing::debug!(
            generation,
            population_size = population.len(),
            best = stats.best_fitness,
            mean = stats.mean_fitness,
            std = stats.std_fitness,
            worst = stats.worst_fitness,
            "generation complete"
        );
        history.push(stats);

        if let Some(i) = best_index(population) {
            report(
                "on_generation",
                self.logger.on_generation(generation, history, &population[i]),
            );
        }
    }

    fn config_snapshot(&self, seed: u64) -> ConfigSnapshot {
        [
            ("Algorithm", "Evolutionary Algorithm".to_string()),
            ("Problem", self.problem.name().to_string()),
            ("Population Size", self.config.population_size.to_string()),
            ("Seed", seed.to_string()),
            ("Parent Selection", self.parent_selection.name().to_string()),
            ("Reproduction", self.reproduction.name().to_string()),
            ("Survivor Selection", self.survivor_selection.name().to_string()),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
    }
}

fn report(event: &'static str, outcome: io::Result<()>) {
    if let Err(err) = outcome {
        tracing::warn!(event, error = %err, "logger call failed");
    }
}

fn evaluate_sequential<P: Problem>(problem: &P, pool: &mut [Candidate<P::Genotype>]) {
    for candidate in pool.iter_mut().filter(|c| c.fitness.is_none()) {
        candidate.fitness = Some(problem.fitness(&candidate.genotype));
    }
}

#[cfg(feature = "parallel")]
fn evaluate_pending<P: Problem>(problem: &P, pool: &mut [Candidate<P::Genotype>], parallel: bool) {
    if parallel {
        pool.par_iter_mut()
            .filter(|c| c.fitness.is_none())
            .for_each(|candidate| {
                candidate.fitness = Some(problem.fitness(&candidate.genotype));
            });
    } else {
        evaluate_sequential(problem, pool);
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate_pending<P: Problem>(problem: &P, pool: &mut [Candidate<P::Genotype>], _parallel: bool) {
    evaluate_sequential(problem, pool);
}

// ============================================================================
// Tests
// ============================================================================
