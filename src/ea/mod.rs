//! Evolutionary algorithm framework.
//!
//! A generic, problem-agnostic EA engine built on strategy traits. Users
//! define their problem by implementing [`Problem`] (or wrapping two
//! closures in [`FnProblem`]) and assemble an [`Engine`] from one strategy
//! per pluggable role.
//!
//! # Strategy Traits
//!
//! - [`ParentSelection`]: who reproduces ([`TournamentSelection`], [`UniformSelection`])
//! - [`Reproduction`]: parents to offspring ([`StandardReproduction`], [`MutationOnlyReproduction`])
//! - [`Crossover`]: recombination ([`OrderedCrossover`], [`CycleCrossover`])
//! - [`Mutation`]: in-place perturbation ([`SwapMutation`], [`InversionMutation`])
//! - [`SurvivorSelection`]: the next population ([`PlusSelection`], [`CommaSelection`], [`PlusAgeBasedSelection`])
//! - [`EvolutionLogger`]: run reporting ([`NullLogger`], [`Logger`])
//!
//! # Key Types
//!
//! - [`Candidate`]: genotype, fitness and age
//! - [`EngineConfig`]: population size, seed, parallel evaluation
//! - [`Engine`]: executes the generational loop
//! - [`RunResult`]: best-ever candidate, [`History`] and run metadata
//!
//! # Submodules
//!
//! - [`operators`]: permutation crossover (OX1, CX) and mutation primitives
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Eiben & Smith (2015), *Introduction to Evolutionary Computing*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod config;
mod crossover;
mod engine;
mod history;
mod logger;
mod mutation;
pub mod operators;
mod reproduction;
mod schedule;
mod selection;
mod survivor;
mod types;

pub use config::EngineConfig;
pub use crossover::{Crossover, CycleCrossover, OrderedCrossover};
pub use engine::{Engine, RunResult};
pub use history::{ConvergencePoint, GenerationStats, History};
pub use logger::{ConfigSnapshot, EvolutionLogger, LogLevel, LogSink, Logger, NullLogger};
pub use mutation::{InversionMutation, Mutation, SwapMutation};
pub use reproduction::{MutationOnlyReproduction, Reproduction, StandardReproduction};
pub use schedule::Rate;
pub use selection::{ParentSelection, TournamentSelection, UniformSelection};
pub use survivor::{CommaSelection, PlusAgeBasedSelection, PlusSelection, SurvivorSelection};
pub use types::{Candidate, FnProblem, Problem};
