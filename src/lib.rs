//! Problem-agnostic evolutionary algorithm engine.
//!
//! Provides a generational evolutionary loop with pluggable strategies:
//!
//! - **Parent selection**: tournament and uniform selection.
//! - **Reproduction**: crossover followed by mutation, or mutation only,
//!   with constant or generation-scheduled rates.
//! - **Permutation operators**: Ordered Crossover (OX1), Cycle Crossover
//!   (CX), swap and inversion mutation.
//! - **Survivor selection**: (mu + lambda), (mu, lambda) and age-bounded
//!   (mu + lambda).
//! - **Reporting**: per-generation statistics, CSV export, convergence
//!   data and a human-readable run logger.
//!
//! # Architecture
//!
//! The engine knows nothing about the genotype beyond `Clone`: every
//! problem-specific decision lives in a [`ea::Problem`] implementation and
//! every stochastic decision lives in a strategy, driven by one seeded
//! generator per run. The crate emits `tracing` events and never installs
//! a subscriber.

pub mod ea;
pub mod error;

pub use error::{Error, Result};
