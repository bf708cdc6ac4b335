//! Per-generation run statistics.
//!
//! [`History`] is the append-only record the engine keeps during a run:
//! one [`GenerationStats`] per completed generation, generation 0 (the
//! initial population) included. A generation whose population has no
//! fitness-bearing candidate gets no entry, so entries are addressed by
//! their `generation` field and never by position.

use super::types::Candidate;
use std::io::{self, Write};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fitness statistics of one generation's live population.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GenerationStats {
    /// Generation index; 0 is the initial population.
    pub generation: usize,
    /// Highest fitness.
    pub best_fitness: f64,
    /// Arithmetic mean fitness.
    pub mean_fitness: f64,
    /// Population (not sample) standard deviation of fitness.
    pub std_fitness: f64,
    /// Lowest fitness.
    pub worst_fitness: f64,
}

impl GenerationStats {
    /// Computes statistics over the fitness-bearing candidates of
    /// `population`.
    ///
    /// Returns `None` when the population is empty or nobody has a usable
    /// fitness.
    pub fn from_population<G>(generation: usize, population: &[Candidate<G>]) -> Option<Self> {
        let values: Vec<f64> = population.iter().filter_map(Candidate::score).collect();
        if values.is_empty() {
            return None;
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let best = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let worst = values.iter().copied().fold(f64::INFINITY, f64::min);

        Some(Self {
            generation,
            best_fitness: best,
            mean_fitness: mean,
            std_fitness: variance.sqrt(),
            worst_fitness: worst,
        })
    }
}

/// One point of a convergence plot: best and mean fitness with a
/// one-standard-deviation band around the mean.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConvergencePoint {
    /// Generation index.
    pub generation: usize,
    /// Best fitness of the generation.
    pub best: f64,
    /// Mean fitness of the generation.
    pub mean: f64,
    /// Mean minus one standard deviation.
    pub lower: f64,
    /// Mean plus one standard deviation.
    pub upper: f64,
}

/// Append-only run history.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct History {
    entries: Vec<GenerationStats>,
}

impl History {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the statistics of a completed generation.
    pub fn push(&mut self, stats: GenerationStats) {
        self.entries.push(stats);
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[GenerationStats] {
        &self.entries
    }

    /// Iterates entries, oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, GenerationStats> {
        self.entries.iter()
    }

    /// The most recent entry.
    pub fn latest(&self) -> Option<&GenerationStats> {
        self.entries.last()
    }

    /// The entry recorded for `generation`, if that generation produced
    /// one.
    pub fn get(&self, generation: usize) -> Option<&GenerationStats> {
        self.entries.iter().find(|s| s.generation == generation)
    }

    /// Number of recorded generations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best fitness per recorded generation.
    pub fn best_fitness(&self) -> Vec<f64> {
        self.entries.iter().map(|s| s.best_fitness).collect()
    }

    /// Series for a convergence plot (best line, mean line, mean +- std
    /// band).
    pub fn convergence(&self) -> Vec<ConvergencePoint> {
        self.entries
            .iter()
            .map(|s| ConvergencePoint {
                generation: s.generation,
                best: s.best_fitness,
                mean: s.mean_fitness,
                lower: s.mean_fitness - s.std_fitness,
                upper: s.mean_fitness + s.std_fitness,
            })
            .collect()
    }

    /// Writes the history as CSV with a header row.
    ///
    /// ```
    /// use u_evolve::ea::{GenerationStats, History};
    ///
    /// let mut history = History::new();
    /// history.push(GenerationStats {
    ///     generation: 0,
    ///     best_fitness: 3.0,
    ///     mean_fitness: 2.0,
    ///     std_fitness: 0.5,
    ///     worst_fitness: 1.0,
    /// });
    /// let mut out = Vec::new();
    /// history.write_csv(&mut out).unwrap();
    /// assert_eq!(
    ///     String::from_utf8(out).unwrap(),
    ///     "generation,best_fitness,mean_fitness,std_fitness,worst_fitness\n0,3,2,0.5,1\n"
    /// );
    /// ```
    pub fn write_csv<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(
            out,
            "generation,best_fitness,mean_fitness,std_fitness,worst_fitness"
        )?;
        for s in &self.entries {
            writeln!(
                out,
                "{},{},{},{},{}",
                s.generation, s.best_fitness, s.mean_fitness, s.std_fitness, s.worst_fitness
            )?;
        }
        out.flush()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a GenerationStats;
    type IntoIter = std::slice::Iter<'a, GenerationStats>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
