//! Run reporting.
//!
//! The engine drives an [`EvolutionLogger`] through four events: run
//! start, every completed generation, run end, and close. Every call is
//! fire-and-forget from the engine's point of view: an `Err` is reported
//! through `tracing` and the run continues.
//!
//! - [`NullLogger`]: does nothing; the engine default
//! - [`Logger`]: human-readable report to stdout, stderr or a file

use super::history::History;
use super::types::Candidate;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Ordered `key -> value` snapshot of the engine configuration.
pub type ConfigSnapshot = Vec<(String, String)>;

/// Receives run events from the engine.
pub trait EvolutionLogger<G>: Send {
    /// Called once before the initial population is built.
    fn on_start(&mut self, config: &ConfigSnapshot) -> io::Result<()>;

    /// Called after each generation that produced a history entry.
    fn on_generation(
        &mut self,
        generation: usize,
        history: &History,
        best_of_generation: &Candidate<G>,
    ) -> io::Result<()>;

    /// Called once after the last generation.
    fn on_end(&mut self, best_ever: &Candidate<G>, total_generations: usize) -> io::Result<()>;

    /// Releases any resource held by the logger. Called once per run,
    /// also when the run fails.
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A logger that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl<G> EvolutionLogger<G> for NullLogger {
    fn on_start(&mut self, _config: &ConfigSnapshot) -> io::Result<()> {
        Ok(())
    }

    fn on_generation(
        &mut self,
        _generation: usize,
        _history: &History,
        _best_of_generation: &Candidate<G>,
    ) -> io::Result<()> {
        Ok(())
    }

    fn on_end(&mut self, _best_ever: &Candidate<G>, _total_generations: usize) -> io::Result<()> {
        Ok(())
    }
}

/// Verbosity of [`Logger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// No output.
    Silent,
    /// Start banner and final summary.
    #[default]
    Summary,
    /// Summary plus a line every `n` generations.
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogLevel::Silent => "SILENT",
            LogLevel::Summary => "SUMMARY",
            LogLevel::Verbose => "VERBOSE",
        })
    }
}

/// Where [`Logger`] writes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogSink {
    /// Standard output.
    #[default]
    Stdout,
    /// Standard error.
    Stderr,
    /// A file, created or truncated when the logger is built.
    File(PathBuf),
}

/// Genotype previews longer than this are cut.
const GENOTYPE_PREVIEW_MAX: usize = 75;
const GENOTYPE_PREVIEW_KEEP: usize = 70;

/// The standard human-readable logger.
///
/// ```no_run
/// use u_evolve::ea::{LogLevel, LogSink, Logger};
///
/// let logger = Logger::new(LogLevel::Verbose, LogSink::File("run.log".into()))
///     .unwrap()
///     .with_every(25);
/// ```
pub struct Logger {
    level: LogLevel,
    every: usize,
    out: Option<Box<dyn Write + Send>>,
    owns_file: bool,
}

impl Logger {
    /// Opens the sink. A [`LogSink::File`] is created or truncated
    /// immediately; nothing is opened at [`LogLevel::Silent`].
    pub fn new(level: LogLevel, sink: LogSink) -> io::Result<Self> {
        if level == LogLevel::Silent {
            return Ok(Self {
                level,
                every: 10,
                out: None,
                owns_file: false,
            });
        }

        let (out, owns_file): (Box<dyn Write + Send>, bool) = match sink {
            LogSink::Stdout => (Box::new(io::stdout()), false),
            LogSink::Stderr => (Box::new(io::stderr()), false),
            LogSink::File(path) => (Box::new(BufWriter::new(File::create(path)?)), true),
        };
        Ok(Self {
            level,
            every: 10,
            out: Some(out),
            owns_file,
        })
    }

    /// Writes to an arbitrary writer instead of a standard sink.
    pub fn from_writer(level: LogLevel, writer: impl Write + Send + 'static) -> Self {
        Self {
            level,
            every: 10,
            out: Some(Box::new(writer)),
            owns_file: false,
        }
    }

    /// In [`LogLevel::Verbose`], report every `n`-th generation (minimum 1).
    pub fn with_every(mut self, n: usize) -> Self {
        self.every = n.max(1);
        self
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        match self.out.as_mut() {
            Some(out) => {
                writeln!(out, "{line}")?;
                out.flush()
            }
            None => Ok(()),
        }
    }

    fn reports_summary(&self) -> bool {
        matches!(self.level, LogLevel::Summary | LogLevel::Verbose)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .field("every", &self.every)
            .field("open", &self.out.is_some())
            .finish()
    }
}

fn genotype_preview<G: fmt::Debug>(genotype: &G) -> String {
    let text = format!("{genotype:?}");
    if text.chars().count() > GENOTYPE_PREVIEW_MAX {
        let head: String = text.chars().take(GENOTYPE_PREVIEW_KEEP).collect();
        format!("{head}...]")
    } else {
        text
    }
}

impl<G: fmt::Debug> EvolutionLogger<G> for Logger {
    fn on_start(&mut self, config: &ConfigSnapshot) -> io::Result<()> {
        if !self.reports_summary() {
            return Ok(());
        }
        self.write_line("--- Evolutionary Algorithm Started ---")?;
        self.write_line(&format!("  Level: {}", self.level))?;
        for (key, value) in config {
            self.write_line(&format!("  {key}: {value}"))?;
        }
        self.write_line("------------------------------------------")
    }

    fn on_generation(
        &mut self,
        generation: usize,
        history: &History,
        _best_of_generation: &Candidate<G>,
    ) -> io::Result<()> {
        if self.level != LogLevel::Verbose || generation % self.every != 0 {
            return Ok(());
        }
        let Some(s) = history.latest() else {
            return Ok(());
        };
        let line = format!(
            "Gen {generation:<5} | Best: {:<10.4} | Mean: {:<10.4} (± {:<8.2}) | Worst: {:<10.4}",
            s.best_fitness, s.mean_fitness, s.std_fitness, s.worst_fitness
        );
        self.write_line(&line)
    }

    fn on_end(&mut self, best_ever: &Candidate<G>, total_generations: usize) -> io::Result<()> {
        if !self.reports_summary() {
            return Ok(());
        }
        let fitness = best_ever
            .fitness
            .map_or_else(|| "unevaluated".to_string(), |f| format!("{f:.4}"));
        self.write_line("--- Evolution Finished ---")?;
        self.write_line(&format!("  Total Generations: {total_generations}"))?;
        self.write_line(&format!("  Best Fitness: {fitness}"))?;
        self.write_line(&format!("  Best Candidate Age: {}", best_ever.age))?;
        self.write_line(&format!(
            "  Best Genotype: {}",
            genotype_preview(&best_ever.genotype)
        ))?;
        self.write_line("--------------------------------")
    }

    fn close(&mut self) -> io::Result<()> {
        let owns_file = std::mem::take(&mut self.owns_file);
        let Some(mut out) = self.out.take() else {
            return Ok(());
        };
        let footer = if owns_file {
            writeln!(out, "--- Log File Closed ---")
        } else {
            Ok(())
        };
        let flushed = out.flush();
        drop(out);
        footer.and(flushed)
    }
}
