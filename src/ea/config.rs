//! Engine configuration.
//!
//! [`EngineConfig`] holds the run-level parameters that are not owned by a
//! strategy: population size, seed and parallel evaluation.

use crate::error::{Error, Result};

/// Configuration for the [`Engine`](super::Engine).
///
/// # Defaults
///
/// ```
/// use u_evolve::ea::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert!(config.seed.is_none());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_evolve::ea::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_population_size(50)
///     .with_seed(42)
///     .with_parallel(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Number of candidates created by the initializer.
    ///
    /// Survivor strategies carry their own target size; this one only
    /// shapes generation 0.
    pub population_size: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a fresh seed per run; the seed used is reported in
    /// [`RunResult::seed`](super::RunResult::seed).
    pub seed: Option<u64>,

    /// Evaluate fitness on the rayon pool.
    ///
    /// Only honoured when the crate is built with the `parallel` feature.
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            seed: None,
            parallel: true,
        }
    }
}

impl EngineConfig {
    /// Sets the initial population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`Error::Configuration`] if `population_size == 0`.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(Error::Configuration(
                "population_size must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Whether fitness evaluation actually runs in parallel.
    pub(crate) fn parallel_enabled(&self) -> bool {
        cfg!(feature = "parallel") && self.parallel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.population_size, 100);
        assert!(config.seed.is_none());
        assert!(config.parallel);
    }

    #[test]
    fn test_builder_pattern() {
        let config = EngineConfig::default()
            .with_population_size(7)
            .with_seed(42)
            .with_parallel(false);
        assert_eq!(config.population_size, 7);
        assert_eq!(config.seed, Some(42));
        assert!(!config.parallel);
        assert!(!config.parallel_enabled());
    }

    #[test]
    fn test_validate() {
        assert!(EngineConfig::default().validate().is_ok());
        assert!(EngineConfig::default().with_population_size(1).validate().is_ok());
        assert!(matches!(
            EngineConfig::default().with_population_size(0).validate(),
            Err(Error::Configuration(_))
        ));
    }
}
