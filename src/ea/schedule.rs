//! Generation-dependent operator rates.

use std::fmt;
use std::sync::Arc;

/// A probability that is either constant or a function of the generation.
///
/// Crossover and mutation strategies resolve their rate once per call,
/// with the generation index the engine passes in. Resolved values are
/// clamped to `[0, 1]`.
///
/// # Examples
///
/// ```
/// use u_evolve::ea::Rate;
///
/// let fixed = Rate::from(0.9);
/// assert_eq!(fixed.resolve(17), 0.9);
///
/// // Linear decay from 0.5 to 0.05 over 100 generations.
/// let decay = Rate::scheduled(|g| 0.5 - 0.45 * (g.min(100) as f64 / 100.0));
/// assert_eq!(decay.resolve(0), 0.5);
/// assert!((decay.resolve(100) - 0.05).abs() < 1e-12);
/// ```
#[derive(Clone)]
pub enum Rate {
    /// The same probability for every generation.
    Constant(f64),

    /// Probability computed from the generation index.
    Scheduled(Arc<dyn Fn(usize) -> f64 + Send + Sync>),
}

impl Rate {
    /// Wraps a scheduling function.
    pub fn scheduled(schedule: impl Fn(usize) -> f64 + Send + Sync + 'static) -> Self {
        Rate::Scheduled(Arc::new(schedule))
    }

    /// The probability to use for `generation`, clamped to `[0, 1]`.
    ///
    /// A NaN result resolves to 0.
    pub fn resolve(&self, generation: usize) -> f64 {
        let value = match self {
            Rate::Constant(p) => *p,
            Rate::Scheduled(f) => f(generation),
        };
        if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        }
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::Constant(1.0)
    }
}

impl From<f64> for Rate {
    fn from(p: f64) -> Self {
        Rate::Constant(p)
    }
}

impl fmt::Debug for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rate::Constant(p) => f.debug_tuple("Constant").field(p).finish(),
            Rate::Scheduled(_) => f.write_str("Scheduled(..)"),
        }
    }
}
