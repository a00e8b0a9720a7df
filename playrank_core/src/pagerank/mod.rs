pub mod crawl;
pub mod graph;
pub mod iterative;
pub mod sampling;
pub mod transition;

use std::collections::BTreeMap;

use crate::error::{Error, Result};

pub const DAMPING: f64 = 0.85;
pub const SAMPLES: usize = 10_000;
pub const TOLERANCE: f64 = 0.001;
const MAX_ITERATIONS: usize = 10_000;

/// Page name to rank. Values are non-negative and sum to one.
pub type Ranks = BTreeMap<String, f64>;

/// Options shared by the rankers.
#[derive(Clone, Debug)]
pub struct RankOptions {
    pub(crate) damping: f64,
    pub(crate) samples: usize,
    pub(crate) tolerance: f64,
    pub(crate) max_iterations: usize,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            damping: DAMPING,
            samples: SAMPLES,
            tolerance: TOLERANCE,
            max_iterations: MAX_ITERATIONS,
        }
    }
}

impl RankOptions {
    /// Probability of following a link rather than jumping to a random page.
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Length of the random walk used by the sampling ranker.
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// The iterative ranker stops once no page moves by more than this.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Give up iterating after this many rounds.
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(Error::InvalidOptions(format!(
                "damping must lie strictly between 0 and 1, got {}",
                self.damping
            )));
        }
        if self.samples == 0 {
            return Err(Error::InvalidOptions("samples must be positive".into()));
        }
        if !(self.tolerance > 0.0) {
            return Err(Error::InvalidOptions(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(Error::InvalidOptions(
                "max_iterations must be positive".into(),
            ));
        }
        Ok(())
    }
}
