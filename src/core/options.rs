use serde::{Deserialize, Serialize};

use crate::Float;

/// The stopping parameters for a single call to [`PSO::optimize`](`crate::swarms::PSO::optimize`).
///
/// The fields are validated by the optimizer rather than by the builder methods, so constructing
/// an invalid set of options is possible but using one is not.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PSOOptions {
    /// The maximum number of iterations to run before giving up (default = `500`).
    pub max_iterations: usize,
    /// The early-stop threshold on the absolute value of the best objective value found so far
    /// (default = `1e-8`).
    pub tolerance: Float,
}

impl Default for PSOOptions {
    fn default() -> Self {
        Self {
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            tolerance: Self::DEFAULT_TOLERANCE,
        }
    }
}

impl PSOOptions {
    const DEFAULT_MAX_ITERATIONS: usize = 500;
    const DEFAULT_TOLERANCE: Float = 1e-8;

    /// Sets the maximum number of iterations (default = `500`). The optimizer rejects `0`.
    pub const fn with_max_iterations(mut self, value: usize) -> Self {
        self.max_iterations = value;
        self
    }
    /// Sets the convergence tolerance (default = `1e-8`). The optimizer rejects negative and NaN
    /// values.
    ///
    /// A run terminates early once the absolute value of the best objective value drops to the
    /// tolerance or below. Since this compares the value itself rather than an improvement delta,
    /// it only takes effect for objectives whose minimum lies at or near zero.
    pub const fn with_tolerance(mut self, value: Float) -> Self {
        self.tolerance = value;
        self
    }
}
