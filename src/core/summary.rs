use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::Float;

/// A struct that holds the results of an optimization run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PSOSummary {
    /// A message describing the outcome of the run.
    pub message: String,
    /// The best position found by the swarm.
    pub x: Vec<Float>,
    /// The value of the cost function at [`PSOSummary::x`].
    pub fx: Float,
    /// The number of completed iterations (counted from `1`, including the final, possibly
    /// early-terminating one).
    pub iterations: usize,
    /// The number of cost function evaluations.
    pub cost_evals: usize,
    /// Flag that says whether or not the run terminated early by reaching the tolerance.
    pub converged: bool,
}

impl Display for PSOSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "MSG:       {}", self.message)?;
        for (i, xi) in self.x.iter().enumerate() {
            if i == 0 {
                writeln!(f, "X:         {:+.3}", xi)?;
            } else {
                writeln!(f, "           {:+.3}", xi)?;
            }
        }
        writeln!(f, "F(X):      {:+.3}", self.fx)?;
        writeln!(f, "N_ITER:    {}", self.iterations)?;
        writeln!(f, "N_F_EVALS: {}", self.cost_evals)?;
        write!(f, "CONVERGED: {}", self.converged)
    }
}
