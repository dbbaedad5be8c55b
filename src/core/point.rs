use crate::{traits::CostFunction, DVector, Float};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Describes a point in parameter space along with its evaluation.
///
/// Unlike a bare coordinate vector, a [`Point`] always carries the value of the cost function at
/// its position, so comparisons between points never need to re-evaluate the function.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Point {
    /// the point's position
    pub x: DVector<Float>,
    /// the value of the cost function at the point's position
    pub fx: Float,
}

impl Point {
    /// Create a new [`Point`] by evaluating the given function at the position `x`.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. See [`CostFunction::evaluate`] for more
    /// information.
    pub fn new<U, E>(
        x: DVector<Float>,
        func: &dyn CostFunction<U, E>,
        user_data: &U,
    ) -> Result<Self, E> {
        let fx = func.evaluate(x.as_slice(), user_data)?;
        Ok(Self { x, fx })
    }
    /// Create a [`Point`] at the origin of a `dimension`-dimensional space with an infinite
    /// value. Any evaluated point compares below it, which makes it the starting value for
    /// best-point folds.
    pub fn infinite(dimension: usize) -> Self {
        Self {
            x: DVector::zeros(dimension),
            fx: Float::INFINITY,
        }
    }
    /// Convert the [`Point`] into a position-value pair.
    pub fn destructure(self) -> (DVector<Float>, Float) {
        (self.x, self.fx)
    }
    /// Compare two points by their `fx` value.
    pub fn total_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.fx.total_cmp(&other.fx)
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::infinite(0)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "x: {:?}, f(x): {}", self.x.as_slice(), self.fx)
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.fx == other.fx
    }
}
impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.fx.partial_cmp(&other.fx)
    }
}
