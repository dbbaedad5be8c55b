use std::convert::Infallible;

use crate::{traits::CostFunction, Float, PI};

/// The sphere function, a convex function with a single minimum.
///
/// ```math
/// f(\vec{x}) = \sum_{i=1}^{n} x_i^2
/// ```
/// This function has a minimum at $`f(\vec{0}) = 0`$.
pub struct Sphere {
    /// The number of dimensions of the function (must be >= 1).
    pub n: usize,
}
impl CostFunction for Sphere {
    fn evaluate(&self, x: &[Float], _user_data: &()) -> Result<Float, Infallible> {
        Ok((0..self.n).map(|i| x[i].powi(2)).sum())
    }
}

/// The Rosenbrock function, a non-convex function with a single minimum.
///
/// ```math
/// f(\vec{x}) = \sum_{i=1}^{n-1} \left[100(x_{i+1} - x_i^2)^2 + (1 - x_i)^2 \right]
/// ```
/// where $`n \geq 2`$. This function has a minimum at $`f(\vec{1}) = 0`$.
pub struct Rosenbrock {
    /// The number of dimensions of the function (must be >= 2).
    pub n: usize,
}
impl CostFunction for Rosenbrock {
    fn evaluate(&self, x: &[Float], _user_data: &()) -> Result<Float, Infallible> {
        #[allow(clippy::suboptimal_flops)]
        Ok((0..(self.n - 1))
            .map(|i| 100.0 * (x[i + 1] - x[i].powi(2)).powi(2) + (1.0 - x[i]).powi(2))
            .sum())
    }
}

/// The Rastrigin function, a non-convex function with a single minimum but many local minima.
///
/// ```math
/// f(\vec{x}) = 10n + \sum_{i=1}^n (x_i^2 - 10\cos(2\pi x_i))
/// ```
/// This function has a minimum at $`f(\vec{0}) = 0`$.
pub struct Rastrigin {
    /// The number of dimensions of the function (must be >= 1).
    pub n: usize,
}
impl CostFunction for Rastrigin {
    fn evaluate(&self, x: &[Float], _user_data: &()) -> Result<Float, Infallible> {
        #[allow(clippy::suboptimal_flops)]
        Ok(10.0 * self.n as Float
            + (0..self.n)
                .map(|i| x[i].powi(2) - 10.0 * Float::cos(2.0 * PI * x[i]))
                .sum::<Float>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sphere_minimum() {
        let f = Sphere { n: 3 };
        assert_eq!(f.evaluate(&[0.0, 0.0, 0.0], &()).unwrap(), 0.0);
        assert_relative_eq!(f.evaluate(&[1.0, 2.0, 3.0], &()).unwrap(), 14.0);
    }

    #[test]
    fn test_rosenbrock_minimum() {
        let f = Rosenbrock { n: 4 };
        assert_eq!(f.evaluate(&[1.0, 1.0, 1.0, 1.0], &()).unwrap(), 0.0);
        assert!(f.evaluate(&[0.0, 0.0, 0.0, 0.0], &()).unwrap() > 0.0);
    }

    #[test]
    fn test_rastrigin_minimum() {
        let f = Rastrigin { n: 2 };
        assert_relative_eq!(f.evaluate(&[0.0, 0.0], &()).unwrap(), 0.0);
        // integer coordinates away from the origin are the local minima
        assert!(f.evaluate(&[1.0, 1.0], &()).unwrap() > 0.0);
    }
}
