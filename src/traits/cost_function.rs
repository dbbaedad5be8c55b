use std::convert::Infallible;

use crate::Float;

/// A trait which describes a function $`f(\mathbb{R}^n) \to \mathbb{R}`$
///
/// Such a function may also take a `user_data: &U` field which can be used to pass external
/// arguments to the function during minimization.
///
/// The `CostFunction` trait takes a generic `U` representing the type of user data/arguments
/// and a generic `E` representing any possible errors that might be returned during function
/// execution.
///
/// Evaluations fan out across a thread pool during each iteration of the optimizer, so
/// implementors must be [`Sync`] and should not rely on any ordering between calls.
pub trait CostFunction<U = (), E = Infallible>: Sync {
    /// The evaluation of the function at a point `x` with the given arguments/user data.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. Users should implement this trait to return a
    /// [`std::convert::Infallible`] if the function evaluation never fails.
    fn evaluate(&self, x: &[Float], user_data: &U) -> Result<Float, E>;
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use crate::{traits::CostFunction, Float};

    struct TestFunction;
    impl CostFunction for TestFunction {
        fn evaluate(&self, x: &[Float], _user_data: &()) -> Result<Float, Infallible> {
            Ok(x[0].powi(2) + x[1].powi(2) + 1.0)
        }
    }

    struct ScaledFunction;
    impl CostFunction<Float> for ScaledFunction {
        fn evaluate(&self, x: &[Float], scale: &Float) -> Result<Float, Infallible> {
            Ok(scale * (x[0].powi(2) + x[1].powi(2)))
        }
    }

    #[test]
    fn test_cost_function() {
        let y = TestFunction.evaluate(&[1.0, 2.0], &()).unwrap();
        assert_eq!(y, 6.0);
    }

    #[test]
    fn test_cost_function_with_user_data() {
        let y = ScaledFunction.evaluate(&[1.0, 2.0], &3.0).unwrap();
        assert_eq!(y, 15.0);
    }
}
