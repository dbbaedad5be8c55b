use std::{ops::ControlFlow, sync::Arc};

use parking_lot::RwLock;

use crate::swarms::SwarmStatus;

/// A trait which holds a [`callback`](`SwarmObserver::callback`) function that can be used to
/// check the [`SwarmStatus`] of a run during an optimization.
pub trait SwarmObserver<U> {
    /// A function that is called after every completed iteration of
    /// [`PSO::optimize`](`crate::swarms::PSO::optimize`), with `step` counting completed
    /// iterations from `1`. If it returns [`ControlFlow::Break`], the run will terminate after
    /// the current iteration.
    fn callback(
        &mut self,
        step: usize,
        status: &mut SwarmStatus,
        user_data: &mut U,
    ) -> ControlFlow<()>;
}

/// A debugging observer which prints out the step and status at the current iteration of a run.
///
/// # Usage:
///
/// ```rust
/// use fastrand::Rng;
/// use murmuration::prelude::*;
/// use murmuration::test_functions::Sphere;
/// use murmuration::traits::observer::DebugSwarmObserver;
///
/// let mut rng = Rng::new();
/// rng.seed(0);
/// let obs = DebugSwarmObserver::build();
/// let mut pso = PSO::new(rng).with_observer(obs.clone());
/// let options = PSOOptions::default()
///     .with_max_iterations(5)
///     .with_tolerance(0.0);
/// let summary = pso
///     .optimize(&Sphere { n: 2 }, &[1.0, 1.0], &options, &mut ())
///     .unwrap();
/// // ^ This will print the swarm status for each step
/// assert_eq!(summary.iterations, 5);
/// ```
pub struct DebugSwarmObserver;
impl DebugSwarmObserver {
    /// Finalize the [`SwarmObserver`] by wrapping it in an [`Arc`] and [`RwLock`]
    pub fn build() -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(Self))
    }
}
impl<U> SwarmObserver<U> for DebugSwarmObserver {
    fn callback(
        &mut self,
        step: usize,
        status: &mut SwarmStatus,
        _user_data: &mut U,
    ) -> ControlFlow<()> {
        println!("Step: {}\n{}", step, status);
        ControlFlow::Continue(())
    }
}
