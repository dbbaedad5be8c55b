use std::{ops::ControlFlow, sync::Arc};

use fastrand::Rng;
use parking_lot::{Mutex, RwLock};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{Swarm, SwarmParticle, SwarmStatus};
use crate::{
    core::{NopAbortSignal, PSOError, PSOOptions, PSOSummary, Point},
    traits::{AbortSignal, CostFunction, SwarmObserver},
    Float,
};

/// Particle Swarm Optimizer
///
/// The PSO algorithm scatters an ensemble of particles over the search space and lets them
/// explore it collectively. Each iteration, every particle's velocity is updated as
///
/// ```math
/// v_i^{t+1} = \omega v_i^t + c_1 r_{1,i}^{t+1}(p^t_i - x^t_i) + c_2 r_{2,i}^{t+1}(g^t - x^t_i)
/// ```
/// where $`r_1`$ and $`r_2`$ are uniformly distributed random vectors in $`[0,1)`$, $`\omega`$
/// is an inertial weight parameter, $`c_1`$ and $`c_2`$ are cognitive and social weights
/// respectively, $`p_i^t`$ is the particle's personal best position, and $`g^t`$ is the swarm's
/// best position. Positions are then advanced by the new velocity, with no bounding, and
/// re-evaluated. See [^1] for more information.
///
/// All particle updates within one iteration run concurrently on the [`rayon`] thread pool and
/// join before the termination check. The swarm's best position/value pair is guarded by a
/// [`Mutex`] so the compare-and-replace of a new best is mutually exclusive across particles.
///
/// [^1]: [Houssein, E. H., Gad, A. G., Hussain, K., & Suganthan, P. N. (2021). Major Advances in Particle Swarm Optimization: Theory, Analysis, and Application. In Swarm and Evolutionary Computation (Vol. 63, p. 100868). Elsevier BV.](https://doi.org/10.1016/j.swevo.2021.100868)
pub struct PSO<U = ()> {
    inertia: Float,
    cognitive: Float,
    social: Float,
    n_particles: usize,
    rng: Rng,
    observers: Vec<Arc<RwLock<dyn SwarmObserver<U>>>>,
    abort_signal: Box<dyn AbortSignal>,
}

impl<U> Default for PSO<U> {
    fn default() -> Self {
        Self::new(Rng::new())
    }
}

impl<U> PSO<U> {
    const DEFAULT_N_PARTICLES: usize = 30;
    const DEFAULT_INERTIA: Float = 0.7;
    const DEFAULT_COGNITIVE: Float = 1.5;
    const DEFAULT_SOCIAL: Float = 1.5;

    /// Construct a new particle swarm optimizer drawing from the given random generator.
    ///
    /// The generator seeds the swarm and is forked into one generator per particle, so seeding
    /// it fixes the random streams of a run (see the crate-level documentation for what that
    /// does and does not guarantee).
    pub fn new(rng: Rng) -> Self {
        Self {
            inertia: Self::DEFAULT_INERTIA,
            cognitive: Self::DEFAULT_COGNITIVE,
            social: Self::DEFAULT_SOCIAL,
            n_particles: Self::DEFAULT_N_PARTICLES,
            rng,
            observers: Vec::default(),
            abort_signal: Box::new(NopAbortSignal::new()),
        }
    }
    /// Sets the inertial weight $`\omega`$ (default = `0.7`).
    ///
    /// # Panics
    ///
    /// This method will panic if $`\omega < 0`$.
    pub fn with_inertia(mut self, value: Float) -> Self {
        assert!(value >= 0.0);
        self.inertia = value;
        self
    }
    /// Sets the cognitive weight $`c_1`$ which controls the particle's tendency to move
    /// towards its personal best (default = `1.5`).
    ///
    /// # Panics
    ///
    /// This method will panic if $`c_1 < 0`$.
    pub fn with_cognitive(mut self, value: Float) -> Self {
        assert!(value >= 0.0);
        self.cognitive = value;
        self
    }
    /// Sets the social weight $`c_2`$ which controls the particle's tendency to move towards
    /// the swarm's best position (default = `1.5`).
    ///
    /// # Panics
    ///
    /// This method will panic if $`c_2 < 0`$.
    pub fn with_social(mut self, value: Float) -> Self {
        assert!(value >= 0.0);
        self.social = value;
        self
    }
    /// Sets the number of particles in the swarm (default = `30`). The optimizer rejects `0`.
    pub const fn with_n_particles(mut self, value: usize) -> Self {
        self.n_particles = value;
        self
    }
    /// Adds a single [`SwarmObserver`] to the optimizer. Observers are called in registration
    /// order after every completed iteration.
    pub fn with_observer(mut self, observer: Arc<RwLock<dyn SwarmObserver<U>>>) -> Self {
        self.observers.push(observer);
        self
    }
    /// Sets the [`AbortSignal`] polled after every completed iteration (default =
    /// [`NopAbortSignal`], which never aborts).
    pub fn with_abort_signal(mut self, signal: Box<dyn AbortSignal>) -> Self {
        self.abort_signal = signal;
        self
    }

    /// Minimize the given [`CostFunction`], using `x0` only to communicate the dimension of the
    /// problem (the swarm is seeded uniformly over $`[-5, 5]^n`$ regardless of its values).
    ///
    /// The swarm is created fresh for this call and discarded when it returns. Each iteration
    /// fans the particle updates out across the [`rayon`] thread pool, joins, calls the
    /// registered [`SwarmObserver`]s, polls the [`AbortSignal`], and then checks whether the
    /// absolute value of the best objective value has dropped to
    /// [`PSOOptions::tolerance`](`crate::core::PSOOptions::tolerance`) or below. Note that this
    /// termination test only fires for objectives whose minimum lies at or near zero; any other
    /// objective runs out the iteration budget.
    ///
    /// # Errors
    ///
    /// Returns [`PSOError::InvalidArgument`] before any evaluation takes place if `x0` is
    /// empty, if `max_iterations` is zero, if `tolerance` is negative or NaN, or if the swarm
    /// has no particles. Any error returned by the cost function itself propagates as
    /// [`PSOError::Evaluation`].
    pub fn optimize<E>(
        &mut self,
        func: &dyn CostFunction<U, E>,
        x0: &[Float],
        options: &PSOOptions,
        user_data: &mut U,
    ) -> Result<PSOSummary, PSOError<E>>
    where
        U: Sync,
        E: std::error::Error + Send + 'static,
    {
        if x0.is_empty() {
            return Err(PSOError::InvalidArgument(
                "initial guess must not be empty".into(),
            ));
        }
        if options.max_iterations == 0 {
            return Err(PSOError::InvalidArgument(
                "max_iterations must be positive".into(),
            ));
        }
        if !(options.tolerance >= 0.0) {
            return Err(PSOError::InvalidArgument(
                "tolerance must be non-negative".into(),
            ));
        }
        if self.n_particles == 0 {
            return Err(PSOError::InvalidArgument(
                "the swarm must contain at least one particle".into(),
            ));
        }
        self.abort_signal.reset();
        let mut status = SwarmStatus {
            swarm: Swarm::new(x0.len(), self.n_particles, func, user_data, &mut self.rng)?,
            n_f_evals: self.n_particles,
            ..Default::default()
        };
        status.gbest = status.swarm.best();
        status.update_message("Initialized");
        let mut observer_termination = false;
        let mut aborted = false;
        for i_step in 0..options.max_iterations {
            let gbest = Mutex::new(status.gbest.clone());
            {
                let user_data: &U = user_data;
                status.swarm.particles.par_iter_mut().try_for_each(|particle| {
                    particle.step(
                        func,
                        user_data,
                        &gbest,
                        self.inertia,
                        self.cognitive,
                        self.social,
                    )
                })?;
            }
            status.gbest = gbest.into_inner();
            status.n_f_evals += self.n_particles;
            status.iterations = i_step + 1;
            for observer in &self.observers {
                observer_termination = observer
                    .write()
                    .callback(i_step + 1, &mut status, user_data)
                    .is_break()
                    || observer_termination;
            }
            if self.abort_signal.is_aborted() {
                aborted = true;
            }
            if status.gbest.fx.abs() <= options.tolerance {
                status.converged = true;
            }
            if status.converged || observer_termination || aborted {
                break;
            }
        }
        status.update_message(if aborted {
            "Abort signal received"
        } else {
            "Particle Swarm Optimization completed."
        });
        Ok(PSOSummary {
            message: status.message.clone(),
            x: status.gbest.x.iter().copied().collect(),
            fx: status.gbest.fx,
            iterations: status.iterations,
            cost_evals: status.n_f_evals,
            converged: status.converged,
        })
    }
}

/// A [`SwarmObserver`] which stores the swarm particles' history as well as the history of
/// global best positions, one entry per completed iteration.
#[derive(Serialize, Deserialize, Default, Clone)]
pub struct TrackingSwarmObserver {
    /// The history of the swarm particles
    pub history: Vec<Vec<SwarmParticle>>,
    /// The history of the best position in the swarm
    pub best_history: Vec<Point>,
}

impl TrackingSwarmObserver {
    /// Finalize the [`SwarmObserver`] by wrapping it in an [`Arc`] and [`RwLock`]
    pub fn build() -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(Self::default()))
    }
}

impl<U> SwarmObserver<U> for TrackingSwarmObserver {
    fn callback(
        &mut self,
        _step: usize,
        status: &mut SwarmStatus,
        _user_data: &mut U,
    ) -> ControlFlow<()> {
        self.history.push(status.swarm.particles.clone());
        self.best_history.push(status.gbest.clone());
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::core::AtomicAbortSignal;
    use crate::test_functions::{Rastrigin, Sphere};

    fn seeded_rng(seed: u64) -> Rng {
        let mut rng = Rng::new();
        rng.seed(seed);
        rng
    }

    struct Paraboloid;
    impl CostFunction for Paraboloid {
        fn evaluate(&self, x: &[Float], _user_data: &()) -> Result<Float, Infallible> {
            Ok((x[0] - 1.0).powi(2) + (x[1] - 2.0).powi(2) + 3.0)
        }
    }

    struct ShiftedParaboloid;
    impl CostFunction for ShiftedParaboloid {
        fn evaluate(&self, x: &[Float], _user_data: &()) -> Result<Float, Infallible> {
            Ok((x[0] - 1.0).powi(2) + (x[1] - 2.0).powi(2))
        }
    }

    struct CountingSphere(AtomicUsize);
    impl CostFunction for CountingSphere {
        fn evaluate(&self, x: &[Float], _user_data: &()) -> Result<Float, Infallible> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(x.iter().map(|xi| xi.powi(2)).sum())
        }
    }

    #[test]
    fn test_solution_matches_guess_dimension() {
        let mut pso = PSO::new(seeded_rng(0));
        let options = PSOOptions::default().with_max_iterations(10);
        let summary = pso
            .optimize(&Sphere { n: 3 }, &[0.0, 0.0, 0.0], &options, &mut ())
            .unwrap();
        assert_eq!(summary.x.len(), 3);
        assert!(summary.iterations >= 1 && summary.iterations <= 10);
    }

    #[test]
    fn test_paraboloid_runs_out_the_budget() {
        // the minimum sits at 3, so the tolerance check on |f(g)| can never fire
        let mut pso = PSO::new(seeded_rng(0));
        let options = PSOOptions::default()
            .with_max_iterations(500)
            .with_tolerance(1e-6);
        let summary = pso
            .optimize(&Paraboloid, &[0.0, 0.0], &options, &mut ())
            .unwrap();
        assert!(!summary.converged);
        assert_eq!(summary.iterations, 500);
        assert_abs_diff_eq!(summary.fx, 3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(summary.x[0], 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(summary.x[1], 2.0, epsilon = 1e-6);
        assert_eq!(summary.message, "Particle Swarm Optimization completed.");
    }

    #[test]
    fn test_zero_minimum_converges_early() {
        let mut pso = PSO::new(seeded_rng(1));
        let options = PSOOptions::default()
            .with_max_iterations(500)
            .with_tolerance(1e-6);
        let summary = pso
            .optimize(&ShiftedParaboloid, &[0.0, 0.0], &options, &mut ())
            .unwrap();
        assert!(summary.converged);
        assert!(summary.iterations < 500);
        assert!(summary.fx.abs() <= 1e-6);
        assert_abs_diff_eq!(summary.x[0], 1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(summary.x[1], 2.0, epsilon = 1e-3);
    }

    #[test]
    fn test_empty_guess_is_rejected_without_evaluation() {
        let func = CountingSphere(AtomicUsize::new(0));
        let mut pso = PSO::new(seeded_rng(0));
        let options = PSOOptions::default();
        let err = pso.optimize(&func, &[], &options, &mut ()).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(func.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_invalid_options_are_rejected_without_evaluation() {
        let func = CountingSphere(AtomicUsize::new(0));
        let x0 = [0.0, 0.0];
        let mut pso = PSO::new(seeded_rng(0));
        let err = pso
            .optimize(
                &func,
                &x0,
                &PSOOptions::default().with_max_iterations(0),
                &mut (),
            )
            .unwrap_err();
        assert!(err.is_invalid_argument());
        let err = pso
            .optimize(
                &func,
                &x0,
                &PSOOptions::default().with_tolerance(-1.0),
                &mut (),
            )
            .unwrap_err();
        assert!(err.is_invalid_argument());
        let err = pso
            .optimize(
                &func,
                &x0,
                &PSOOptions::default().with_tolerance(Float::NAN),
                &mut (),
            )
            .unwrap_err();
        assert!(err.is_invalid_argument());
        let mut pso = PSO::new(seeded_rng(0)).with_n_particles(0);
        let err = pso
            .optimize(&func, &x0, &PSOOptions::default(), &mut ())
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(func.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_evaluation_error_propagates() {
        #[derive(Debug, thiserror::Error)]
        #[error("the objective misfired")]
        struct Misfire;
        struct FailingFunction;
        impl CostFunction<(), Misfire> for FailingFunction {
            fn evaluate(&self, _x: &[Float], _user_data: &()) -> Result<Float, Misfire> {
                Err(Misfire)
            }
        }
        let mut pso = PSO::new(seeded_rng(0));
        let err = pso
            .optimize(&FailingFunction, &[0.0], &PSOOptions::default(), &mut ())
            .unwrap_err();
        assert!(!err.is_invalid_argument());
        assert_eq!(err.to_string(), "the objective misfired");
    }

    #[test]
    fn test_evaluation_accounting() {
        let func = CountingSphere(AtomicUsize::new(0));
        let mut pso = PSO::new(seeded_rng(0));
        let options = PSOOptions::default()
            .with_max_iterations(20)
            .with_tolerance(0.0);
        let summary = pso.optimize(&func, &[1.0, 1.0], &options, &mut ()).unwrap();
        // one initialization sweep plus one sweep per completed iteration
        let expected = 30 * (summary.iterations + 1);
        assert_eq!(summary.cost_evals, expected);
        assert_eq!(func.0.load(Ordering::SeqCst), expected);
    }

    #[test]
    fn test_global_best_is_monotonic() {
        let tracker = TrackingSwarmObserver::build();
        let mut pso = PSO::new(seeded_rng(2)).with_observer(tracker.clone());
        let options = PSOOptions::default()
            .with_max_iterations(100)
            .with_tolerance(0.0);
        pso.optimize(&Rastrigin { n: 3 }, &[0.0, 0.0, 0.0], &options, &mut ())
            .unwrap();
        let tracker = tracker.read();
        assert_eq!(tracker.best_history.len(), 100);
        assert!(tracker
            .best_history
            .windows(2)
            .all(|pair| pair[0].fx >= pair[1].fx));
    }

    #[test]
    fn test_global_best_bounds_personal_bests_across_pool_sizes() {
        for n_threads in [1, 2, 8] {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n_threads)
                .build()
                .map_err(|_| "pool construction failed")
                .unwrap();
            let tracker = TrackingSwarmObserver::build();
            let summary = pool.install(|| {
                let mut pso = PSO::new(seeded_rng(3)).with_observer(tracker.clone());
                let options = PSOOptions::default()
                    .with_max_iterations(50)
                    .with_tolerance(0.0);
                pso.optimize(&Rastrigin { n: 2 }, &[0.0, 0.0], &options, &mut ())
                    .unwrap()
            });
            let tracker = tracker.read();
            for (particles, gbest) in tracker.history.iter().zip(&tracker.best_history) {
                assert!(particles.iter().all(|p| gbest.fx <= p.best.fx));
            }
            assert_eq!(summary.x.len(), 2);
        }
    }

    #[test]
    fn test_observer_break_stops_the_run() {
        struct BreakAfter(usize);
        impl SwarmObserver<()> for BreakAfter {
            fn callback(
                &mut self,
                step: usize,
                _status: &mut SwarmStatus,
                _user_data: &mut (),
            ) -> ControlFlow<()> {
                if step >= self.0 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            }
        }
        let mut pso = PSO::new(seeded_rng(0)).with_observer(Arc::new(RwLock::new(BreakAfter(3))));
        let options = PSOOptions::default()
            .with_max_iterations(100)
            .with_tolerance(0.0);
        let summary = pso
            .optimize(&Sphere { n: 2 }, &[0.0, 0.0], &options, &mut ())
            .unwrap();
        assert_eq!(summary.iterations, 3);
        assert_eq!(summary.message, "Particle Swarm Optimization completed.");
    }

    #[test]
    fn test_abort_signal_stops_the_run() {
        struct AbortAfter {
            step: usize,
            signal: Arc<AtomicAbortSignal>,
        }
        impl SwarmObserver<()> for AbortAfter {
            fn callback(
                &mut self,
                step: usize,
                _status: &mut SwarmStatus,
                _user_data: &mut (),
            ) -> ControlFlow<()> {
                if step >= self.step {
                    self.signal.abort();
                }
                ControlFlow::Continue(())
            }
        }
        let signal = Arc::new(AtomicAbortSignal::new());
        let mut pso = PSO::new(seeded_rng(0))
            .with_observer(Arc::new(RwLock::new(AbortAfter {
                step: 2,
                signal: signal.clone(),
            })))
            .with_abort_signal(signal.boxed());
        let options = PSOOptions::default()
            .with_max_iterations(100)
            .with_tolerance(0.0);
        let summary = pso
            .optimize(&Sphere { n: 2 }, &[0.0, 0.0], &options, &mut ())
            .unwrap();
        assert_eq!(summary.iterations, 2);
        assert!(!summary.converged);
        assert_eq!(summary.message, "Abort signal received");
    }

    #[test]
    fn test_shape_is_stable_across_repeated_calls() {
        let mut pso = PSO::new(seeded_rng(4));
        let options = PSOOptions::default().with_max_iterations(10);
        for _ in 0..3 {
            let summary = pso
                .optimize(&Sphere { n: 4 }, &[0.0; 4], &options, &mut ())
                .unwrap();
            assert_eq!(summary.x.len(), 4);
            assert!(summary.iterations >= 1);
        }
    }
}
