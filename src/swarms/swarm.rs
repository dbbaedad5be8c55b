use std::{cmp::Ordering, fmt::Display};

use fastrand::Rng;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::{
    core::Point, traits::CostFunction, utils::generate_random_vector, DVector, Float,
};

/// The range particle positions are sampled from at initialization (per dimension).
pub const POSITION_SAMPLE_RANGE: (Float, Float) = (-5.0, 5.0);
/// The range particle velocities are sampled from at initialization (per dimension).
pub const VELOCITY_SAMPLE_RANGE: (Float, Float) = (-1.0, 1.0);

/// A particle with a position, velocity, and best known position.
///
/// Each particle also owns its own random generator, forked from the optimizer's
/// master generator at initialization, so the parallel update phase never contends on a
/// shared source of randomness.
#[derive(Clone, Serialize, Deserialize)]
pub struct SwarmParticle {
    /// The current position of the particle and its evaluation
    pub position: Point,
    /// The velocity of the particle
    pub velocity: DVector<Float>,
    /// The best position the particle has visited (as measured by the minimum value of `fx`)
    pub best: Point,
    #[serde(skip, default = "Rng::new")]
    rng: Rng,
}

impl SwarmParticle {
    /// Create a new particle with a position sampled uniformly from
    /// [`POSITION_SAMPLE_RANGE`] and a velocity sampled uniformly from
    /// [`VELOCITY_SAMPLE_RANGE`], evaluating the function at the sampled position.
    pub(crate) fn new<U, E>(
        dimension: usize,
        func: &dyn CostFunction<U, E>,
        user_data: &U,
        rng: &mut Rng,
    ) -> Result<Self, E> {
        let position = Point::new(
            generate_random_vector(
                dimension,
                POSITION_SAMPLE_RANGE.0,
                POSITION_SAMPLE_RANGE.1,
                rng,
            ),
            func,
            user_data,
        )?;
        let velocity = generate_random_vector(
            dimension,
            VELOCITY_SAMPLE_RANGE.0,
            VELOCITY_SAMPLE_RANGE.1,
            rng,
        );
        Ok(Self {
            best: position.clone(),
            position,
            velocity,
            rng: rng.fork(),
        })
    }
    /// Perform one velocity/position update and re-evaluate the function.
    ///
    /// The global best is read once (under its lock) before the velocity computation, so a
    /// particle may pull toward a best that another particle is improving concurrently; the
    /// compare-and-replace at the end is fully mutually exclusive.
    pub(crate) fn step<U, E>(
        &mut self,
        func: &dyn CostFunction<U, E>,
        user_data: &U,
        gbest: &Mutex<Point>,
        inertia: Float,
        cognitive: Float,
        social: Float,
    ) -> Result<(), E> {
        let gbest_x = gbest.lock().x.clone();
        let dim = self.position.x.len();
        let rv1 = generate_random_vector(dim, 0.0, 1.0, &mut self.rng);
        let rv2 = generate_random_vector(dim, 0.0, 1.0, &mut self.rng);
        self.velocity = self.velocity.scale(inertia)
            + rv1
                .component_mul(&(&self.best.x - &self.position.x))
                .scale(cognitive)
            + rv2
                .component_mul(&(&gbest_x - &self.position.x))
                .scale(social);
        self.position = Point::new(&self.position.x + &self.velocity, func, user_data)?;
        if self.position.total_cmp(&self.best) == Ordering::Less {
            self.best = self.position.clone();
        }
        let mut gbest = gbest.lock();
        if self.position.total_cmp(&gbest) == Ordering::Less {
            *gbest = self.position.clone();
        }
        Ok(())
    }
}

/// A swarm of particles used in particle swarm optimization.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Swarm {
    /// The dimension of the parameter space
    pub dimension: usize,
    /// A list of the particles in the swarm
    pub particles: Vec<SwarmParticle>,
}

impl Swarm {
    /// Initialize a swarm of `n_particles` particles in a `dimension`-dimensional space.
    /// Particles are created (and evaluated) sequentially from the given generator.
    pub(crate) fn new<U, E>(
        dimension: usize,
        n_particles: usize,
        func: &dyn CostFunction<U, E>,
        user_data: &U,
        rng: &mut Rng,
    ) -> Result<Self, E> {
        let particles = (0..n_particles)
            .map(|_| SwarmParticle::new(dimension, func, user_data, rng))
            .collect::<Result<Vec<SwarmParticle>, E>>()?;
        Ok(Self {
            dimension,
            particles,
        })
    }
    /// Get the best personal best in the swarm, starting from an infinite sentinel (so an
    /// empty swarm yields [`Point::infinite`]).
    pub fn best(&self) -> Point {
        self.particles
            .iter()
            .fold(Point::infinite(self.dimension), |best, particle| {
                if particle.best.total_cmp(&best) == Ordering::Less {
                    particle.best.clone()
                } else {
                    best
                }
            })
    }
}

/// The state of a run, exposed to [`SwarmObserver`](`crate::traits::SwarmObserver`)s after
/// every completed iteration.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct SwarmStatus {
    /// The swarm
    pub swarm: Swarm,
    /// The global best position found by all particles
    pub gbest: Point,
    /// An indicator of whether the run has reached the tolerance
    pub converged: bool,
    /// A message containing information about the condition of the run
    pub message: String,
    /// The number of function evaluations performed so far
    pub n_f_evals: usize,
    /// The number of completed iterations (counted from `1`)
    pub iterations: usize,
}

impl SwarmStatus {
    /// Updates the [`SwarmStatus::message`] field.
    pub fn update_message(&mut self, message: &str) {
        self.message = message.to_string();
    }
}

impl Display for SwarmStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "╒══════════════════════════════════════════════════════════╕")?;
        writeln!(f, "│{:^58}│", "SWARM STATUS")?;
        writeln!(f, "╞═══════════════════════════╤══════════════════════════════╡")?;
        writeln!(
            f,
            "│ Status: {:<18}│ fval: {:>+22.3E} │",
            if self.converged {
                "Converged"
            } else {
                "Processing"
            },
            self.gbest.fx,
        )?;
        writeln!(f, "├───────────────────────────┴──────────────────────────────┤")?;
        writeln!(f, "│ Message: {:<48}│", self.message)?;
        writeln!(f, "├───────╥──────────────────────────────────────────────────┤")?;
        writeln!(f, "│ Par # ║ {:<49}│", "Value")?;
        writeln!(f, "├───────╫──────────────────────────────────────────────────┤")?;
        for (i, xi) in self.gbest.x.iter().enumerate() {
            writeln!(f, "│ {:>5} ║ {:<48} │", i, format!("{:>+18.8E}", xi))?;
        }
        write!(f, "└───────╨──────────────────────────────────────────────────┘")
    }
}
