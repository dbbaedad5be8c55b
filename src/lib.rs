//! `murmuration` (named after the swarming flight of starlings) provides a parallel
//! implementation of Particle Swarm Optimization (PSO) with a straightforward, trait-based
//! interface. This crate is intended to be as simple as possible. The user needs to implement the
//! [`CostFunction`](`traits::CostFunction`) trait on some struct which will take a vector of
//! parameters and return a single-valued [`Result`] ($`f(\mathbb{R}^n) \to \mathbb{R}`$). The
//! optimizer scatters a swarm of candidate solutions over the search space and lets the swarm's
//! collective memory pull it toward a minimum, evaluating all particles concurrently at every
//! iteration.
//!
//! <div class="warning">
//!
//! This crate is still in an early development phase, and the API is not stable. It can (and
//! likely will) be subject to breaking changes before the 1.0.0 version release (and hopefully not
//! many after that).
//!
//! </div>
//!
//! # Table of Contents
//! - [Key Features](#key-features)
//! - [Quick Start](#quick-start)
//! - [Termination](#termination)
//! - [Randomness and Parallelism](#randomness-and-parallelism)
//!
//! # Key Features
//! * A single optimizer with sensible defaults: 30 particles, inertia weight `0.7`, cognitive and
//!   social weights `1.5`.
//! * Per-iteration particle updates fan out across a [`rayon`] thread pool and join before the
//!   termination check, so wall-clock time scales with the cost of the objective, not the swarm
//!   size.
//! * [`SwarmObserver`](`traits::SwarmObserver`)s can watch (and stop) a run after every iteration,
//!   and [`AbortSignal`](`traits::AbortSignal`)s allow cooperative cancellation; pressing `Ctrl-C`
//!   with a [`CtrlCAbortSignal`](`core::CtrlCAbortSignal`) installed will still produce a
//!   [`PSOSummary`](`core::PSOSummary`), but its message will indicate that the run was ended by
//!   the user.
//! * Generics to allow the use of `f64` (default) or `f32` scalars (via the `f32` feature).
//!
//! # Quick Start
//!
//! Consider minimizing a paraboloid with its minimum at $`(1, 2)`$:
//!
//! ```rust
//! use std::convert::Infallible;
//!
//! use fastrand::Rng;
//! use murmuration::prelude::*;
//!
//! struct Paraboloid;
//! impl CostFunction for Paraboloid {
//!     fn evaluate(&self, x: &[Float], _user_data: &()) -> Result<Float, Infallible> {
//!         Ok((x[0] - 1.0).powi(2) + (x[1] - 2.0).powi(2))
//!     }
//! }
//!
//! fn main() -> Result<(), PSOError> {
//!     let mut rng = Rng::new();
//!     rng.seed(0);
//!     let mut pso = PSO::new(rng);
//!     let options = PSOOptions::default()
//!         .with_max_iterations(500)
//!         .with_tolerance(1e-6);
//!     let summary = pso.optimize(&Paraboloid, &[0.0, 0.0], &options, &mut ())?;
//!     println!("{}", summary);
//!     assert!(summary.converged);
//!     Ok(())
//! }
//! ```
//!
//! This should output something like
//! ```shell
//! MSG:       Particle Swarm Optimization completed.
//! X:         +1.000
//!            +2.000
//! F(X):      +0.000
//! N_ITER:    74
//! N_F_EVALS: 2250
//! CONVERGED: true
//! ```
//!
//! Note that the initial guess only communicates the dimension of the problem: the swarm is
//! always seeded uniformly over $`[-5, 5]^n`$ regardless of the guess's values.
//!
//! # Termination
//!
//! A run ends as soon as one of the following holds, checked once per completed iteration:
//! * $`|f(g)| \leq t`$ where $`g`$ is the swarm's best position and $`t`$ is
//!   [`PSOOptions::tolerance`](`core::PSOOptions::tolerance`). This compares the *value* of the
//!   best objective against the tolerance rather than an improvement delta, so it only fires for
//!   objectives whose minimum lies at or near zero; any other objective simply runs out the
//!   iteration budget.
//! * The iteration count reaches
//!   [`PSOOptions::max_iterations`](`core::PSOOptions::max_iterations`).
//! * An observer returns [`ControlFlow::Break`](`std::ops::ControlFlow::Break`) or the installed
//!   [`AbortSignal`](`traits::AbortSignal`) fires.
//!
//! # Randomness and Parallelism
//!
//! All sampling flows from the single [`fastrand::Rng`] handed to [`PSO::new`](`swarms::PSO::new`):
//! swarm initialization draws from it directly, and each particle then receives its own generator
//! forked from it for the parallel phase. Seeding the master generator therefore fixes the random
//! streams, but because particles race for the shared global best, the exact trajectory can still
//! vary between runs with the same seed. The sampled distributions (and the statistical behavior
//! of the algorithm) do not.
#![warn(
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::doc_markdown,
    clippy::doc_link_with_quotes,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::perf,
    clippy::style,
    missing_docs
)]

/// Module containing shared data carriers, errors, and abort signals.
pub mod core;
/// Module containing the swarm data model and the particle swarm optimizer.
pub mod swarms;
/// Module containing standard functions for testing algorithms.
pub mod test_functions;
/// Module containing the crate's core traits.
pub mod traits;
/// Module containing random sampling utilities.
pub mod utils;

/// Prelude module containing everything someone should need to use this crate for non-development
/// purposes.
pub mod prelude {
    pub use crate::core::{PSOError, PSOOptions, PSOSummary};
    pub use crate::swarms::{Swarm, SwarmParticle, SwarmStatus, PSO};
    pub use crate::traits::{AbortSignal, CostFunction, SwarmObserver};
    pub use crate::{DVector, Float, PI};
}

pub use nalgebra::DVector;

#[cfg(not(feature = "f32"))]
/// A floating-point number type (defaults to [`f64`], see `f32` feature).
pub type Float = f64;

#[cfg(feature = "f32")]
/// A floating-point number type (defaults to [`f64`], see `f32` feature).
pub type Float = f32;

#[cfg(not(feature = "f32"))]
/// The mathematical constant $`\pi`$.
pub const PI: Float = std::f64::consts::PI;

#[cfg(feature = "f32")]
/// The mathematical constant $`\pi`$.
pub const PI: Float = std::f32::consts::PI;
