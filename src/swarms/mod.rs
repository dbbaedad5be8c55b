/// Module containing the particle swarm optimizer.
pub mod pso;
/// Module containing the swarm data model and the per-run status.
pub mod swarm;

pub use pso::{TrackingSwarmObserver, PSO};
pub use swarm::{Swarm, SwarmParticle, SwarmStatus};
