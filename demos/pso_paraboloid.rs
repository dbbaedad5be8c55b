use std::convert::Infallible;
use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use fastrand::Rng;
use murmuration::core::CtrlCAbortSignal;
use murmuration::prelude::*;
use murmuration::swarms::TrackingSwarmObserver;

fn main() -> Result<(), Box<dyn Error>> {
    // Define the function to minimize (a paraboloid with its minimum at (1, 2))
    struct Paraboloid;
    impl CostFunction for Paraboloid {
        fn evaluate(&self, x: &[Float], _user_data: &()) -> Result<Float, Infallible> {
            Ok((x[0] - 1.0).powi(2) + (x[1] - 2.0).powi(2) + 3.0)
        }
    }

    // Create and seed a random number generator
    let mut rng = Rng::new();
    rng.seed(0);

    // Create a tracker to record swarm history
    let tracker = TrackingSwarmObserver::build();

    // Create a particle swarm optimizer which can be stopped with Ctrl-C
    let mut pso = PSO::new(rng)
        .with_observer(tracker.clone())
        .with_abort_signal(CtrlCAbortSignal::new().boxed());

    // Run the particle swarm optimizer (the guess only sets the dimension)
    let options = PSOOptions::default()
        .with_max_iterations(500)
        .with_tolerance(1e-6);
    let summary = pso.optimize(&Paraboloid, &[0.0, 0.0], &options, &mut ())?;

    println!("{}", summary);

    // Export the recorded history to a Python .pkl file to visualize via matplotlib
    let mut writer = BufWriter::new(File::create(Path::new("data.pkl"))?);
    serde_pickle::to_writer(&mut writer, &*tracker.read(), Default::default())?;
    Ok(())
}
