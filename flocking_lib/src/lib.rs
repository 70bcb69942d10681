use birdwatcher::{Birdwatcher, MetricsSample};
use options::RunOptions;
use simulation::{FrameInput, Simulation, SimulationError};

pub use glam;

pub mod boid;
pub mod flock;

pub mod birdwatcher;
pub mod math_helpers;
pub mod options;
pub mod pacer;
pub mod simulation;

/// Runs the simulation headless for `no_iter` frames with no input and
/// returns the metrics sampled along the way.
pub fn flock_base(
    no_iter: u64,
    run_options: RunOptions,
) -> Result<Vec<MetricsSample>, SimulationError> {
    let mut bird_watcher = Birdwatcher::new(run_options.sample_rate);
    let mut simulation = Simulation::new(run_options)?;
    let input = FrameInput::default();

    for _ in 0..no_iter {
        simulation.step(&input)?;
        bird_watcher.watch(simulation.flock())?;
    }

    Ok(bird_watcher.pop_data())
}
