use std::mem;

use glam::Vec2;
use thiserror::Error;

use crate::{boid::Boid, flock::Flock};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MetricsError {
    #[error("metrics are undefined for an empty flock")]
    EmptyFlock,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockMetrics {
    /// mean of the boids' speeds
    pub average_speed: f32,
    /// mean distance of the boids from the flock's centre of mass
    pub cohesion_measure: f32,
}

impl FlockMetrics {
    /// The two lines shown on screen.
    pub fn lines(&self) -> [String; 2] {
        [
            format!("Average Speed: {:.2}", self.average_speed),
            format!("Cohesion Measure: {:.2}", self.cohesion_measure),
        ]
    }
}

pub fn compute_metrics(boids: &[Boid]) -> Result<FlockMetrics, MetricsError> {
    if boids.is_empty() {
        return Err(MetricsError::EmptyFlock);
    }
    let n = boids.len() as f32;

    let average_speed = boids.iter().map(|b| b.velocity.length()).sum::<f32>() / n;

    let center_of_mass = Vec2::new(
        boids.iter().map(|b| b.position.x).sum::<f32>() / n,
        boids.iter().map(|b| b.position.y).sum::<f32>() / n,
    );
    let cohesion_measure = boids
        .iter()
        .map(|b| b.position.distance(center_of_mass))
        .sum::<f32>()
        / n;

    Ok(FlockMetrics {
        average_speed,
        cohesion_measure,
    })
}

// so right now, this is more of a metrics acummulator than a birdwatcher
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsSample {
    pub frame: u64,
    pub metrics: FlockMetrics,
}

pub struct Birdwatcher {
    samples: Vec<MetricsSample>,
    render_ticker: u64,
    sample_rate: u64,
}

impl Birdwatcher {
    pub fn new(sample_rate: u64) -> Self {
        Birdwatcher {
            samples: Vec::new(),
            render_ticker: 0,
            sample_rate: sample_rate.max(1),
        }
    }

    /// Triggers data collection
    pub fn watch(&mut self, flock: &Flock) -> Result<(), MetricsError> {
        if !self.should_sample() {
            return Ok(());
        }

        let metrics = compute_metrics(flock.view())?;
        self.samples.push(MetricsSample {
            frame: self.render_ticker,
            metrics,
        });

        Ok(())
    }

    pub fn pop_data(&mut self) -> Vec<MetricsSample> {
        mem::take(&mut self.samples)
    }

    fn should_sample(&mut self) -> bool {
        self.render_ticker += 1;

        self.render_ticker % self.sample_rate == 0
    }
}
