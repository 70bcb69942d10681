use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const WIDTH: f32 = 800.;
pub const HEIGHT: f32 = 600.;
pub const NUM_BOIDS: usize = 50;
pub const MAX_SPEED: f32 = 4.;
pub const MAX_FORCE: f32 = 0.1;
pub const BOID_RADIUS: f32 = 5.;
pub const PERCEPTION_RADIUS: f32 = 50.;
pub const FPS: u32 = 60;

#[derive(Error, Debug, PartialEq)]
pub enum OptionsError {
    #[error("`{name}` must be a positive finite number, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("the flock needs at least one boid")]
    EmptyFlock,
    #[error("`{name}` must be greater than zero")]
    Zero { name: &'static str },
    #[error("unknown tracker `{0}`, expected `naive` or `spathash`")]
    UnknownTracker(String),
}

/// World constants and run settings. Read-only once a simulation is running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOptions {
    pub init_boids: usize,

    /// world x range is [0, width)
    pub width: f32,
    /// world y range is [0, height)
    pub height: f32,

    pub max_speed: f32,
    pub max_force: f32,

    /// neighbours closer than this are considered by alignment and cohesion,
    /// separation uses half of it
    pub perception_radius: f32,
    /// visual size only
    pub boid_radius: f32,

    pub tracker_type: TrackerType,
    /// `None` draws a fresh seed
    pub seed: Option<u64>,
    /// metrics history keeps every n-th frame
    pub sample_rate: u64,
    pub fps: u32,
}

impl RunOptions {
    pub fn separation_radius(&self) -> f32 {
        self.perception_radius / 2.
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("max_speed", self.max_speed),
            ("max_force", self.max_force),
            ("perception_radius", self.perception_radius),
            ("boid_radius", self.boid_radius),
        ] {
            if !(value.is_finite() && value > 0.) {
                return Err(OptionsError::NonPositive { name, value });
            }
        }

        if self.init_boids == 0 {
            return Err(OptionsError::EmptyFlock);
        }
        if self.sample_rate == 0 {
            return Err(OptionsError::Zero { name: "sample_rate" });
        }
        if self.fps == 0 {
            return Err(OptionsError::Zero { name: "fps" });
        }

        Ok(())
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            init_boids: NUM_BOIDS,
            width: WIDTH,
            height: HEIGHT,
            max_speed: MAX_SPEED,
            max_force: MAX_FORCE,
            perception_radius: PERCEPTION_RADIUS,
            boid_radius: BOID_RADIUS,
            tracker_type: TrackerType::SpatHash,
            // tracker_type: TrackerType::Naive,
            seed: None,
            sample_rate: 1,
            fps: FPS,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
// {"type": "SpatHash"}
pub enum TrackerType {
    Naive,
    SpatHash,
}

impl FromStr for TrackerType {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "naive" => Ok(TrackerType::Naive),
            "spathash" | "grid" => Ok(TrackerType::SpatHash),
            _ => Err(OptionsError::UnknownTracker(s.to_owned())),
        }
    }
}
