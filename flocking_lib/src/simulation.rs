use glam::Vec2;
use log::{debug, info};
use thiserror::Error;

use crate::{
    birdwatcher::{compute_metrics, FlockMetrics, MetricsError},
    flock::Flock,
    math_helpers::heading,
    options::{OptionsError, RunOptions},
};

pub const MENU_LINES: [&str; 4] = [
    "Press 1: Toggle Mouse Attraction",
    "Press 2: Toggle Predator",
    "Press 3: Show Metrics",
    "Press Esc: Quit",
];

#[derive(Error, Debug, PartialEq)]
pub enum SimulationError {
    #[error("the simulation has been stopped")]
    Stopped,
    #[error("invalid run options: {0}")]
    Options(#[from] OptionsError),
    #[error(transparent)]
    Metrics(#[from] MetricsError),
}

/// Interaction switches, flipped by key presses.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Toggles {
    pub mouse_attraction: bool,
    pub enable_predator: bool,
    pub show_metrics: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleMouseAttraction,
    TogglePredator,
    ToggleMetrics,
    Quit,
}

/// Everything the input side hands over for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// pointer in world coordinates
    pub pointer: Vec2,
    pub commands: Vec<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoidView {
    pub position: Vec2,
    pub velocity: Vec2,
    /// radians, see [`crate::math_helpers::heading`]
    pub heading: f32,
}

/// What the renderer draws for a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub boids: Vec<BoidView>,
    pub predator: Option<Vec2>,
    pub metrics: Option<FlockMetrics>,
    pub menu: &'static [&'static str; 4],
}

pub struct Simulation {
    run_options: RunOptions,
    flock: Flock,
    toggles: Toggles,
    state: RunState,
    frame: u64,
}

impl Simulation {
    pub fn new(run_options: RunOptions) -> Result<Self, SimulationError> {
        run_options.validate()?;

        let flock = Flock::new(&run_options);
        info!(
            "simulation of {} boids in {}x{}, seed {}",
            flock.len(),
            run_options.width,
            run_options.height,
            flock.seed()
        );

        Ok(Simulation {
            run_options,
            flock,
            toggles: Toggles::default(),
            state: RunState::Running,
            frame: 0,
        })
    }

    /// Runs one frame: applies the input commands, advances the flock and
    /// collects what has to be drawn.
    ///
    /// A frame carrying [`Command::Quit`] still runs to completion, every
    /// later call fails with [`SimulationError::Stopped`].
    pub fn step(&mut self, input: &FrameInput) -> Result<FrameSnapshot, SimulationError> {
        if self.state == RunState::Stopped {
            return Err(SimulationError::Stopped);
        }

        let mut stopping = false;
        for command in input.commands.iter() {
            match command {
                Command::ToggleMouseAttraction => {
                    self.toggles.mouse_attraction = !self.toggles.mouse_attraction;
                    debug!("mouse attraction {}", self.toggles.mouse_attraction);
                }
                Command::TogglePredator => {
                    self.toggles.enable_predator = !self.toggles.enable_predator;
                    debug!("predator {}", self.toggles.enable_predator);
                }
                Command::ToggleMetrics => {
                    self.toggles.show_metrics = !self.toggles.show_metrics;
                    debug!("metrics {}", self.toggles.show_metrics);
                }
                Command::Quit => stopping = true,
            }
        }

        let pointer = input.pointer;
        let seek_location = self.toggles.mouse_attraction.then_some(pointer);
        let predator = self.toggles.enable_predator.then_some(pointer);

        self.flock
            .update(&self.run_options, seek_location, predator);
        self.frame += 1;

        let metrics = if self.toggles.show_metrics {
            Some(compute_metrics(self.flock.view())?)
        } else {
            None
        };

        let boids = self
            .flock
            .view()
            .iter()
            .map(|b| BoidView {
                position: b.position,
                velocity: b.velocity,
                heading: heading(b.velocity),
            })
            .collect();

        if stopping {
            info!("simulation stopped after {} frames", self.frame);
            self.state = RunState::Stopped;
        }

        Ok(FrameSnapshot {
            boids,
            predator,
            metrics,
            menu: &MENU_LINES,
        })
    }

    pub fn toggles(&self) -> Toggles {
        self.toggles
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// number of frames run so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn flock(&self) -> &Flock {
        &self.flock
    }

    pub fn options(&self) -> &RunOptions {
        &self.run_options
    }
}
