use glam::f32::Vec2;
use rand::Rng;

use crate::{
    math_helpers::{heading, limit_force, wrap_coordinate, ScaleToLength},
    options::RunOptions,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boid {
    // sequential id starting from 0
    pub id: usize,
    pub position: Vec2,
    pub velocity: Vec2,
    acceleration: Vec2,
}

impl Boid {
    /// Creates a new [`Boid`] at rest with respect to forces.
    pub fn new(x: f32, y: f32, velocity: Vec2, id: usize) -> Self {
        Boid {
            id,
            position: Vec2::new(x, y),
            velocity,
            acceleration: Vec2::ZERO,
        }
    }

    /// Spawns a boid anywhere in the world, heading in a random direction at
    /// full speed.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, id: usize, run_options: &RunOptions) -> Self {
        let x = rng.gen_range(0.0..run_options.width);
        let y = rng.gen_range(0.0..run_options.height);

        // a direction of length zero can't be scaled, draw again
        let velocity = loop {
            let direction = Vec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
            if let Some(v) = direction.scale_to_length(run_options.max_speed) {
                break v;
            }
        };

        Boid::new(x, y, velocity, id)
    }

    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    pub fn heading(&self) -> f32 {
        heading(self.velocity)
    }

    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force;
    }

    /// Sum of every force acting on the boid this frame, computed without
    /// touching the boid so the whole flock can be evaluated against one
    /// frozen population.
    ///
    /// `seek_location` attracts, `predator_location` repels within the
    /// perception radius.
    pub fn run_rules(
        &self,
        others: &[&Boid],
        seek_location: Option<Vec2>,
        predator_location: Option<Vec2>,
        run_options: &RunOptions,
    ) -> Vec2 {
        let mut sum = self.alignment(others, run_options)
            + self.cohesion(others, run_options)
            + self.separation(others, run_options);

        if let Some(target) = seek_location {
            sum += self.seek(target, false, run_options);
        }

        if let Some(predator) = predator_location {
            sum += self.flee(predator, run_options);
        }

        sum
    }

    /// Accumulates alignment, cohesion and separation. Does not reset the
    /// acceleration.
    pub fn flock(&mut self, others: &[&Boid], run_options: &RunOptions) {
        let force = self.alignment(others, run_options)
            + self.cohesion(others, run_options)
            + self.separation(others, run_options);
        self.apply_force(force);
    }

    /// Reynolds: steering = desired - velocity, with desired at full speed.
    /// A desired direction of zero length gives no steering at all.
    pub fn steer(&self, desired: Vec2, run_options: &RunOptions) -> Vec2 {
        match desired.scale_to_length(run_options.max_speed) {
            Some(desired) => limit_force(desired - self.velocity, run_options.max_force),
            None => Vec2::ZERO,
        }
    }

    fn is_neighbour(&self, other: &Boid, radius: f32) -> bool {
        other.id != self.id && self.position.distance(other.position) < radius
    }

    /// Steer towards the average heading of nearby boids.
    pub fn alignment(&self, others: &[&Boid], run_options: &RunOptions) -> Vec2 {
        let mut avg = Vec2::ZERO;
        let mut count = 0;

        for other in others {
            if self.is_neighbour(other, run_options.perception_radius) {
                avg += other.velocity;
                count += 1;
            }
        }

        if count > 0 {
            avg /= count as f32;
            self.steer(avg, run_options)
        } else {
            Vec2::ZERO
        }
    }

    /// Steer towards the centre of mass of nearby boids.
    pub fn cohesion(&self, others: &[&Boid], run_options: &RunOptions) -> Vec2 {
        let mut center = Vec2::ZERO;
        let mut count = 0;

        for other in others {
            if self.is_neighbour(other, run_options.perception_radius) {
                center += other.position;
                count += 1;
            }
        }

        if count > 0 {
            center /= count as f32;
            self.steer(center - self.position, run_options)
        } else {
            Vec2::ZERO
        }
    }

    /// Steer away from crowding, weighting each neighbour by the inverse of
    /// its distance. Coincident boids have no direction to push apart in and
    /// are skipped.
    pub fn separation(&self, others: &[&Boid], run_options: &RunOptions) -> Vec2 {
        let mut res = Vec2::ZERO;
        let mut count = 0;
        let radius = run_options.separation_radius();

        for other in others {
            if other.id == self.id {
                continue;
            }

            let distance = self.position.distance(other.position);
            if distance > 0. && distance < radius {
                res += (self.position - other.position) / distance;
                count += 1;
            }
        }

        if count > 0 {
            res /= count as f32;
            self.steer(res, run_options)
        } else {
            Vec2::ZERO
        }
    }

    /// Steering towards `target`, or away from it when `repel` is set.
    pub fn seek(&self, target: Vec2, repel: bool, run_options: &RunOptions) -> Vec2 {
        let desired = if repel {
            self.position - target
        } else {
            target - self.position
        };

        self.steer(desired, run_options)
    }

    pub fn seek_target(&mut self, target: Vec2, repel: bool, run_options: &RunOptions) {
        let force = self.seek(target, repel, run_options);
        self.apply_force(force);
    }

    /// Steering away from a predator that is within the perception radius.
    pub fn flee(&self, predator: Vec2, run_options: &RunOptions) -> Vec2 {
        if self.position.distance(predator) < run_options.perception_radius {
            self.steer(self.position - predator, run_options)
        } else {
            Vec2::ZERO
        }
    }

    pub fn avoid_predator(&mut self, predator: Vec2, run_options: &RunOptions) {
        let force = self.flee(predator, run_options);
        self.apply_force(force);
    }

    // Actually shifts the individual's location
    pub fn update(&mut self, run_options: &RunOptions) {
        self.velocity += self.acceleration;

        if self.velocity.length() > run_options.max_speed {
            if let Some(v) = self.velocity.scale_to_length(run_options.max_speed) {
                self.velocity = v;
            }
        }

        self.position += self.velocity;

        self.acceleration = Vec2::ZERO;
    }

    /// Wraps the boid around the world edges.
    pub fn edges(&mut self, run_options: &RunOptions) {
        self.position.x = wrap_coordinate(self.position.x, run_options.width);
        self.position.y = wrap_coordinate(self.position.y, run_options.height);
    }
}
