use crate::{boid::Boid, options::RunOptions};

use super::tracker::Tracker;

/// A naive implementation of boids tracking, which uses an O(N^2) algorithm for
/// finding boid's neighbours.
pub struct NaiveTracker;

impl NaiveTracker {
    pub fn get_neighbours_naive<'a>(
        boid: &Boid,
        all_boids: &'a [Boid],
        run_options: &RunOptions,
        neighbours: &mut Vec<&'a Boid>,
    ) {
        for b_other in all_boids.iter() {
            if b_other.id == boid.id {
                continue;
            }

            let distance = boid.position.distance(b_other.position);
            if distance < run_options.perception_radius {
                neighbours.push(b_other);
            }
        }
    }
}

impl Tracker for NaiveTracker {
    fn new(_: &[Boid], _: &RunOptions) -> Self {
        NaiveTracker
    }

    fn update(&mut self, _: &[Boid], _: &RunOptions) {
        // noop, every query scans the whole flock
    }

    fn get_neighbours<'a>(
        &self,
        boid: &Boid,
        entities: &'a [Boid],
        run_options: &RunOptions,
        neighbours: &mut Vec<&'a Boid>,
    ) {
        NaiveTracker::get_neighbours_naive(boid, entities, run_options, neighbours);
    }

    fn name(&self) -> &'static str {
        "naive"
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::NaiveTracker;
    use crate::{boid::Boid, flock::tracker::Tracker, options::RunOptions};

    #[test]
    fn finds_neighbours_within_radius() {
        let ro = RunOptions::default();
        let boids = vec![
            Boid::new(100., 100., Vec2::ZERO, 0),
            Boid::new(149., 100., Vec2::ZERO, 1),
            Boid::new(150., 100., Vec2::ZERO, 2),
            Boid::new(100., 100., Vec2::ZERO, 3),
            Boid::new(700., 500., Vec2::ZERO, 4),
        ];
        let tracker = NaiveTracker::new(&boids, &ro);
        let mut neighbours = Vec::new();

        tracker.get_neighbours(&boids[0], &boids, &ro, &mut neighbours);

        let ids: Vec<usize> = neighbours.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
