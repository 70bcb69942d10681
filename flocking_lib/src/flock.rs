use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::boid::Boid;
use crate::options::{RunOptions, TrackerType};

pub mod naive_tracker;
pub mod spathash_tracker;
pub mod tracker;

pub use naive_tracker::NaiveTracker;
pub use spathash_tracker::SpatHashTracker;
pub use tracker::Tracker;

/// The population of boids and the tracker answering its neighbourhood
/// queries. Boid ids always equal their index in the population.
pub struct Flock {
    boids: Vec<Boid>,
    tracker: Box<dyn Tracker>,
    seed: u64,
}

impl Flock {
    /// Spawns `init_boids` boids, seeded from `run_options.seed` or from
    /// entropy.
    pub fn new(run_options: &RunOptions) -> Self {
        let seed = run_options
            .seed
            .unwrap_or_else(|| rand::thread_rng().gen());
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

        let boids = (0..run_options.init_boids)
            .map(|id| Boid::random(&mut rng, id, run_options))
            .collect();

        let mut flock = Flock::from_boids(boids, run_options);
        flock.seed = seed;
        flock
    }

    /// Builds a flock from given boids, re-assigning ids by position in the
    /// vector.
    pub fn from_boids(mut boids: Vec<Boid>, run_options: &RunOptions) -> Self {
        boids
            .iter_mut()
            .enumerate()
            .for_each(|(index, b)| b.id = index);

        let tracker = get_tracker(&boids, run_options);
        log::debug!(
            "flock of {} boids tracked by {}",
            boids.len(),
            tracker.name()
        );

        Flock {
            boids,
            tracker,
            seed: 0,
        }
    }

    pub fn view(&self) -> &[Boid] {
        &self.boids
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    /// seed the population was spawned from, 0 for hand-built flocks
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Advances the flock by one frame.
    ///
    /// Runs in three phases: every boid wraps around the edges, then forces
    /// for every boid are computed against that frozen population, then every
    /// boid integrates its own force. No boid sees another boid's update from
    /// the same frame.
    pub fn update(
        &mut self,
        run_options: &RunOptions,
        seek_location: Option<Vec2>,
        predator_location: Option<Vec2>,
    ) {
        for boid in self.boids.iter_mut() {
            boid.edges(run_options);
        }

        self.tracker.update(&self.boids, run_options);

        let mut accelleration: Vec<Vec2> = Vec::with_capacity(self.boids.len());
        let mut neighbours: Vec<&Boid> = Vec::new();

        // calculation loop
        for boid in self.boids.iter() {
            neighbours.clear();
            self.tracker
                .get_neighbours(boid, &self.boids, run_options, &mut neighbours);
            accelleration.push(boid.run_rules(
                &neighbours,
                seek_location,
                predator_location,
                run_options,
            ));
        }

        // update loop
        for (boid, force) in self.boids.iter_mut().zip(accelleration) {
            boid.apply_force(force);
            boid.update(run_options);
        }

        log::trace!("flock of {} advanced", self.boids.len());
    }
}

fn get_tracker(boids: &[Boid], run_options: &RunOptions) -> Box<dyn Tracker> {
    match run_options.tracker_type {
        TrackerType::Naive => Box::new(NaiveTracker::new(boids, run_options)),
        TrackerType::SpatHash => Box::new(SpatHashTracker::new(boids, run_options)),
    }
}
