use crate::{boid::Boid, options::RunOptions};

// a tracker indexes the flock's positions once per frame and answers
// neighbourhood queries against that frozen population

pub trait Tracker {
    fn new(entities: &[Boid], run_options: &RunOptions) -> Self
    where
        Self: Sized;
    /// Re-indexes the population after it moved.
    fn update(&mut self, entities: &[Boid], run_options: &RunOptions);
    /// Pushes every boid of `entities` closer to `boid` than the perception
    /// radius, excluding `boid` itself, in the order they appear in `entities`.
    ///
    /// `entities` must be the slice last passed to [`Tracker::update`].
    fn get_neighbours<'a>(
        &self,
        boid: &Boid,
        entities: &'a [Boid],
        run_options: &RunOptions,
        neighbours: &mut Vec<&'a Boid>,
    );
    fn name(&self) -> &'static str;
}
