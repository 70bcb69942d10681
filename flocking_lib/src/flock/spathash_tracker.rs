use itertools::iproduct;

use crate::{boid::Boid, options::RunOptions};

use super::tracker::Tracker;

/// Grid dimensions derived from the world size and the perception radius.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialHashingTableSettings {
    /// grid x range
    pub x_cell_count: usize,
    /// grid y range
    pub y_cell_count: usize,
    /// n cells of grid
    pub cell_count: usize,
    /// environment x units per grid x cell
    pub x_cell_res: f32,
    /// environment y units per grid y cell
    pub y_cell_res: f32,
}

/// Uses a uniform grid, where all cells of the underlying table are stored in
/// a 1D array and each cell lists the indexes of the boids inside it.
///
/// Cells are never narrower than the perception radius, so every neighbour of
/// a boid sits in the 3x3 block of cells around the boid's own cell. Candidates
/// from that block are filtered by exact distance and sorted back into flock
/// order, which makes the result identical to [`super::NaiveTracker`].
pub struct SpatHashTracker {
    settings: SpatialHashingTableSettings,
    table: Vec<Vec<usize>>,
}

impl SpatHashTracker {
    pub fn get_tracker_settings(run_options: &RunOptions) -> SpatialHashingTableSettings {
        // a cell has to fit the whole perception radius, fewer and wider cells
        // are fine, narrower would miss neighbours two cells away
        let x_cell_count =
            ((run_options.width / run_options.perception_radius).floor() as usize).max(1);
        let y_cell_count =
            ((run_options.height / run_options.perception_radius).floor() as usize).max(1);

        SpatialHashingTableSettings {
            x_cell_count,
            y_cell_count,
            cell_count: x_cell_count * y_cell_count,
            x_cell_res: run_options.width / x_cell_count as f32,
            y_cell_res: run_options.height / y_cell_count as f32,
        }
    }

    /// Returns the grid coordinates of the cell holding a point.
    ///
    /// Points outside of the world are clamped onto the border cells, which
    /// keeps any two points closer than a cell width in the same or adjacent
    /// cells.
    pub fn get_cell(&self, p_x: f32, p_y: f32) -> (usize, usize) {
        (
            Self::get_axis_index(p_x, self.settings.x_cell_res, self.settings.x_cell_count),
            Self::get_axis_index(p_y, self.settings.y_cell_res, self.settings.y_cell_count),
        )
    }

    #[inline]
    fn get_axis_index(p: f32, res: f32, count: usize) -> usize {
        let i = (p / res).floor();
        if i.is_nan() || i < 0. {
            0
        } else {
            (i as usize).min(count - 1)
        }
    }

    /// 1D table index of a cell, rows are laid out along x
    #[inline]
    pub fn get_table_index(&self, cell: (usize, usize)) -> usize {
        cell.0 + cell.1 * self.settings.x_cell_count
    }

    fn candidates(&self, cell: (usize, usize)) -> impl Iterator<Item = usize> + '_ {
        let (x, y) = (cell.0 as isize, cell.1 as isize);
        let x_max = self.settings.x_cell_count as isize;
        let y_max = self.settings.y_cell_count as isize;

        iproduct!(-1..=1_isize, -1..=1_isize)
            .map(move |(dx, dy)| (x + dx, y + dy))
            // the world does not wrap for neighbourhood purposes
            .filter(move |(cx, cy)| *cx >= 0 && *cx < x_max && *cy >= 0 && *cy < y_max)
            .flat_map(move |(cx, cy)| {
                self.table[self.get_table_index((cx as usize, cy as usize))]
                    .iter()
                    .copied()
            })
    }
}

impl Tracker for SpatHashTracker {
    fn new(entities: &[Boid], run_options: &RunOptions) -> Self {
        let settings = SpatHashTracker::get_tracker_settings(run_options);
        log::debug!(
            "spatial hash grid {}x{} cells of {:.1}x{:.1}",
            settings.x_cell_count,
            settings.y_cell_count,
            settings.x_cell_res,
            settings.y_cell_res
        );

        let mut tracker = SpatHashTracker {
            table: vec![Vec::new(); settings.cell_count],
            settings,
        };
        tracker.update(entities, run_options);
        tracker
    }

    fn update(&mut self, entities: &[Boid], run_options: &RunOptions) {
        let settings = SpatHashTracker::get_tracker_settings(run_options);
        if settings != self.settings {
            self.table = vec![Vec::new(); settings.cell_count];
            self.settings = settings;
        }

        for cell in self.table.iter_mut() {
            cell.clear();
        }

        for (index, boid) in entities.iter().enumerate() {
            let cell = self.get_cell(boid.position.x, boid.position.y);
            let table_index = self.get_table_index(cell);
            self.table[table_index].push(index);
        }
    }

    fn get_neighbours<'a>(
        &self,
        boid: &Boid,
        entities: &'a [Boid],
        run_options: &RunOptions,
        neighbours: &mut Vec<&'a Boid>,
    ) {
        let cell = self.get_cell(boid.position.x, boid.position.y);

        let mut found: Vec<usize> = self
            .candidates(cell)
            .filter(|&i| {
                let other = &entities[i];
                other.id != boid.id
                    && boid.position.distance(other.position) < run_options.perception_radius
            })
            .collect();
        found.sort_unstable();

        neighbours.extend(found.into_iter().map(|i| &entities[i]));
    }

    fn name(&self) -> &'static str {
        "spathash"
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256PlusPlus;
    use rstest::rstest;

    use super::SpatHashTracker;
    use crate::{
        boid::Boid,
        flock::{naive_tracker::NaiveTracker, tracker::Tracker},
        options::RunOptions,
    };

    #[test]
    fn settings_fit_the_perception_radius() {
        let ro = RunOptions::default();
        let settings = SpatHashTracker::get_tracker_settings(&ro);

        assert_eq!(settings.x_cell_count, 16);
        assert_eq!(settings.y_cell_count, 12);
        assert_eq!(settings.cell_count, 192);
        assert!(settings.x_cell_res >= ro.perception_radius);
        assert!(settings.y_cell_res >= ro.perception_radius);
    }

    #[test]
    fn settings_for_radius_wider_than_world() {
        let ro = RunOptions {
            perception_radius: 1000.,
            ..Default::default()
        };
        let settings = SpatHashTracker::get_tracker_settings(&ro);

        assert_eq!(settings.cell_count, 1);
        assert_eq!(settings.x_cell_res, ro.width);
    }

    #[rstest]
    #[case(0., 0., (0, 0))]
    #[case(49.9, 49.9, (0, 0))]
    #[case(50., 50., (1, 1))]
    #[case(799.9, 599.9, (15, 11))]
    #[case(800., 600., (15, 11))]
    #[case(-10., 10_000., (0, 11))]
    fn should_produce_cell(#[case] x: f32, #[case] y: f32, #[case] expected: (usize, usize)) {
        let ro = RunOptions::default();
        let tracker = SpatHashTracker::new(&[], &ro);

        assert_eq!(tracker.get_cell(x, y), expected);
    }

    #[test]
    fn should_produce_1d_index() {
        let ro = RunOptions::default();
        let tracker = SpatHashTracker::new(&[], &ro);

        assert_eq!(tracker.get_table_index((0, 0)), 0);
        assert_eq!(tracker.get_table_index((15, 0)), 15);
        assert_eq!(tracker.get_table_index((0, 1)), 16);
        assert_eq!(tracker.get_table_index((15, 11)), 191);
    }

    #[rstest]
    #[case(RunOptions::default(), 200)]
    #[case(RunOptions { perception_radius: 13.7, ..Default::default() }, 400)]
    #[case(RunOptions { perception_radius: 333., ..Default::default() }, 120)]
    #[case(RunOptions { width: 97., height: 1234., ..Default::default() }, 150)]
    fn matches_naive_scan(#[case] ro: RunOptions, #[case] n: usize) {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let mut boids: Vec<Boid> = (0..n).map(|id| Boid::random(&mut rng, id, &ro)).collect();
        // a few boids on the borders and on top of each other
        boids.push(Boid::new(0., 0., Vec2::ZERO, n));
        boids.push(Boid::new(0., 0., Vec2::ZERO, n + 1));
        boids.push(Boid::new(ro.width - 0.01, ro.height - 0.01, Vec2::ZERO, n + 2));
        boids.push(Boid::new(rng.gen_range(0.0..ro.width), 0., Vec2::ZERO, n + 3));

        let naive = NaiveTracker::new(&boids, &ro);
        let grid = SpatHashTracker::new(&boids, &ro);

        for boid in boids.iter() {
            let mut expected = Vec::new();
            let mut actual = Vec::new();
            naive.get_neighbours(boid, &boids, &ro, &mut expected);
            grid.get_neighbours(boid, &boids, &ro, &mut actual);

            let expected: Vec<usize> = expected.iter().map(|b| b.id).collect();
            let actual: Vec<usize> = actual.iter().map(|b| b.id).collect();
            assert_eq!(actual, expected, "boid {}", boid.id);
        }
    }

    #[test]
    fn update_moves_boids_between_cells() {
        let ro = RunOptions::default();
        let mut boids = vec![
            Boid::new(10., 10., Vec2::ZERO, 0),
            Boid::new(500., 500., Vec2::ZERO, 1),
        ];
        let mut grid = SpatHashTracker::new(&boids, &ro);

        {
            let mut neighbours = Vec::new();
            grid.get_neighbours(&boids[0], &boids, &ro, &mut neighbours);
            assert!(neighbours.is_empty());
        }

        boids[1].position = Vec2::new(20., 20.);
        grid.update(&boids, &ro);
        let mut neighbours = Vec::new();
        grid.get_neighbours(&boids[0], &boids, &ro, &mut neighbours);

        assert_eq!(neighbours.len(), 1);
        assert_eq!(neighbours[0].id, 1);
    }
}
