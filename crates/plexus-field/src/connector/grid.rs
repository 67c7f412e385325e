//! Uniform grid for neighbor queries.

use plexus_core::{Particle, Vec2};

use super::{Link, make_link};

/// Upper bound on cells per axis, so tiny link distances on a large field
/// do not allocate a huge grid. Cells only ever grow past the link
/// distance, which keeps the 3×3 neighborhood search exact.
const MAX_CELLS_PER_AXIS: usize = 256;

/// Particle indices bucketed into square cells.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    origin: Vec2,
    /// Link distance the grid was built for. Never exceeds `cell_size`.
    threshold: f64,
    cell_size: f64,
    cols: usize,
    rows: usize,
    cells: Vec<Vec<usize>>,
}

impl SpatialGrid {
    /// Bucket `particles` into cells at least `threshold` wide.
    pub fn build(particles: &[Particle], threshold: f64) -> Self {
        let (min, max) = extent(particles);
        let span_x = max.x - min.x;
        let span_y = max.y - min.y;

        let requested = if threshold.is_finite() && threshold > 0.0 {
            threshold
        } else {
            f64::INFINITY
        };
        let cell_size = requested
            .max(span_x / MAX_CELLS_PER_AXIS as f64)
            .max(span_y / MAX_CELLS_PER_AXIS as f64);

        let cols = (span_x / cell_size) as usize + 1;
        let rows = (span_y / cell_size) as usize + 1;

        let mut grid = Self {
            origin: min,
            threshold,
            cell_size,
            cols,
            rows,
            cells: vec![Vec::new(); cols * rows],
        };
        for (index, particle) in particles.iter().enumerate() {
            let (col, row) = grid.cell_of(particle.position);
            grid.cells[row * cols + col].push(index);
        }
        grid
    }

    /// Number of (columns, rows).
    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Links between particles closer than the build threshold, ordered by
    /// `(a, b)`. `particles` must be the slice the grid was built from.
    pub fn links(&self, particles: &[Particle], base_opacity: f64) -> Vec<Link> {
        let threshold = self.threshold;
        let mut links = Vec::new();
        if threshold.is_nan() || threshold <= 0.0 {
            return links;
        }

        for row in 0..self.rows {
            for col in 0..self.cols {
                for &a in &self.cells[row * self.cols + col] {
                    for b in self.neighbors(col, row) {
                        if b <= a {
                            continue;
                        }
                        if let Some(link) =
                            make_link(a, b, &particles[a], &particles[b], threshold, base_opacity)
                        {
                            links.push(link);
                        }
                    }
                }
            }
        }
        links.sort_unstable_by_key(|link| (link.a, link.b));
        links
    }

    /// Indices in the 3×3 block of cells around `(col, row)`.
    fn neighbors(&self, col: usize, row: usize) -> impl Iterator<Item = usize> + '_ {
        let cols = col.saturating_sub(1)..=(col + 1).min(self.cols - 1);
        let rows = row.saturating_sub(1)..=(row + 1).min(self.rows - 1);
        rows.flat_map(move |r| {
            cols.clone()
                .flat_map(move |c| self.cells[r * self.cols + c].iter().copied())
        })
    }

    fn cell_of(&self, position: Vec2) -> (usize, usize) {
        let col = ((position.x - self.origin.x) / self.cell_size) as usize;
        let row = ((position.y - self.origin.y) / self.cell_size) as usize;
        (col.min(self.cols - 1), row.min(self.rows - 1))
    }
}

fn extent(particles: &[Particle]) -> (Vec2, Vec2) {
    let mut iter = particles.iter().map(|p| p.position);
    let Some(first) = iter.next() else {
        return (Vec2::ZERO, Vec2::ZERO);
    };
    iter.fold((first, first), |(min, max), p| {
        (
            Vec2::new(min.x.min(p.x), min.y.min(p.y)),
            Vec2::new(max.x.max(p.x), max.y.max(p.y)),
        )
    })
}
