// grid.rs - Toroidal grid state and the generation-advance engine

use rand::Rng;

// Compile-time grid size configuration
pub const ROWS: usize = 25;
pub const COLS: usize = 45;

/// Probability that `random` marks a cell alive.
const RANDOM_LIVE_CHANCE: f64 = 0.2;

const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// A finite grid of live/dead cells with wrap-around (toroidal) topology.
///
/// Dimensions are carried at runtime so a grid supplied from outside the
/// controller can be rejected when it does not match [`ROWS`] x [`COLS`].
/// Advancing a generation never mutates in place; `step` always produces a
/// fresh grid evaluated entirely against its input.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    /// All-dead grid of the simulation's fixed dimensions.
    pub fn empty() -> Self {
        Self::new(ROWS, COLS)
    }

    /// Fixed-size grid seeded from a list of live cell coordinates.
    /// Out-of-range coordinates are skipped.
    pub fn from_cells(live: &[(usize, usize)]) -> Self {
        let mut grid = Self::empty();
        for &(row, col) in live {
            if row < grid.rows && col < grid.cols {
                grid.set(row, col, true);
            }
        }
        grid
    }

    /// Fixed-size grid with each cell independently alive with probability 0.2.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut grid = Self::empty();
        for cell in &mut grid.cells {
            *cell = rng.random_bool(RANDOM_LIVE_CHANCE);
        }
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[self.index(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        let index = self.index(row, col);
        self.cells[index] = alive;
    }

    pub fn toggle(&mut self, row: usize, col: usize) {
        let index = self.index(row, col);
        self.cells[index] = !self.cells[index];
    }

    /// Number of live cells among the 8 neighbors of (row, col), with every
    /// coordinate wrapped modulo the grid dimensions. The grid has no
    /// boundary: row 0 neighbors the last row, column 0 the last column.
    pub fn live_neighbors(&self, row: usize, col: usize) -> u8 {
        let mut count = 0;
        for &(dr, dc) in &NEIGHBOR_OFFSETS {
            let r = ((row as isize + dr + self.rows as isize) % self.rows as isize) as usize;
            let c = ((col as isize + dc + self.cols as isize) % self.cols as isize) as usize;
            if self.get(r, c) {
                count += 1;
            }
        }
        count
    }

    /// Advance one generation, writing into a freshly allocated grid.
    pub fn step(&self) -> Grid {
        let mut next = Grid::new(self.rows, self.cols);
        for row in 0..self.rows {
            for col in 0..self.cols {
                let count = self.live_neighbors(row, col);
                let alive = self.get(row, col);

                let next_state = match (alive, count) {
                    (true, 2) | (true, 3) => true,   // Survival
                    (false, 3)            => true,   // Birth
                    _                     => false,  // Death or stays dead
                };

                next.set(row, col, next_state);
            }
        }
        next
    }

    /// True iff at least one cell is alive.
    pub fn has_life(&self) -> bool {
        self.cells.iter().any(|&alive| alive)
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }
}
