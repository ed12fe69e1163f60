// patterns.rs - Named preset seed patterns

use crate::grid::Grid;

pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

/// Sentinel preset name resolving to the empty grid.
pub const NONE_NAME: &str = "None";

/// Dropdown order: the empty sentinel first, then the seed patterns.
pub const PRESET_NAMES: [&str; 4] = [NONE_NAME, "Hearts", "Penta", "Glider"];

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Hearts",
        cells: &[
            // Left heart
            (9, 13), (9, 14), (9, 16), (9, 17),
            (10, 12), (10, 15), (10, 18),
            (11, 12), (11, 18),
            (12, 13), (12, 17),
            (13, 14), (13, 16),
            (14, 15),
            // Right heart
            (9, 27), (9, 28), (9, 30), (9, 31),
            (10, 26), (10, 29), (10, 32),
            (11, 26), (11, 32),
            (12, 27), (12, 31),
            (13, 28), (13, 30),
            (14, 29),
        ],
    },
    Pattern {
        // Pentadecathlon, period-15 oscillator
        name: "Penta",
        cells: &[
            (11, 19), (11, 24),
            (12, 18), (12, 20), (12, 21), (12, 22), (12, 23), (12, 25),
            (13, 19), (13, 24),
        ],
    },
    Pattern {
        name: "Glider",
        cells: &[(6, 7), (7, 8), (8, 6), (8, 7), (8, 8)],
    },
];

impl Pattern {
    pub fn to_grid(&self) -> Grid {
        Grid::from_cells(self.cells)
    }
}

/// Resolve a preset name to a freshly seeded grid. The `"None"` sentinel maps
/// to the empty grid; unknown names resolve to nothing.
pub fn lookup(name: &str) -> Option<Grid> {
    if name == NONE_NAME {
        return Some(Grid::empty());
    }
    PATTERNS
        .iter()
        .find(|pattern| pattern.name == name)
        .map(Pattern::to_grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{COLS, ROWS};

    #[test]
    fn none_sentinel_resolves_to_the_empty_grid() {
        let grid = lookup(NONE_NAME).unwrap();
        assert!(!grid.has_life());
    }

    #[test]
    fn every_preset_name_resolves_to_a_fixed_size_grid() {
        for name in PRESET_NAMES {
            let grid = lookup(name).unwrap();
            assert_eq!((grid.rows(), grid.cols()), (ROWS, COLS));
        }
    }

    #[test]
    fn seed_patterns_have_life() {
        for pattern in PATTERNS {
            assert!(pattern.to_grid().has_life(), "{} is empty", pattern.name);
        }
    }

    #[test]
    fn unknown_name_resolves_to_nothing() {
        assert!(lookup("Gosper").is_none());
    }

    #[test]
    fn glider_has_five_cells() {
        let grid = lookup("Glider").unwrap();
        assert_eq!(grid.live_count(), 5);
    }

    #[test]
    fn pentadecathlon_returns_after_fifteen_generations() {
        let start = lookup("Penta").unwrap();
        let mut grid = start.clone();
        for _ in 0..15 {
            grid = grid.step();
        }
        assert_eq!(grid, start);
    }
}
